use super::types::*;
use crate::shared::error::{CrmError, FieldErrors};
use crate::shared::schema::{companies, contacts, opportunities};
use crate::shared::utils::DbPool;
use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::prelude::*;
use log::info;
use uuid::Uuid;

pub struct OpportunitiesService {
    pool: DbPool,
}

impl OpportunitiesService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        owner: Uuid,
        req: CreateOpportunityRequest,
    ) -> Result<Opportunity, CrmError> {
        let mut conn = self.pool.get()?;

        let mut errors = FieldErrors::new();
        req.validate_into(&mut errors);
        self.check_references(&mut conn, owner, &req, &mut errors)?;
        errors.into_result()?;

        let now = Utc::now();
        let opportunity = Opportunity {
            id: Uuid::new_v4(),
            name: req.name,
            description: req.description.unwrap_or_default(),
            amount: req.amount.unwrap_or_default(),
            probability: req.probability.unwrap_or(50),
            stage: req.stage.unwrap_or_else(|| "qualification".to_string()),
            expected_close_date: req.expected_close_date.unwrap_or_else(|| now.date_naive()),
            actual_close_date: req.actual_close_date,
            lost_reason: req.lost_reason.filter(|s| !s.is_empty()),
            lost_reason_details: req.lost_reason_details.unwrap_or_default(),
            contact_id: req.contact_id,
            company_id: req.company_id,
            owner_id: owner,
            created_at: now,
            updated_at: now,
        };

        diesel::insert_into(opportunities::table)
            .values(&opportunity)
            .execute(&mut conn)?;

        Ok(opportunity)
    }

    pub async fn get(&self, owner: Uuid, id: Uuid) -> Result<Opportunity, CrmError> {
        let mut conn = self.pool.get()?;
        opportunities::table
            .filter(opportunities::id.eq(id))
            .filter(opportunities::owner_id.eq(owner))
            .first::<Opportunity>(&mut conn)
            .optional()?
            .ok_or(CrmError::NotFound)
    }

    pub async fn list(
        &self,
        owner: Uuid,
        query: OpportunityListQuery,
    ) -> Result<OpportunityListResponse, CrmError> {
        let mut conn = self.pool.get()?;

        let mut q = opportunities::table
            .filter(opportunities::owner_id.eq(owner))
            .into_boxed();

        if let Some(search) = query.q.filter(|s| !s.is_empty()) {
            let pattern = format!("%{search}%");
            q = q.filter(
                opportunities::name
                    .ilike(pattern.clone())
                    .or(opportunities::description.ilike(pattern)),
            );
        }

        if let Some(stage) = query.stage.filter(|s| !s.is_empty()) {
            q = q.filter(opportunities::stage.eq(stage));
        }

        if let Some(company_id) = query.company_id {
            q = q.filter(opportunities::company_id.eq(company_id));
        }

        if let Some(contact_id) = query.contact_id {
            q = q.filter(opportunities::contact_id.eq(contact_id));
        }

        let rows: Vec<Opportunity> = q
            .order(opportunities::expected_close_date.asc())
            .load(&mut conn)?;

        let mut stats = OpportunityStats {
            total: rows.len() as i64,
            ..Default::default()
        };
        let mut pipeline_value = BigDecimal::from(0);
        for opp in &rows {
            if opp.is_won() {
                stats.won += 1;
            } else if opp.is_lost() {
                stats.lost += 1;
            } else {
                stats.open += 1;
                pipeline_value += opp.weighted_value();
            }
        }

        Ok(OpportunityListResponse {
            opportunities: rows,
            stats,
            pipeline_value,
        })
    }

    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        req: UpdateOpportunityRequest,
    ) -> Result<Opportunity, CrmError> {
        let existing = self.get(owner, id).await?;
        let mut conn = self.pool.get()?;

        let mut errors = FieldErrors::new();
        req.validate_into(&mut errors);
        self.check_references(&mut conn, owner, &req, &mut errors)?;
        errors.into_result()?;

        let opportunity = Opportunity {
            id: existing.id,
            name: req.name,
            description: req.description.unwrap_or_default(),
            amount: req.amount.unwrap_or(existing.amount),
            probability: req.probability.unwrap_or(existing.probability),
            stage: req.stage.unwrap_or(existing.stage),
            expected_close_date: req
                .expected_close_date
                .unwrap_or(existing.expected_close_date),
            actual_close_date: req.actual_close_date,
            lost_reason: req.lost_reason.filter(|s| !s.is_empty()),
            lost_reason_details: req.lost_reason_details.unwrap_or_default(),
            contact_id: req.contact_id,
            company_id: req.company_id,
            owner_id: existing.owner_id,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        diesel::update(
            opportunities::table
                .filter(opportunities::id.eq(id))
                .filter(opportunities::owner_id.eq(owner)),
        )
        .set(&opportunity)
        .execute(&mut conn)?;

        Ok(opportunity)
    }

    /// Single atomic stage transition, used by the pipeline board. Writes
    /// only the fields the transition touches.
    pub async fn move_to_stage(
        &self,
        owner: Uuid,
        id: Uuid,
        req: MoveStageRequest,
    ) -> Result<Opportunity, CrmError> {
        let mut errors = FieldErrors::new();
        req.validate_into(&mut errors);
        errors.into_result()?;

        let mut opportunity = self.get(owner, id).await?;
        let stage = Stage::parse(&req.stage)
            .ok_or_else(|| CrmError::Validation(FieldErrors::single("stage", "Unknown stage")))?;
        opportunity.apply_stage_move(stage, Utc::now().date_naive());
        opportunity.updated_at = Utc::now();

        let mut conn = self.pool.get()?;
        diesel::update(
            opportunities::table
                .filter(opportunities::id.eq(id))
                .filter(opportunities::owner_id.eq(owner)),
        )
        .set((
            opportunities::stage.eq(&opportunity.stage),
            opportunities::probability.eq(opportunity.probability),
            opportunities::actual_close_date.eq(opportunity.actual_close_date),
            opportunities::updated_at.eq(opportunity.updated_at),
        ))
        .execute(&mut conn)?;

        info!("moved opportunity {id} to stage {}", opportunity.stage);
        Ok(opportunity)
    }

    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), CrmError> {
        self.get(owner, id).await?;
        let mut conn = self.pool.get()?;

        diesel::delete(
            opportunities::table
                .filter(opportunities::id.eq(id))
                .filter(opportunities::owner_id.eq(owner)),
        )
        .execute(&mut conn)?;

        info!("deleted opportunity {id}");
        Ok(())
    }

    fn check_references(
        &self,
        conn: &mut PgConnection,
        owner: Uuid,
        req: &CreateOpportunityRequest,
        errors: &mut FieldErrors,
    ) -> Result<(), CrmError> {
        if let Some(contact_id) = req.contact_id {
            let count: i64 = contacts::table
                .filter(contacts::id.eq(contact_id))
                .filter(contacts::owner_id.eq(owner))
                .count()
                .get_result(conn)?;
            if count == 0 {
                errors.add("contact", "Select a valid choice");
            }
        }
        if let Some(company_id) = req.company_id {
            let count: i64 = companies::table
                .filter(companies::id.eq(company_id))
                .filter(companies::owner_id.eq(owner))
                .count()
                .get_result(conn)?;
            if count == 0 {
                errors.add("company", "Select a valid choice");
            }
        }
        Ok(())
    }
}
