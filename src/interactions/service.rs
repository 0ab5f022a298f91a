use super::types::*;
use crate::shared::error::{CrmError, FieldErrors, NON_FIELD};
use crate::shared::schema::{companies, contacts, interactions};
use crate::shared::utils::DbPool;
use chrono::{NaiveTime, TimeZone, Utc};
use diesel::prelude::*;
use log::info;
use uuid::Uuid;

pub struct InteractionsService {
    pool: DbPool,
}

impl InteractionsService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        owner: Uuid,
        req: CreateInteractionRequest,
    ) -> Result<Interaction, CrmError> {
        let mut conn = self.pool.get()?;

        let mut errors = FieldErrors::new();
        req.validate_into(&mut errors);
        self.check_references(&mut conn, owner, &req, &mut errors)?;
        errors.into_result()?;

        let now = Utc::now();
        let interaction = Interaction {
            id: Uuid::new_v4(),
            contact_id: req.contact_id,
            company_id: req.company_id,
            interaction_type: req.interaction_type,
            subject: req.subject,
            description: req.description,
            interaction_date: req.interaction_date,
            duration_minutes: req.duration_minutes,
            attachment: req.attachment,
            is_important: req.is_important.unwrap_or(false),
            owner_id: owner,
            created_at: now,
            updated_at: now,
        };

        diesel::insert_into(interactions::table)
            .values(&interaction)
            .execute(&mut conn)?;

        Ok(interaction)
    }

    pub async fn get(&self, owner: Uuid, id: Uuid) -> Result<Interaction, CrmError> {
        let mut conn = self.pool.get()?;
        interactions::table
            .filter(interactions::id.eq(id))
            .filter(interactions::owner_id.eq(owner))
            .first::<Interaction>(&mut conn)
            .optional()?
            .ok_or(CrmError::NotFound)
    }

    pub async fn list(
        &self,
        owner: Uuid,
        query: InteractionListQuery,
    ) -> Result<Vec<Interaction>, CrmError> {
        let mut conn = self.pool.get()?;

        let mut q = interactions::table
            .filter(interactions::owner_id.eq(owner))
            .into_boxed();

        if let Some(search) = query.q.filter(|s| !s.is_empty()) {
            let pattern = format!("%{search}%");
            q = q.filter(
                interactions::subject
                    .ilike(pattern.clone())
                    .or(interactions::description.ilike(pattern)),
            );
        }

        if let Some(interaction_type) = query.interaction_type.filter(|s| !s.is_empty()) {
            q = q.filter(interactions::interaction_type.eq(interaction_type));
        }

        if let Some(contact_id) = query.contact_id {
            q = q.filter(interactions::contact_id.eq(contact_id));
        }

        if let Some(company_id) = query.company_id {
            q = q.filter(interactions::company_id.eq(company_id));
        }

        if let Some(is_important) = query.is_important {
            q = q.filter(interactions::is_important.eq(is_important));
        }

        if let Some(date_from) = query.date_from {
            let from = Utc
                .from_utc_datetime(&date_from.and_time(NaiveTime::MIN));
            q = q.filter(interactions::interaction_date.ge(from));
        }

        if let Some(date_to) = query.date_to {
            let to = Utc.from_utc_datetime(
                &date_to
                    .succ_opt()
                    .unwrap_or(date_to)
                    .and_time(NaiveTime::MIN),
            );
            q = q.filter(interactions::interaction_date.lt(to));
        }

        Ok(q.order(interactions::interaction_date.desc())
            .load(&mut conn)?)
    }

    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        req: UpdateInteractionRequest,
    ) -> Result<Interaction, CrmError> {
        let existing = self.get(owner, id).await?;
        let mut conn = self.pool.get()?;

        let mut errors = FieldErrors::new();
        req.validate_into(&mut errors);
        self.check_references(&mut conn, owner, &req, &mut errors)?;
        errors.into_result()?;

        let interaction = Interaction {
            id: existing.id,
            contact_id: req.contact_id,
            company_id: req.company_id,
            interaction_type: req.interaction_type,
            subject: req.subject,
            description: req.description,
            interaction_date: req.interaction_date,
            duration_minutes: req.duration_minutes,
            attachment: req.attachment,
            is_important: req.is_important.unwrap_or(existing.is_important),
            owner_id: existing.owner_id,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        diesel::update(
            interactions::table
                .filter(interactions::id.eq(id))
                .filter(interactions::owner_id.eq(owner)),
        )
        .set(&interaction)
        .execute(&mut conn)?;

        Ok(interaction)
    }

    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), CrmError> {
        self.get(owner, id).await?;
        let mut conn = self.pool.get()?;

        diesel::delete(
            interactions::table
                .filter(interactions::id.eq(id))
                .filter(interactions::owner_id.eq(owner)),
        )
        .execute(&mut conn)?;

        info!("deleted interaction {id}");
        Ok(())
    }

    /// An interaction must point at a contact or a company (or both), both
    /// references must belong to the owner, and when both are given the
    /// contact has to actually work at that company.
    fn check_references(
        &self,
        conn: &mut PgConnection,
        owner: Uuid,
        req: &CreateInteractionRequest,
        errors: &mut FieldErrors,
    ) -> Result<(), CrmError> {
        if req.contact_id.is_none() && req.company_id.is_none() {
            errors.add(NON_FIELD, "An interaction must be linked to a contact or a company");
            return Ok(());
        }

        let mut contact_company: Option<Option<Uuid>> = None;
        if let Some(contact_id) = req.contact_id {
            let found: Option<Option<Uuid>> = contacts::table
                .filter(contacts::id.eq(contact_id))
                .filter(contacts::owner_id.eq(owner))
                .select(contacts::company_id)
                .first(conn)
                .optional()?;
            match found {
                Some(company_id) => contact_company = Some(company_id),
                None => errors.add("contact", "Select a valid choice"),
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
            } else if let Some(linked) = contact_company {
                if linked != Some(company_id) {
                    errors.add(NON_FIELD, "Contact does not belong to the selected company");
                }
            }
        }

        Ok(())
    }
}
