use super::types::*;
use crate::shared::error::{CrmError, FieldErrors};
use crate::shared::schema::{
    companies, contacts, erp_customer_cache, erp_sync_logs, interactions, opportunities, tasks,
};
use crate::shared::utils::DbPool;
use chrono::Utc;
use diesel::prelude::*;
use log::info;
use uuid::Uuid;

pub struct CompaniesService {
    pool: DbPool,
}

impl CompaniesService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, owner: Uuid, req: CreateCompanyRequest) -> Result<Company, CrmError> {
        let mut errors = FieldErrors::new();
        req.validate_into(&mut errors);
        errors.into_result()?;

        let mut conn = self.pool.get()?;
        let now = Utc::now();
        let company = Company {
            id: Uuid::new_v4(),
            name: req.name,
            nip: req.nip.unwrap_or_default(),
            industry: req.industry.unwrap_or_default(),
            website: req.website.unwrap_or_default(),
            phone: req.phone.unwrap_or_default(),
            email: req.email.unwrap_or_default(),
            street: req.street.unwrap_or_default(),
            city: req.city.unwrap_or_default(),
            postal_code: req.postal_code.unwrap_or_default(),
            country: req.country.unwrap_or_else(|| "Polska".to_string()),
            erp_customer_code: req.erp_customer_code.unwrap_or_default(),
            notes: req.notes.unwrap_or_default(),
            owner_id: owner,
            created_at: now,
            updated_at: now,
        };

        diesel::insert_into(companies::table)
            .values(&company)
            .execute(&mut conn)?;

        Ok(company)
    }

    pub async fn get(&self, owner: Uuid, id: Uuid) -> Result<Company, CrmError> {
        let mut conn = self.pool.get()?;
        companies::table
            .filter(companies::id.eq(id))
            .filter(companies::owner_id.eq(owner))
            .first::<Company>(&mut conn)
            .optional()?
            .ok_or(CrmError::NotFound)
    }

    pub async fn list(&self, owner: Uuid, query: CompanyListQuery) -> Result<Vec<Company>, CrmError> {
        let mut conn = self.pool.get()?;

        let mut q = companies::table
            .filter(companies::owner_id.eq(owner))
            .into_boxed();

        if let Some(search) = query.q.filter(|s| !s.is_empty()) {
            let pattern = format!("%{search}%");
            q = q.filter(
                companies::name
                    .ilike(pattern.clone())
                    .or(companies::nip.ilike(pattern.clone()))
                    .or(companies::email.ilike(pattern)),
            );
        }

        if let Some(industry) = query.industry.filter(|s| !s.is_empty()) {
            q = q.filter(companies::industry.ilike(format!("%{industry}%")));
        }

        Ok(q.order(companies::name.asc()).load(&mut conn)?)
    }

    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        req: UpdateCompanyRequest,
    ) -> Result<Company, CrmError> {
        let mut errors = FieldErrors::new();
        req.validate_into(&mut errors);
        errors.into_result()?;

        let existing = self.get(owner, id).await?;
        let mut conn = self.pool.get()?;

        let company = Company {
            id: existing.id,
            name: req.name,
            nip: req.nip.unwrap_or_default(),
            industry: req.industry.unwrap_or_default(),
            website: req.website.unwrap_or_default(),
            phone: req.phone.unwrap_or_default(),
            email: req.email.unwrap_or_default(),
            street: req.street.unwrap_or_default(),
            city: req.city.unwrap_or_default(),
            postal_code: req.postal_code.unwrap_or_default(),
            country: req.country.unwrap_or_else(|| "Polska".to_string()),
            erp_customer_code: req.erp_customer_code.unwrap_or_default(),
            notes: req.notes.unwrap_or_default(),
            owner_id: existing.owner_id,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        diesel::update(
            companies::table
                .filter(companies::id.eq(id))
                .filter(companies::owner_id.eq(owner)),
        )
        .set(&company)
        .execute(&mut conn)?;

        Ok(company)
    }

    /// Deletes a company with explicit fix-up of dependent records: its
    /// interactions go with it, while contacts, tasks and opportunities only
    /// lose their company reference.
    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), CrmError> {
        self.get(owner, id).await?;
        let mut conn = self.pool.get()?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::delete(
                interactions::table
                    .filter(interactions::company_id.eq(id))
                    .filter(interactions::owner_id.eq(owner)),
            )
            .execute(conn)?;

            diesel::update(
                contacts::table
                    .filter(contacts::company_id.eq(id))
                    .filter(contacts::owner_id.eq(owner)),
            )
            .set(contacts::company_id.eq(None::<Uuid>))
            .execute(conn)?;

            diesel::update(
                tasks::table
                    .filter(tasks::company_id.eq(id))
                    .filter(tasks::owner_id.eq(owner)),
            )
            .set(tasks::company_id.eq(None::<Uuid>))
            .execute(conn)?;

            diesel::update(
                opportunities::table
                    .filter(opportunities::company_id.eq(id))
                    .filter(opportunities::owner_id.eq(owner)),
            )
            .set(opportunities::company_id.eq(None::<Uuid>))
            .execute(conn)?;

            diesel::delete(erp_customer_cache::table.filter(erp_customer_cache::company_id.eq(id)))
                .execute(conn)?;
            diesel::delete(erp_sync_logs::table.filter(erp_sync_logs::company_id.eq(id)))
                .execute(conn)?;

            diesel::delete(
                companies::table
                    .filter(companies::id.eq(id))
                    .filter(companies::owner_id.eq(owner)),
            )
            .execute(conn)?;

            Ok(())
        })?;

        info!("deleted company {id}");
        Ok(())
    }
}
