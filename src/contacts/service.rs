use super::types::*;
use crate::shared::error::{CrmError, FieldErrors};
use crate::shared::schema::{companies, contacts, interactions, opportunities, tasks};
use crate::shared::utils::DbPool;
use chrono::Utc;
use diesel::prelude::*;
use log::info;
use uuid::Uuid;

pub struct ContactsService {
    pool: DbPool,
}

impl ContactsService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, owner: Uuid, req: CreateContactRequest) -> Result<Contact, CrmError> {
        let mut conn = self.pool.get()?;

        let mut errors = FieldErrors::new();
        req.validate_into(&mut errors);
        self.check_email_unique(&mut conn, &req.email, None, &mut errors)?;
        self.check_company_ref(&mut conn, owner, req.company_id, &mut errors)?;
        errors.into_result()?;

        let now = Utc::now();
        let contact = Contact {
            id: Uuid::new_v4(),
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone.unwrap_or_default(),
            mobile: req.mobile.unwrap_or_default(),
            company_id: req.company_id,
            position: req.position.unwrap_or_default(),
            status: req.status.unwrap_or_else(|| ContactStatus::default().to_string()),
            tags: req.tags.unwrap_or_default(),
            street: req.street.unwrap_or_default(),
            city: req.city.unwrap_or_default(),
            postal_code: req.postal_code.unwrap_or_default(),
            country: req.country.unwrap_or_default(),
            notes: req.notes.unwrap_or_default(),
            owner_id: owner,
            last_contact_date: req.last_contact_date,
            created_at: now,
            updated_at: now,
        };

        diesel::insert_into(contacts::table)
            .values(&contact)
            .execute(&mut conn)?;

        Ok(contact)
    }

    pub async fn get(&self, owner: Uuid, id: Uuid) -> Result<Contact, CrmError> {
        let mut conn = self.pool.get()?;
        contacts::table
            .filter(contacts::id.eq(id))
            .filter(contacts::owner_id.eq(owner))
            .first::<Contact>(&mut conn)
            .optional()?
            .ok_or(CrmError::NotFound)
    }

    pub async fn list(&self, owner: Uuid, query: ContactListQuery) -> Result<Vec<Contact>, CrmError> {
        let mut conn = self.pool.get()?;

        let mut q = contacts::table
            .filter(contacts::owner_id.eq(owner))
            .into_boxed();

        if let Some(search) = query.q.filter(|s| !s.is_empty()) {
            let pattern = format!("%{search}%");
            q = q.filter(
                contacts::first_name
                    .ilike(pattern.clone())
                    .or(contacts::last_name.ilike(pattern.clone()))
                    .or(contacts::email.ilike(pattern.clone()))
                    .or(contacts::phone.ilike(pattern.clone()))
                    .or(contacts::mobile.ilike(pattern)),
            );
        }

        if let Some(status) = query.status.filter(|s| !s.is_empty()) {
            q = q.filter(contacts::status.eq(status));
        }

        if let Some(company_id) = query.company_id {
            q = q.filter(contacts::company_id.eq(company_id));
        }

        Ok(q.order((contacts::last_name.asc(), contacts::first_name.asc()))
            .load(&mut conn)?)
    }

    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        req: UpdateContactRequest,
    ) -> Result<Contact, CrmError> {
        let existing = self.get(owner, id).await?;
        let mut conn = self.pool.get()?;

        let mut errors = FieldErrors::new();
        req.validate_into(&mut errors);
        self.check_email_unique(&mut conn, &req.email, Some(id), &mut errors)?;
        self.check_company_ref(&mut conn, owner, req.company_id, &mut errors)?;
        errors.into_result()?;

        let contact = Contact {
            id: existing.id,
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone.unwrap_or_default(),
            mobile: req.mobile.unwrap_or_default(),
            company_id: req.company_id,
            position: req.position.unwrap_or_default(),
            status: req.status.unwrap_or(existing.status),
            tags: req.tags.unwrap_or_default(),
            street: req.street.unwrap_or_default(),
            city: req.city.unwrap_or_default(),
            postal_code: req.postal_code.unwrap_or_default(),
            country: req.country.unwrap_or_default(),
            notes: req.notes.unwrap_or_default(),
            owner_id: existing.owner_id,
            last_contact_date: req.last_contact_date,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        diesel::update(
            contacts::table
                .filter(contacts::id.eq(id))
                .filter(contacts::owner_id.eq(owner)),
        )
        .set(&contact)
        .execute(&mut conn)?;

        Ok(contact)
    }

    /// Deletes a contact: its interactions go with it, tasks and
    /// opportunities only lose their contact reference.
    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), CrmError> {
        self.get(owner, id).await?;
        let mut conn = self.pool.get()?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::delete(
                interactions::table
                    .filter(interactions::contact_id.eq(id))
                    .filter(interactions::owner_id.eq(owner)),
            )
            .execute(conn)?;

            diesel::update(
                tasks::table
                    .filter(tasks::contact_id.eq(id))
                    .filter(tasks::owner_id.eq(owner)),
            )
            .set(tasks::contact_id.eq(None::<Uuid>))
            .execute(conn)?;

            diesel::update(
                opportunities::table
                    .filter(opportunities::contact_id.eq(id))
                    .filter(opportunities::owner_id.eq(owner)),
            )
            .set(opportunities::contact_id.eq(None::<Uuid>))
            .execute(conn)?;

            diesel::delete(
                contacts::table
                    .filter(contacts::id.eq(id))
                    .filter(contacts::owner_id.eq(owner)),
            )
            .execute(conn)?;

            Ok(())
        })?;

        info!("deleted contact {id}");
        Ok(())
    }

    /// Email is unique across the whole system, not per owner. The unique
    /// index on the table remains the backstop for the validate/commit race.
    fn check_email_unique(
        &self,
        conn: &mut PgConnection,
        email: &str,
        exclude: Option<Uuid>,
        errors: &mut FieldErrors,
    ) -> Result<(), CrmError> {
        if email.is_empty() {
            return Ok(());
        }
        let mut q = contacts::table.filter(contacts::email.eq(email)).into_boxed();
        if let Some(id) = exclude {
            q = q.filter(contacts::id.ne(id));
        }
        let count: i64 = q.count().get_result(conn)?;
        if count > 0 {
            errors.add("email", "A contact with this email already exists");
        }
        Ok(())
    }

    fn check_company_ref(
        &self,
        conn: &mut PgConnection,
        owner: Uuid,
        company_id: Option<Uuid>,
        errors: &mut FieldErrors,
    ) -> Result<(), CrmError> {
        if let Some(company_id) = company_id {
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
