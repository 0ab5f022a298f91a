use crate::shared::error::FieldErrors;
use crate::shared::schema::companies;
use crate::shared::utils::join_address;
use crate::shared::validators::{check_email, check_nip, require};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = companies)]
#[diesel(treat_none_as_null = true)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub nip: String,
    pub industry: String,
    pub website: String,
    pub phone: String,
    pub email: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub erp_customer_code: String,
    pub notes: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    pub fn full_address(&self) -> String {
        join_address(&self.street, &self.postal_code, &self.city, &self.country)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCompanyRequest {
    pub name: String,
    pub nip: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub erp_customer_code: Option<String>,
    pub notes: Option<String>,
}

impl CreateCompanyRequest {
    pub fn validate_into(&self, errors: &mut FieldErrors) {
        require(errors, "name", &self.name);
        check_nip(errors, "nip", self.nip.as_deref().unwrap_or(""));
        check_email(errors, "email", self.email.as_deref().unwrap_or(""));
    }
}

/// Edits replace the whole record, mirroring the create payload.
pub type UpdateCompanyRequest = CreateCompanyRequest;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyListQuery {
    pub q: Option<String>,
    pub industry: Option<String>,
}
