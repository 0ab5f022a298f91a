use crate::companies::Company;
use crate::shared::error::FieldErrors;
use crate::shared::schema::contacts;
use crate::shared::utils::join_address;
use crate::shared::validators::{check_choice, check_email, require};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const CONTACT_STATUSES: [&str; 4] = ["lead", "prospect", "customer", "churned"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    Lead,
    Prospect,
    Customer,
    Churned,
}

impl std::fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lead => write!(f, "lead"),
            Self::Prospect => write!(f, "prospect"),
            Self::Customer => write!(f, "customer"),
            Self::Churned => write!(f, "churned"),
        }
    }
}

impl Default for ContactStatus {
    fn default() -> Self {
        Self::Lead
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = contacts)]
#[diesel(treat_none_as_null = true)]
pub struct Contact {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub mobile: String,
    pub company_id: Option<Uuid>,
    pub position: String,
    pub status: String,
    pub tags: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub notes: String,
    pub owner_id: Uuid,
    pub last_contact_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn tags_list(&self) -> Vec<String> {
        parse_tags(&self.tags)
    }

    /// A contact with no address of its own renders the linked company's
    /// address instead. Stored data is never touched.
    pub fn full_address(&self, company: Option<&Company>) -> String {
        if let Some(company) = company {
            if self.street.is_empty() && self.city.is_empty() && self.postal_code.is_empty() {
                return company.full_address();
            }
        }
        join_address(&self.street, &self.postal_code, &self.city, &self.country)
    }
}

/// Splits a comma-separated tag string, trimming whitespace around each tag.
pub fn parse_tags(tags: &str) -> Vec<String> {
    if tags.trim().is_empty() {
        return Vec::new();
    }
    tags.split(',')
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

pub fn join_tags(tags: &[&str]) -> String {
    tags.join(",")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateContactRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub company_id: Option<Uuid>,
    pub position: Option<String>,
    pub status: Option<String>,
    pub tags: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
    pub last_contact_date: Option<NaiveDate>,
}

impl CreateContactRequest {
    pub fn validate_into(&self, errors: &mut FieldErrors) {
        require(errors, "first_name", &self.first_name);
        require(errors, "last_name", &self.last_name);
        require(errors, "email", &self.email);
        check_email(errors, "email", &self.email);
        if let Some(status) = self.status.as_deref() {
            check_choice(errors, "status", status, &CONTACT_STATUSES);
        }
    }
}

pub type UpdateContactRequest = CreateContactRequest;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactListQuery {
    pub q: Option<String>,
    pub status: Option<String>,
    pub company_id: Option<Uuid>,
}
