use crate::shared::error::FieldErrors;
use crate::shared::schema::interactions;
use crate::shared::validators::{check_choice, require};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const INTERACTION_TYPES: [&str; 6] = ["email", "phone", "meeting", "note", "call", "other"];

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = interactions)]
#[diesel(treat_none_as_null = true)]
pub struct Interaction {
    pub id: Uuid,
    pub contact_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub interaction_type: String,
    pub subject: String,
    pub description: String,
    pub interaction_date: DateTime<Utc>,
    pub duration_minutes: Option<i32>,
    pub attachment: Option<String>,
    pub is_important: bool,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInteractionRequest {
    pub contact_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub interaction_type: String,
    pub subject: String,
    pub description: String,
    pub interaction_date: DateTime<Utc>,
    pub duration_minutes: Option<i32>,
    pub attachment: Option<String>,
    pub is_important: Option<bool>,
}

impl CreateInteractionRequest {
    pub fn validate_into(&self, errors: &mut FieldErrors) {
        check_choice(errors, "interaction_type", &self.interaction_type, &INTERACTION_TYPES);
        require(errors, "subject", &self.subject);
        require(errors, "description", &self.description);
        if let Some(minutes) = self.duration_minutes {
            if minutes < 0 {
                errors.add("duration_minutes", "Duration cannot be negative");
            }
        }
    }
}

pub type UpdateInteractionRequest = CreateInteractionRequest;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InteractionListQuery {
    pub q: Option<String>,
    pub interaction_type: Option<String>,
    pub contact_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub is_important: Option<bool>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}
