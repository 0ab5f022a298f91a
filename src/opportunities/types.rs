use crate::shared::error::{FieldErrors, NON_FIELD};
use crate::shared::schema::opportunities;
use crate::shared::validators::{check_choice, require};
use bigdecimal::{BigDecimal, RoundingMode};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub const STAGES: [&str; 5] = [
    "qualification",
    "proposal",
    "negotiation",
    "closed_won",
    "closed_lost",
];

pub const LOST_REASONS: [&str; 6] = [
    "price",
    "competitor",
    "no_budget",
    "timing",
    "no_decision",
    "other",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Qualification,
    Proposal,
    Negotiation,
    ClosedWon,
    ClosedLost,
}

impl Stage {
    pub fn parse(value: &str) -> Option<Stage> {
        match value {
            "qualification" => Some(Stage::Qualification),
            "proposal" => Some(Stage::Proposal),
            "negotiation" => Some(Stage::Negotiation),
            "closed_won" => Some(Stage::ClosedWon),
            "closed_lost" => Some(Stage::ClosedLost),
            _ => None,
        }
    }

    pub fn is_closed(self) -> bool {
        matches!(self, Stage::ClosedWon | Stage::ClosedLost)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Qualification => "qualification",
            Stage::Proposal => "proposal",
            Stage::Negotiation => "negotiation",
            Stage::ClosedWon => "closed_won",
            Stage::ClosedLost => "closed_lost",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = opportunities)]
#[diesel(treat_none_as_null = true)]
pub struct Opportunity {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub amount: BigDecimal,
    pub probability: i32,
    pub stage: String,
    pub expected_close_date: NaiveDate,
    pub actual_close_date: Option<NaiveDate>,
    pub lost_reason: Option<String>,
    pub lost_reason_details: String,
    pub contact_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Opportunity {
    pub fn is_open(&self) -> bool {
        !self.is_won() && !self.is_lost()
    }

    pub fn is_won(&self) -> bool {
        self.stage == "closed_won"
    }

    pub fn is_lost(&self) -> bool {
        self.stage == "closed_lost"
    }

    /// Expected value of the deal: the full amount once won, nothing once
    /// lost, otherwise amount scaled by the probability, rounded to cents.
    pub fn weighted_value(&self) -> BigDecimal {
        if self.is_won() {
            return self.amount.clone();
        }
        if self.is_lost() {
            return BigDecimal::from(0);
        }
        (&self.amount * BigDecimal::from(self.probability) / BigDecimal::from(100))
            .with_scale_round(2, RoundingMode::HalfUp)
    }

    /// Open past the expected close date.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_open() && self.expected_close_date < today
    }

    /// Days left until the expected close; negative when overdue,
    /// zero once the deal is closed.
    pub fn days_until_close(&self, today: NaiveDate) -> i64 {
        if !self.is_open() {
            return 0;
        }
        (self.expected_close_date - today).num_days()
    }

    /// Moves the deal to a new stage, keeping probability and the actual
    /// close date in line. The close date is written once and never moved
    /// by a second closing transition.
    pub fn apply_stage_move(&mut self, stage: Stage, today: NaiveDate) {
        self.stage = stage.to_string();
        match stage {
            Stage::ClosedWon => {
                self.probability = 100;
                if self.actual_close_date.is_none() {
                    self.actual_close_date = Some(today);
                }
            }
            Stage::ClosedLost => {
                self.probability = 0;
                if self.actual_close_date.is_none() {
                    self.actual_close_date = Some(today);
                }
            }
            _ => {}
        }
    }

    pub fn stage_color(&self) -> &'static str {
        match self.stage.as_str() {
            "qualification" => "secondary",
            "proposal" => "info",
            "negotiation" => "warning",
            "closed_won" => "success",
            _ => "danger",
        }
    }

    pub fn probability_color(&self) -> &'static str {
        if self.probability >= 75 {
            "success"
        } else if self.probability >= 50 {
            "info"
        } else if self.probability >= 25 {
            "warning"
        } else {
            "danger"
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOpportunityRequest {
    pub name: String,
    pub description: Option<String>,
    pub amount: Option<BigDecimal>,
    pub probability: Option<i32>,
    pub stage: Option<String>,
    pub expected_close_date: Option<NaiveDate>,
    pub actual_close_date: Option<NaiveDate>,
    pub lost_reason: Option<String>,
    pub lost_reason_details: Option<String>,
    pub contact_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
}

impl CreateOpportunityRequest {
    pub fn validate_into(&self, errors: &mut FieldErrors) {
        require(errors, "name", &self.name);
        if self.amount.is_none() {
            errors.add("amount", "This field is required");
        }
        if self.expected_close_date.is_none() {
            errors.add("expected_close_date", "This field is required");
        }
        if let Some(probability) = self.probability {
            if !(0..=100).contains(&probability) {
                errors.add("probability", "Probability must be between 0 and 100");
            }
        }
        if let Some(stage) = &self.stage {
            check_choice(errors, "stage", stage, &STAGES);
        }
        if let Some(lost_reason) = self.lost_reason.as_deref().filter(|s| !s.is_empty()) {
            check_choice(errors, "lost_reason", lost_reason, &LOST_REASONS);
        }

        let stage = self.stage.as_deref().and_then(Stage::parse);
        if stage == Some(Stage::ClosedLost)
            && self.lost_reason.as_deref().filter(|s| !s.is_empty()).is_none()
        {
            errors.add("lost_reason", "A lost opportunity needs a reason");
        }
        if stage.map(Stage::is_closed) == Some(true) && self.actual_close_date.is_none() {
            errors.add(NON_FIELD, "A closed opportunity needs an actual close date");
        }
    }
}

pub type UpdateOpportunityRequest = CreateOpportunityRequest;

#[derive(Debug, Clone, Deserialize)]
pub struct MoveStageRequest {
    pub stage: String,
}

impl MoveStageRequest {
    pub fn validate_into(&self, errors: &mut FieldErrors) {
        check_choice(errors, "stage", &self.stage, &STAGES);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpportunityListQuery {
    pub q: Option<String>,
    pub stage: Option<String>,
    pub company_id: Option<Uuid>,
    pub contact_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OpportunityStats {
    pub total: i64,
    pub open: i64,
    pub won: i64,
    pub lost: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OpportunityListResponse {
    pub opportunities: Vec<Opportunity>,
    pub stats: OpportunityStats,
    pub pipeline_value: BigDecimal,
}
