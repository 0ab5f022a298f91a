use crate::shared::error::FieldErrors;
use crate::shared::schema::tasks;
use crate::shared::validators::{check_choice, require};
use chrono::{DateTime, Duration, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const TASK_STATUSES: [&str; 4] = ["todo", "in_progress", "done", "cancelled"];
pub const TASK_PRIORITIES: [&str; 4] = ["low", "medium", "high", "urgent"];

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub due_date: Option<DateTime<Utc>>,
    pub reminder_date: Option<DateTime<Utc>>,
    pub contact_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub owner_id: Uuid,
    pub assigned_to: Option<Uuid>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn is_closed(&self) -> bool {
        self.status == "done" || self.status == "cancelled"
    }

    /// Past its due date and still open.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match self.due_date {
            Some(due) => !self.is_closed() && due < now,
            None => false,
        }
    }

    /// Due within the next 24 hours and still open.
    pub fn is_due_soon(&self, now: DateTime<Utc>) -> bool {
        match self.due_date {
            Some(due) => {
                !self.is_closed() && due > now && due - now <= Duration::hours(24)
            }
            None => false,
        }
    }

    /// Keeps completed_at consistent with the status on every save:
    /// set once when the task becomes done, cleared when it reopens.
    pub fn sync_completed_at(&mut self, now: DateTime<Utc>) {
        if self.status == "done" {
            self.completed_at = self.completed_at.or(Some(now));
        } else {
            self.completed_at = None;
        }
    }

    pub fn priority_badge_class(&self) -> &'static str {
        match self.priority.as_str() {
            "urgent" => "bg-danger",
            "high" => "bg-warning",
            "medium" => "bg-info",
            _ => "bg-secondary",
        }
    }
}

/// Sort weight so that "urgent" outranks "high" outranks "medium" etc.
/// The column is text, alphabetical order would be meaningless.
pub fn priority_rank(priority: &str) -> i32 {
    match priority {
        "urgent" => 3,
        "high" => 2,
        "medium" => 1,
        _ => 0,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub reminder_date: Option<DateTime<Utc>>,
    pub contact_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub assigned_to: Option<Uuid>,
}

impl CreateTaskRequest {
    pub fn validate_into(&self, errors: &mut FieldErrors) {
        require(errors, "title", &self.title);
        if let Some(status) = &self.status {
            check_choice(errors, "status", status, &TASK_STATUSES);
        }
        if let Some(priority) = &self.priority {
            check_choice(errors, "priority", priority, &TASK_PRIORITIES);
        }
    }
}

pub type UpdateTaskRequest = CreateTaskRequest;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskListQuery {
    pub q: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub contact_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub overdue: Option<bool>,
}
