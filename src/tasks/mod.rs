mod handlers;
mod migration;
mod service;
mod types;

pub use handlers::*;
pub use migration::*;
pub use service::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn task() -> Task {
        let now = Utc::now();
        Task {
            id: Uuid::new_v4(),
            title: "Follow up".to_string(),
            description: String::new(),
            status: "todo".to_string(),
            priority: "medium".to_string(),
            due_date: None,
            reminder_date: None,
            contact_id: None,
            company_id: None,
            owner_id: Uuid::new_v4(),
            assigned_to: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_overdue_task() {
        let now = Utc::now();
        let mut t = task();
        t.due_date = Some(now - Duration::hours(1));
        assert!(t.is_overdue(now));
        assert!(!t.is_due_soon(now));
    }

    #[test]
    fn test_due_soon_task() {
        let now = Utc::now();
        let mut t = task();
        t.due_date = Some(now + Duration::hours(12));
        assert!(!t.is_overdue(now));
        assert!(t.is_due_soon(now));
    }

    #[test]
    fn test_due_beyond_window_is_not_due_soon() {
        let now = Utc::now();
        let mut t = task();
        t.due_date = Some(now + Duration::hours(25));
        assert!(!t.is_due_soon(now));
    }

    #[test]
    fn test_closed_task_is_never_overdue() {
        let now = Utc::now();
        let mut t = task();
        t.due_date = Some(now - Duration::days(3));
        t.status = "done".to_string();
        assert!(!t.is_overdue(now));
        t.status = "cancelled".to_string();
        assert!(!t.is_overdue(now));
    }

    #[test]
    fn test_task_without_due_date() {
        let now = Utc::now();
        let t = task();
        assert!(!t.is_overdue(now));
        assert!(!t.is_due_soon(now));
    }

    #[test]
    fn test_sync_completed_at_sets_once() {
        let now = Utc::now();
        let mut t = task();
        t.status = "done".to_string();
        t.sync_completed_at(now);
        assert_eq!(t.completed_at, Some(now));

        // a later save must not move the timestamp
        let later = now + Duration::hours(2);
        t.sync_completed_at(later);
        assert_eq!(t.completed_at, Some(now));
    }

    #[test]
    fn test_sync_completed_at_clears_on_reopen() {
        let now = Utc::now();
        let mut t = task();
        t.status = "done".to_string();
        t.sync_completed_at(now);
        t.status = "in_progress".to_string();
        t.sync_completed_at(now);
        assert_eq!(t.completed_at, None);
    }

    #[test]
    fn test_priority_rank() {
        assert!(priority_rank("urgent") > priority_rank("high"));
        assert!(priority_rank("high") > priority_rank("medium"));
        assert!(priority_rank("medium") > priority_rank("low"));
        assert_eq!(priority_rank("low"), priority_rank("unknown"));
    }

    #[test]
    fn test_create_request_validation() {
        let req = CreateTaskRequest {
            title: String::new(),
            status: Some("paused".to_string()),
            priority: Some("urgent".to_string()),
            ..Default::default()
        };
        let mut errors = crate::shared::error::FieldErrors::new();
        req.validate_into(&mut errors);
        assert!(errors.has("title"));
        assert!(errors.has("status"));
        assert!(!errors.has("priority"));
    }
}
