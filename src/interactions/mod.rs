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
    use crate::shared::error::FieldErrors;
    use chrono::Utc;

    fn request() -> CreateInteractionRequest {
        CreateInteractionRequest {
            contact_id: None,
            company_id: None,
            interaction_type: "meeting".to_string(),
            subject: "Kickoff".to_string(),
            description: "Discussed onboarding".to_string(),
            interaction_date: Utc::now(),
            duration_minutes: Some(30),
            attachment: None,
            is_important: None,
        }
    }

    #[test]
    fn test_valid_request() {
        let mut errors = FieldErrors::new();
        request().validate_into(&mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_unknown_type_rejected() {
        let mut req = request();
        req.interaction_type = "fax".to_string();
        let mut errors = FieldErrors::new();
        req.validate_into(&mut errors);
        assert!(errors.has("interaction_type"));
    }

    #[test]
    fn test_subject_and_description_required() {
        let mut req = request();
        req.subject = String::new();
        req.description = "  ".to_string();
        let mut errors = FieldErrors::new();
        req.validate_into(&mut errors);
        assert!(errors.has("subject"));
        assert!(errors.has("description"));
    }

    #[test]
    fn test_negative_duration_rejected() {
        let mut req = request();
        req.duration_minutes = Some(-5);
        let mut errors = FieldErrors::new();
        req.validate_into(&mut errors);
        assert!(errors.has("duration_minutes"));
    }
}
