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
    use uuid::Uuid;

    fn company() -> Company {
        let now = Utc::now();
        Company {
            id: Uuid::new_v4(),
            name: "Acme Sp. z o.o.".to_string(),
            nip: "1234567890".to_string(),
            industry: "IT".to_string(),
            website: String::new(),
            phone: String::new(),
            email: "biuro@acme.pl".to_string(),
            street: "ul. Prosta 1".to_string(),
            city: "Warszawa".to_string(),
            postal_code: "00-001".to_string(),
            country: "Polska".to_string(),
            erp_customer_code: "KH001".to_string(),
            notes: String::new(),
            owner_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_full_address() {
        assert_eq!(company().full_address(), "ul. Prosta 1, 00-001 Warszawa, Polska");
    }

    #[test]
    fn test_create_request_requires_name() {
        let req = CreateCompanyRequest::default();
        let mut errors = FieldErrors::new();
        req.validate_into(&mut errors);
        assert!(errors.has("name"));
    }

    #[test]
    fn test_create_request_checks_nip_format() {
        let req = CreateCompanyRequest {
            name: "Acme".to_string(),
            nip: Some("12345".to_string()),
            ..Default::default()
        };
        let mut errors = FieldErrors::new();
        req.validate_into(&mut errors);
        assert!(errors.has("nip"));
        assert!(!errors.has("name"));
    }
}
