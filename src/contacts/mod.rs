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
    use crate::companies::Company;
    use crate::shared::error::FieldErrors;
    use chrono::Utc;
    use uuid::Uuid;

    fn contact() -> Contact {
        let now = Utc::now();
        Contact {
            id: Uuid::new_v4(),
            first_name: "Jan".to_string(),
            last_name: "Kowalski".to_string(),
            email: "jan.kowalski@example.com".to_string(),
            phone: String::new(),
            mobile: String::new(),
            company_id: None,
            position: String::new(),
            status: "lead".to_string(),
            tags: String::new(),
            street: String::new(),
            city: String::new(),
            postal_code: String::new(),
            country: String::new(),
            notes: String::new(),
            owner_id: Uuid::new_v4(),
            last_contact_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn company_with_address() -> Company {
        let now = Utc::now();
        Company {
            id: Uuid::new_v4(),
            name: "Acme".to_string(),
            nip: String::new(),
            industry: String::new(),
            website: String::new(),
            phone: String::new(),
            email: String::new(),
            street: "ul. Firmowa 5".to_string(),
            city: "Kraków".to_string(),
            postal_code: "30-001".to_string(),
            country: "Polska".to_string(),
            erp_customer_code: String::new(),
            notes: String::new(),
            owner_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(contact().full_name(), "Jan Kowalski");
    }

    #[test]
    fn test_contact_status_display() {
        assert_eq!(ContactStatus::Lead.to_string(), "lead");
        assert_eq!(ContactStatus::Customer.to_string(), "customer");
        assert_eq!(ContactStatus::default(), ContactStatus::Lead);
    }

    #[test]
    fn test_parse_tags_trims_whitespace() {
        assert_eq!(parse_tags("vip, partner ,key-account"), vec!["vip", "partner", "key-account"]);
    }

    #[test]
    fn test_parse_tags_empty_string() {
        assert_eq!(parse_tags(""), Vec::<String>::new());
        assert_eq!(parse_tags("   "), Vec::<String>::new());
    }

    #[test]
    fn test_tags_round_trip() {
        assert_eq!(parse_tags(&join_tags(&["vip", "partner"])), vec!["vip", "partner"]);
    }

    #[test]
    fn test_full_address_falls_back_to_company() {
        let contact = contact();
        let company = company_with_address();
        assert_eq!(
            contact.full_address(Some(&company)),
            "ul. Firmowa 5, 30-001 Kraków, Polska"
        );
    }

    #[test]
    fn test_full_address_prefers_own_address() {
        let mut contact = contact();
        contact.street = "ul. Domowa 2".to_string();
        contact.city = "Gdańsk".to_string();
        contact.postal_code = "80-001".to_string();
        contact.country = "Polska".to_string();
        let company = company_with_address();
        assert_eq!(
            contact.full_address(Some(&company)),
            "ul. Domowa 2, 80-001 Gdańsk, Polska"
        );
    }

    #[test]
    fn test_create_request_validation() {
        let req = CreateContactRequest {
            first_name: "Jan".to_string(),
            last_name: String::new(),
            email: "not-an-email".to_string(),
            status: Some("vip".to_string()),
            ..Default::default()
        };
        let mut errors = FieldErrors::new();
        req.validate_into(&mut errors);
        assert!(errors.has("last_name"));
        assert!(errors.has("email"));
        assert!(errors.has("status"));
        assert!(!errors.has("first_name"));
    }
}
