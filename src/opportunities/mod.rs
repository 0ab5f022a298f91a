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
    use bigdecimal::BigDecimal;
    use chrono::{NaiveDate, Utc};
    use std::str::FromStr;
    use uuid::Uuid;

    fn opportunity(amount: &str, probability: i32) -> Opportunity {
        let now = Utc::now();
        Opportunity {
            id: Uuid::new_v4(),
            name: "Wdrożenie ERP".to_string(),
            description: String::new(),
            amount: BigDecimal::from_str(amount).unwrap(),
            probability,
            stage: "qualification".to_string(),
            expected_close_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            actual_close_date: None,
            lost_reason: None,
            lost_reason_details: String::new(),
            contact_id: None,
            company_id: None,
            owner_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_weighted_value_scales_by_probability() {
        let opp = opportunity("100000", 50);
        assert_eq!(opp.weighted_value(), BigDecimal::from_str("50000.00").unwrap());
    }

    #[test]
    fn test_weighted_value_rounds_to_cents() {
        let opp = opportunity("99.99", 33);
        assert_eq!(opp.weighted_value(), BigDecimal::from_str("33.00").unwrap());
    }

    #[test]
    fn test_weighted_value_when_won() {
        let mut opp = opportunity("100000", 50);
        opp.stage = "closed_won".to_string();
        assert_eq!(opp.weighted_value(), BigDecimal::from_str("100000").unwrap());
    }

    #[test]
    fn test_weighted_value_when_lost() {
        let mut opp = opportunity("100000", 90);
        opp.stage = "closed_lost".to_string();
        assert_eq!(opp.weighted_value(), BigDecimal::from(0));
    }

    #[test]
    fn test_move_to_closed_won_sets_probability_and_date() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        let mut opp = opportunity("100000", 50);
        opp.apply_stage_move(Stage::ClosedWon, today);
        assert_eq!(opp.stage, "closed_won");
        assert_eq!(opp.probability, 100);
        assert_eq!(opp.actual_close_date, Some(today));
    }

    #[test]
    fn test_move_to_closed_lost_zeroes_probability() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        let mut opp = opportunity("100000", 50);
        opp.apply_stage_move(Stage::ClosedLost, today);
        assert_eq!(opp.probability, 0);
        assert_eq!(opp.actual_close_date, Some(today));
    }

    #[test]
    fn test_close_date_written_only_once() {
        let first = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        let later = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
        let mut opp = opportunity("100000", 50);
        opp.apply_stage_move(Stage::ClosedLost, first);
        opp.apply_stage_move(Stage::ClosedWon, later);
        assert_eq!(opp.actual_close_date, Some(first));
    }

    #[test]
    fn test_reopening_keeps_probability() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        let mut opp = opportunity("100000", 50);
        opp.apply_stage_move(Stage::ClosedWon, today);
        opp.apply_stage_move(Stage::Negotiation, today);
        assert_eq!(opp.stage, "negotiation");
        assert_eq!(opp.probability, 100);
        assert!(opp.is_open());
    }

    #[test]
    fn test_is_overdue() {
        let opp = opportunity("1000", 50);
        let before = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let after = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        assert!(!opp.is_overdue(before));
        assert!(opp.is_overdue(after));

        let mut closed = opportunity("1000", 50);
        closed.stage = "closed_won".to_string();
        assert!(!closed.is_overdue(after));
    }

    #[test]
    fn test_days_until_close() {
        let opp = opportunity("1000", 50);
        let today = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        assert_eq!(opp.days_until_close(today), 10);

        let past = NaiveDate::from_ymd_opt(2025, 7, 5).unwrap();
        assert_eq!(opp.days_until_close(past), -5);

        let mut closed = opportunity("1000", 50);
        closed.stage = "closed_lost".to_string();
        assert_eq!(closed.days_until_close(today), 0);
    }

    #[test]
    fn test_stage_parse_round_trip() {
        for name in STAGES {
            let stage = Stage::parse(name).unwrap();
            assert_eq!(stage.to_string(), name);
        }
        assert!(Stage::parse("discovery").is_none());
    }

    #[test]
    fn test_closed_lost_requires_reason() {
        let req = CreateOpportunityRequest {
            name: "Deal".to_string(),
            description: None,
            amount: Some(BigDecimal::from(1000)),
            probability: Some(50),
            stage: Some("closed_lost".to_string()),
            expected_close_date: NaiveDate::from_ymd_opt(2025, 6, 30),
            actual_close_date: NaiveDate::from_ymd_opt(2025, 6, 1),
            lost_reason: None,
            lost_reason_details: None,
            contact_id: None,
            company_id: None,
        };
        let mut errors = FieldErrors::new();
        req.validate_into(&mut errors);
        assert!(errors.has("lost_reason"));
    }

    #[test]
    fn test_closed_stage_requires_close_date() {
        let req = CreateOpportunityRequest {
            name: "Deal".to_string(),
            description: None,
            amount: Some(BigDecimal::from(1000)),
            probability: Some(50),
            stage: Some("closed_won".to_string()),
            expected_close_date: NaiveDate::from_ymd_opt(2025, 6, 30),
            actual_close_date: None,
            lost_reason: None,
            lost_reason_details: None,
            contact_id: None,
            company_id: None,
        };
        let mut errors = FieldErrors::new();
        req.validate_into(&mut errors);
        assert!(errors.has(crate::shared::error::NON_FIELD));
    }

    #[test]
    fn test_probability_out_of_range() {
        let req = CreateOpportunityRequest {
            name: "Deal".to_string(),
            description: None,
            amount: Some(BigDecimal::from(1000)),
            probability: Some(120),
            stage: None,
            expected_close_date: NaiveDate::from_ymd_opt(2025, 6, 30),
            actual_close_date: None,
            lost_reason: None,
            lost_reason_details: None,
            contact_id: None,
            company_id: None,
        };
        let mut errors = FieldErrors::new();
        req.validate_into(&mut errors);
        assert!(errors.has("probability"));
    }
}
