#[cfg(test)]
mod pipeline_integration_tests {
    use bigdecimal::BigDecimal;
    use chrono::{Duration, NaiveDate, Utc};
    use crmserver::opportunities::{Opportunity, Stage};
    use crmserver::tasks::Task;
    use std::str::FromStr;
    use uuid::Uuid;

    fn opportunity(amount: &str, probability: i32, stage: &str) -> Opportunity {
        let now = Utc::now();
        Opportunity {
            id: Uuid::new_v4(),
            name: "Kontrakt serwisowy".to_string(),
            description: String::new(),
            amount: BigDecimal::from_str(amount).unwrap(),
            probability,
            stage: stage.to_string(),
            expected_close_date: NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
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
    fn test_pipeline_value_over_lifecycle() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let mut opp = opportunity("100000", 50, "qualification");

        // open: amount weighted by probability
        assert_eq!(
            opp.weighted_value(),
            BigDecimal::from_str("50000.00").unwrap()
        );

        // moving through open stages does not change the weighting
        opp.apply_stage_move(Stage::Proposal, today);
        opp.apply_stage_move(Stage::Negotiation, today);
        assert_eq!(
            opp.weighted_value(),
            BigDecimal::from_str("50000.00").unwrap()
        );
        assert!(opp.actual_close_date.is_none());

        // winning takes the full amount and pins the close date
        opp.apply_stage_move(Stage::ClosedWon, today);
        assert_eq!(opp.weighted_value(), BigDecimal::from_str("100000").unwrap());
        assert_eq!(opp.probability, 100);
        assert_eq!(opp.actual_close_date, Some(today));
    }

    #[test]
    fn test_lost_deal_contributes_nothing() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let mut opp = opportunity("75000", 80, "negotiation");
        opp.apply_stage_move(Stage::ClosedLost, today);
        assert_eq!(opp.weighted_value(), BigDecimal::from(0));
        assert_eq!(opp.probability, 0);
        assert!(opp.is_lost());
        assert!(!opp.is_overdue(today + Duration::days(90)));
    }

    #[test]
    fn test_task_deadline_states_are_mutually_exclusive() {
        let now = Utc::now();
        let mut task = Task {
            id: Uuid::new_v4(),
            title: "Przygotować ofertę".to_string(),
            description: String::new(),
            status: "in_progress".to_string(),
            priority: "high".to_string(),
            due_date: Some(now + Duration::hours(3)),
            reminder_date: None,
            contact_id: None,
            company_id: None,
            owner_id: Uuid::new_v4(),
            assigned_to: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };

        assert!(task.is_due_soon(now));
        assert!(!task.is_overdue(now));

        task.due_date = Some(now - Duration::hours(3));
        assert!(task.is_overdue(now));
        assert!(!task.is_due_soon(now));

        task.status = "done".to_string();
        task.sync_completed_at(now);
        assert!(!task.is_overdue(now));
        assert!(!task.is_due_soon(now));
        assert_eq!(task.completed_at, Some(now));
    }
}
