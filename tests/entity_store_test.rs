#[cfg(test)]
mod entity_store_integration_tests {
    use chrono::{NaiveDate, Utc};
    use crmserver::companies::{CompaniesService, CreateCompanyRequest};
    use crmserver::contacts::{ContactsService, CreateContactRequest};
    use crmserver::dashboard::DashboardService;
    use crmserver::interactions::{CreateInteractionRequest, InteractionsService};
    use crmserver::shared::error::CrmError;
    use crmserver::shared::utils::{create_conn, run_migrations, DbPool};
    use crmserver::tasks::{CreateTaskRequest, TasksService};
    use uuid::Uuid;

    // These tests need a reachable Postgres; they skip themselves when
    // DATABASE_URL is not set or the database is down.
    fn test_pool() -> Option<DbPool> {
        let url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                println!("Skipping test - DATABASE_URL not set");
                return None;
            }
        };
        let pool = match create_conn(&url, 2) {
            Ok(pool) => pool,
            Err(_) => {
                println!("Skipping test - cannot connect to Postgres");
                return None;
            }
        };
        let mut conn = pool.get().ok()?;
        run_migrations(&mut conn).ok()?;
        Some(pool)
    }

    fn company_request(name: &str) -> CreateCompanyRequest {
        CreateCompanyRequest {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn contact_request(email: &str, company_id: Option<Uuid>) -> CreateContactRequest {
        CreateContactRequest {
            first_name: "Jan".to_string(),
            last_name: "Kowalski".to_string(),
            email: email.to_string(),
            company_id,
            ..Default::default()
        }
    }

    fn interaction_request(
        contact_id: Option<Uuid>,
        company_id: Option<Uuid>,
    ) -> CreateInteractionRequest {
        CreateInteractionRequest {
            contact_id,
            company_id,
            interaction_type: "note".to_string(),
            subject: "Notatka".to_string(),
            description: "Po spotkaniu".to_string(),
            interaction_date: Utc::now(),
            duration_minutes: None,
            attachment: None,
            is_important: None,
        }
    }

    fn unique_email() -> String {
        format!("{}@example.com", Uuid::new_v4())
    }

    #[tokio::test]
    async fn test_cross_owner_lookup_is_not_found() {
        let Some(pool) = test_pool() else { return };
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let service = CompaniesService::new(pool);

        let company = service
            .create(owner, company_request("Acme"))
            .await
            .unwrap();

        assert!(service.get(owner, company.id).await.is_ok());
        let err = service.get(stranger, company.id).await.unwrap_err();
        assert!(matches!(err, CrmError::NotFound));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_across_owners() {
        let Some(pool) = test_pool() else { return };
        let service = ContactsService::new(pool);
        let email = unique_email();

        service
            .create(Uuid::new_v4(), contact_request(&email, None))
            .await
            .unwrap();

        let err = service
            .create(Uuid::new_v4(), contact_request(&email, None))
            .await
            .unwrap_err();
        match err {
            CrmError::Validation(errors) => assert!(errors.has("email")),
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_company_delete_fixup() {
        let Some(pool) = test_pool() else { return };
        let owner = Uuid::new_v4();
        let companies = CompaniesService::new(pool.clone());
        let contacts = ContactsService::new(pool.clone());
        let interactions = InteractionsService::new(pool);

        let company = companies
            .create(owner, company_request("Acme"))
            .await
            .unwrap();
        let contact = contacts
            .create(owner, contact_request(&unique_email(), Some(company.id)))
            .await
            .unwrap();
        let interaction = interactions
            .create(owner, interaction_request(None, Some(company.id)))
            .await
            .unwrap();

        companies.delete(owner, company.id).await.unwrap();

        // interactions go with the company, contacts only lose the link
        let err = interactions.get(owner, interaction.id).await.unwrap_err();
        assert!(matches!(err, CrmError::NotFound));
        let contact = contacts.get(owner, contact.id).await.unwrap();
        assert_eq!(contact.company_id, None);
    }

    #[tokio::test]
    async fn test_contact_delete_fixup() {
        let Some(pool) = test_pool() else { return };
        let owner = Uuid::new_v4();
        let contacts = ContactsService::new(pool.clone());
        let interactions = InteractionsService::new(pool.clone());
        let tasks = TasksService::new(pool);

        let contact = contacts
            .create(owner, contact_request(&unique_email(), None))
            .await
            .unwrap();
        let interaction = interactions
            .create(owner, interaction_request(Some(contact.id), None))
            .await
            .unwrap();
        let task = tasks
            .create(
                owner,
                CreateTaskRequest {
                    title: "Oddzwonić".to_string(),
                    contact_id: Some(contact.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        contacts.delete(owner, contact.id).await.unwrap();

        let err = interactions.get(owner, interaction.id).await.unwrap_err();
        assert!(matches!(err, CrmError::NotFound));
        let task = tasks.get(owner, task.id).await.unwrap();
        assert_eq!(task.contact_id, None);
    }

    #[tokio::test]
    async fn test_saving_interaction_leaves_last_contact_date_alone() {
        let Some(pool) = test_pool() else { return };
        let owner = Uuid::new_v4();
        let contacts = ContactsService::new(pool.clone());
        let interactions = InteractionsService::new(pool);

        let last_contact = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let contact = contacts
            .create(
                owner,
                CreateContactRequest {
                    last_contact_date: Some(last_contact),
                    ..contact_request(&unique_email(), None)
                },
            )
            .await
            .unwrap();

        let mut req = interaction_request(Some(contact.id), None);
        req.interaction_date = "2024-01-01T10:00:00Z".parse().unwrap();
        let interaction = interactions.create(owner, req.clone()).await.unwrap();
        interactions.update(owner, interaction.id, req).await.unwrap();

        let contact = contacts.get(owner, contact.id).await.unwrap();
        assert_eq!(contact.last_contact_date, Some(last_contact));
    }

    #[tokio::test]
    async fn test_dashboard_counts_every_entity_type() {
        let Some(pool) = test_pool() else { return };
        let owner = Uuid::new_v4();
        let companies = CompaniesService::new(pool.clone());
        let contacts = ContactsService::new(pool.clone());
        let interactions = InteractionsService::new(pool.clone());
        let dashboard = DashboardService::new(pool);

        let company = companies
            .create(owner, company_request("Acme"))
            .await
            .unwrap();
        contacts
            .create(owner, contact_request(&unique_email(), Some(company.id)))
            .await
            .unwrap();
        interactions
            .create(owner, interaction_request(None, Some(company.id)))
            .await
            .unwrap();

        let summary = dashboard.summary(owner).await.unwrap();
        assert_eq!(summary.total_companies, 1);
        assert_eq!(summary.total_contacts, 1);
        assert_eq!(summary.total_interactions, 1);
        assert_eq!(summary.total_tasks, 0);
        assert_eq!(summary.total_opportunities, 0);
        assert_eq!(summary.companies_with_contacts, 1);
    }
}
