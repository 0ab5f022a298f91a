use super::types::*;
use crate::shared::error::{CrmError, FieldErrors};
use crate::shared::schema::{companies, contacts, tasks};
use crate::shared::utils::DbPool;
use chrono::Utc;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Bool;
use log::info;
use uuid::Uuid;

// Urgency first, then the nearest deadline; tasks without a due date sink
// to the bottom of their priority band.
const TASK_ORDER: &str = "CASE priority \
     WHEN 'urgent' THEN 3 WHEN 'high' THEN 2 WHEN 'medium' THEN 1 ELSE 0 END DESC, \
     due_date ASC NULLS LAST, created_at DESC";

pub struct TasksService {
    pool: DbPool,
}

impl TasksService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, owner: Uuid, req: CreateTaskRequest) -> Result<Task, CrmError> {
        let mut conn = self.pool.get()?;

        let mut errors = FieldErrors::new();
        req.validate_into(&mut errors);
        self.check_references(&mut conn, owner, &req, &mut errors)?;
        errors.into_result()?;

        let now = Utc::now();
        let mut task = Task {
            id: Uuid::new_v4(),
            title: req.title,
            description: req.description.unwrap_or_default(),
            status: req.status.unwrap_or_else(|| "todo".to_string()),
            priority: req.priority.unwrap_or_else(|| "medium".to_string()),
            due_date: req.due_date,
            reminder_date: req.reminder_date,
            contact_id: req.contact_id,
            company_id: req.company_id,
            owner_id: owner,
            assigned_to: req.assigned_to.or(Some(owner)),
            completed_at: None,
            created_at: now,
            updated_at: now,
        };
        task.sync_completed_at(now);

        diesel::insert_into(tasks::table)
            .values(&task)
            .execute(&mut conn)?;

        Ok(task)
    }

    pub async fn get(&self, owner: Uuid, id: Uuid) -> Result<Task, CrmError> {
        let mut conn = self.pool.get()?;
        tasks::table
            .filter(tasks::id.eq(id))
            .filter(tasks::owner_id.eq(owner))
            .first::<Task>(&mut conn)
            .optional()?
            .ok_or(CrmError::NotFound)
    }

    pub async fn list(&self, owner: Uuid, query: TaskListQuery) -> Result<Vec<Task>, CrmError> {
        let mut conn = self.pool.get()?;

        let mut q = tasks::table.filter(tasks::owner_id.eq(owner)).into_boxed();

        if let Some(search) = query.q.filter(|s| !s.is_empty()) {
            let pattern = format!("%{search}%");
            q = q.filter(
                tasks::title
                    .ilike(pattern.clone())
                    .or(tasks::description.ilike(pattern)),
            );
        }

        if let Some(status) = query.status.filter(|s| !s.is_empty()) {
            q = q.filter(tasks::status.eq(status));
        }

        if let Some(priority) = query.priority.filter(|s| !s.is_empty()) {
            q = q.filter(tasks::priority.eq(priority));
        }

        if let Some(contact_id) = query.contact_id {
            q = q.filter(tasks::contact_id.eq(contact_id));
        }

        if let Some(company_id) = query.company_id {
            q = q.filter(tasks::company_id.eq(company_id));
        }

        if query.overdue == Some(true) {
            q = q
                .filter(tasks::due_date.lt(Utc::now()))
                .filter(tasks::status.ne_all(vec!["done", "cancelled"]));
        }

        Ok(q.order(sql::<Bool>(TASK_ORDER)).load(&mut conn)?)
    }

    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        req: UpdateTaskRequest,
    ) -> Result<Task, CrmError> {
        let existing = self.get(owner, id).await?;
        let mut conn = self.pool.get()?;

        let mut errors = FieldErrors::new();
        req.validate_into(&mut errors);
        self.check_references(&mut conn, owner, &req, &mut errors)?;
        errors.into_result()?;

        let now = Utc::now();
        let mut task = Task {
            id: existing.id,
            title: req.title,
            description: req.description.unwrap_or_default(),
            status: req.status.unwrap_or(existing.status),
            priority: req.priority.unwrap_or(existing.priority),
            due_date: req.due_date,
            reminder_date: req.reminder_date,
            contact_id: req.contact_id,
            company_id: req.company_id,
            owner_id: existing.owner_id,
            assigned_to: req.assigned_to.or(existing.assigned_to),
            completed_at: existing.completed_at,
            created_at: existing.created_at,
            updated_at: now,
        };
        task.sync_completed_at(now);

        diesel::update(
            tasks::table
                .filter(tasks::id.eq(id))
                .filter(tasks::owner_id.eq(owner)),
        )
        .set(&task)
        .execute(&mut conn)?;

        Ok(task)
    }

    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), CrmError> {
        self.get(owner, id).await?;
        let mut conn = self.pool.get()?;

        diesel::delete(
            tasks::table
                .filter(tasks::id.eq(id))
                .filter(tasks::owner_id.eq(owner)),
        )
        .execute(&mut conn)?;

        info!("deleted task {id}");
        Ok(())
    }

    fn check_references(
        &self,
        conn: &mut PgConnection,
        owner: Uuid,
        req: &CreateTaskRequest,
        errors: &mut FieldErrors,
    ) -> Result<(), CrmError> {
        if let Some(contact_id) = req.contact_id {
            let count: i64 = contacts::table
                .filter(contacts::id.eq(contact_id))
                .filter(contacts::owner_id.eq(owner))
                .count()
                .get_result(conn)?;
            if count == 0 {
                errors.add("contact", "Select a valid choice");
            }
        }
        if let Some(company_id) = req.company_id {
            let count: i64 = companies::table
                .filter(companies::id.eq(company_id))
                .filter(companies::owner_id.eq(owner))
                .count()
                .get_result(conn)?;
            if count == 0 {
                errors.add("company", "Select a valid choice");
            }
        }
        Ok(())
    }
}
