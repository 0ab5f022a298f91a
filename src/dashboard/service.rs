use super::types::*;
use crate::contacts::CONTACT_STATUSES;
use crate::interactions::{Interaction, INTERACTION_TYPES};
use crate::opportunities::{Opportunity, STAGES};
use crate::shared::error::CrmError;
use crate::shared::schema::{companies, contacts, interactions, opportunities, tasks};
use crate::shared::utils::DbPool;
use crate::tasks::{Task, TASK_STATUSES};
use bigdecimal::BigDecimal;
use chrono::{Duration, Utc};
use diesel::dsl::{count_star, sql};
use diesel::prelude::*;
use diesel::sql_types::Bool;
use std::collections::HashMap;
use uuid::Uuid;

const OPEN_TASK_ORDER: &str = "due_date ASC NULLS LAST, created_at DESC";

pub struct DashboardService {
    pool: DbPool,
}

impl DashboardService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn summary(&self, owner: Uuid) -> Result<DashboardResponse, CrmError> {
        let mut conn = self.pool.get()?;
        let now = Utc::now();

        let total_companies: i64 = companies::table
            .filter(companies::owner_id.eq(owner))
            .count()
            .get_result(&mut conn)?;
        let total_contacts: i64 = contacts::table
            .filter(contacts::owner_id.eq(owner))
            .count()
            .get_result(&mut conn)?;
        let total_interactions: i64 = interactions::table
            .filter(interactions::owner_id.eq(owner))
            .count()
            .get_result(&mut conn)?;
        let total_tasks: i64 = tasks::table
            .filter(tasks::owner_id.eq(owner))
            .count()
            .get_result(&mut conn)?;
        let total_opportunities: i64 = opportunities::table
            .filter(opportunities::owner_id.eq(owner))
            .count()
            .get_result(&mut conn)?;

        let companies_with_contacts: i64 = contacts::table
            .filter(contacts::owner_id.eq(owner))
            .filter(contacts::company_id.is_not_null())
            .select(sql::<diesel::sql_types::BigInt>("COUNT(DISTINCT company_id)"))
            .get_result(&mut conn)?;

        let interactions_this_month: i64 = interactions::table
            .filter(interactions::owner_id.eq(owner))
            .filter(interactions::interaction_date.ge(now - Duration::days(30)))
            .count()
            .get_result(&mut conn)?;

        let contact_counts: HashMap<String, i64> = contacts::table
            .filter(contacts::owner_id.eq(owner))
            .group_by(contacts::status)
            .select((contacts::status, count_star()))
            .load::<(String, i64)>(&mut conn)?
            .into_iter()
            .collect();

        let interaction_counts: HashMap<String, i64> = interactions::table
            .filter(interactions::owner_id.eq(owner))
            .group_by(interactions::interaction_type)
            .select((interactions::interaction_type, count_star()))
            .load::<(String, i64)>(&mut conn)?
            .into_iter()
            .collect();

        let opportunity_counts: HashMap<String, i64> = opportunities::table
            .filter(opportunities::owner_id.eq(owner))
            .group_by(opportunities::stage)
            .select((opportunities::stage, count_star()))
            .load::<(String, i64)>(&mut conn)?
            .into_iter()
            .collect();

        let task_counts: HashMap<String, i64> = tasks::table
            .filter(tasks::owner_id.eq(owner))
            .group_by(tasks::status)
            .select((tasks::status, count_star()))
            .load::<(String, i64)>(&mut conn)?
            .into_iter()
            .collect();

        let open_tasks = tasks::table
            .filter(tasks::owner_id.eq(owner))
            .filter(tasks::status.ne_all(vec!["done", "cancelled"]));

        let overdue_count: i64 = open_tasks
            .clone()
            .filter(tasks::due_date.lt(now))
            .count()
            .get_result(&mut conn)?;
        let overdue_tasks: Vec<Task> = open_tasks
            .clone()
            .filter(tasks::due_date.lt(now))
            .order(sql::<Bool>(OPEN_TASK_ORDER))
            .limit(5)
            .load(&mut conn)?;

        let urgent_count: i64 = open_tasks
            .clone()
            .filter(tasks::priority.eq("urgent"))
            .count()
            .get_result(&mut conn)?;
        let urgent_tasks: Vec<Task> = open_tasks
            .clone()
            .filter(tasks::priority.eq("urgent"))
            .order(sql::<Bool>(OPEN_TASK_ORDER))
            .limit(5)
            .load(&mut conn)?;

        let due_soon_count: i64 = open_tasks
            .clone()
            .filter(tasks::due_date.gt(now))
            .filter(tasks::due_date.le(now + Duration::hours(24)))
            .count()
            .get_result(&mut conn)?;
        let due_soon_tasks: Vec<Task> = open_tasks
            .filter(tasks::due_date.gt(now))
            .filter(tasks::due_date.le(now + Duration::hours(24)))
            .order(sql::<Bool>(OPEN_TASK_ORDER))
            .limit(5)
            .load(&mut conn)?;

        let recent_interactions: Vec<Interaction> = interactions::table
            .filter(interactions::owner_id.eq(owner))
            .order(interactions::interaction_date.desc())
            .limit(5)
            .load(&mut conn)?;

        let recent_tasks: Vec<Task> = tasks::table
            .filter(tasks::owner_id.eq(owner))
            .order(tasks::created_at.desc())
            .limit(3)
            .load(&mut conn)?;

        // Money sums stay in BigDecimal end to end.
        let open_opportunities: Vec<Opportunity> = opportunities::table
            .filter(opportunities::owner_id.eq(owner))
            .filter(opportunities::stage.ne_all(vec!["closed_won", "closed_lost"]))
            .load(&mut conn)?;
        let pipeline_value = open_opportunities
            .iter()
            .fold(BigDecimal::from(0), |acc, opp| acc + opp.weighted_value());

        let won_amounts: Vec<BigDecimal> = opportunities::table
            .filter(opportunities::owner_id.eq(owner))
            .filter(opportunities::stage.eq("closed_won"))
            .select(opportunities::amount)
            .load(&mut conn)?;
        let revenue = won_amounts
            .into_iter()
            .fold(BigDecimal::from(0), |acc, amount| acc + amount);

        Ok(DashboardResponse {
            total_companies,
            total_contacts,
            total_interactions,
            total_tasks,
            total_opportunities,
            companies_with_contacts,
            interactions_this_month,
            contacts_by_status: chart_series(&contact_counts, &CONTACT_STATUSES),
            interactions_by_type: chart_series(&interaction_counts, &INTERACTION_TYPES),
            opportunities_by_stage: chart_series(&opportunity_counts, &STAGES),
            tasks_by_status: chart_series_colored(&task_counts, &TASK_STATUSES, task_status_color),
            overdue_tasks,
            overdue_count,
            urgent_tasks,
            urgent_count,
            due_soon_tasks,
            due_soon_count,
            recent_interactions,
            recent_tasks,
            pipeline_value,
            revenue,
        })
    }
}
