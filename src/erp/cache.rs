use super::client::{ErpClient, ErpCustomer};
use crate::shared::error::CrmError;
use crate::shared::schema::{erp_customer_cache, erp_sync_logs};
use crate::shared::utils::DbPool;
use bigdecimal::{BigDecimal, FromPrimitive};
use chrono::{DateTime, Duration, Utc};
use diesel::prelude::*;
use log::warn;
use serde::Serialize;
use uuid::Uuid;

/// A cached customer older than this is refreshed from the ERP on the
/// next read.
pub const CACHE_TTL_MINUTES: i64 = 15;

#[derive(Debug, Clone, Serialize, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = erp_customer_cache)]
pub struct CachedErpCustomer {
    pub id: Uuid,
    pub company_id: Uuid,
    pub customer_code: String,
    pub name: String,
    pub nip: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub payment_terms: String,
    pub credit_limit: BigDecimal,
    pub balance: BigDecimal,
    pub last_synced: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl CachedErpCustomer {
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now - self.last_synced < Duration::minutes(CACHE_TTL_MINUTES)
    }

    fn from_customer(company_id: Uuid, customer: &ErpCustomer, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_id,
            customer_code: customer.code.clone(),
            name: customer.name.clone(),
            nip: customer.nip.clone(),
            address: customer.address.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            payment_terms: customer.payment_terms.clone(),
            credit_limit: BigDecimal::from_f64(customer.credit_limit).unwrap_or_default(),
            balance: BigDecimal::from_f64(customer.balance).unwrap_or_default(),
            last_synced: now,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = erp_sync_logs)]
struct NewSyncLog {
    id: Uuid,
    company_id: Option<Uuid>,
    sync_type: String,
    status: String,
    records_synced: i32,
    error_message: String,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    duration_seconds: Option<f64>,
}

/// Read-through cache in front of the ERP: fresh rows are served from
/// the database, everything else triggers a fetch. A dead ERP never
/// breaks a page, the caller gets the stale row (or nothing) instead.
pub struct ErpCacheService {
    pool: DbPool,
}

impl ErpCacheService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn customer_for_company(
        &self,
        erp: Option<&dyn ErpClient>,
        company_id: Uuid,
        customer_code: &str,
    ) -> Result<Option<CachedErpCustomer>, CrmError> {
        if customer_code.is_empty() {
            return Ok(None);
        }

        let now = Utc::now();
        let cached = self.load(company_id)?;
        if let Some(row) = &cached {
            if row.is_fresh(now) {
                return Ok(Some(row.clone()));
            }
        }

        let Some(erp) = erp else {
            return Ok(cached);
        };

        let started = Utc::now();
        match erp.get_customer(customer_code).await {
            Some(customer) => {
                let row = self.store(company_id, &customer, cached, now)?;
                self.log_sync(Some(company_id), "customer", "success", 1, "", started)?;
                Ok(Some(row))
            }
            None => {
                warn!("ERP lookup for customer {customer_code} failed, serving cached data");
                self.log_sync(
                    Some(company_id),
                    "customer",
                    "failed",
                    0,
                    "customer fetch failed",
                    started,
                )?;
                Ok(cached)
            }
        }
    }

    fn load(&self, company_id: Uuid) -> Result<Option<CachedErpCustomer>, CrmError> {
        let mut conn = self.pool.get()?;
        Ok(erp_customer_cache::table
            .filter(erp_customer_cache::company_id.eq(company_id))
            .first::<CachedErpCustomer>(&mut conn)
            .optional()?)
    }

    fn store(
        &self,
        company_id: Uuid,
        customer: &ErpCustomer,
        existing: Option<CachedErpCustomer>,
        now: DateTime<Utc>,
    ) -> Result<CachedErpCustomer, CrmError> {
        let mut conn = self.pool.get()?;
        let mut row = CachedErpCustomer::from_customer(company_id, customer, now);

        match existing {
            Some(old) => {
                row.id = old.id;
                row.created_at = old.created_at;
                diesel::update(
                    erp_customer_cache::table.filter(erp_customer_cache::id.eq(old.id)),
                )
                .set(&row)
                .execute(&mut conn)?;
            }
            None => {
                diesel::insert_into(erp_customer_cache::table)
                    .values(&row)
                    .execute(&mut conn)?;
            }
        }
        Ok(row)
    }

    fn log_sync(
        &self,
        company_id: Option<Uuid>,
        sync_type: &str,
        status: &str,
        records_synced: i32,
        error_message: &str,
        started_at: DateTime<Utc>,
    ) -> Result<(), CrmError> {
        let mut conn = self.pool.get()?;
        let completed_at = Utc::now();
        let duration = (completed_at - started_at).num_milliseconds() as f64 / 1000.0;

        diesel::insert_into(erp_sync_logs::table)
            .values(&NewSyncLog {
                id: Uuid::new_v4(),
                company_id,
                sync_type: sync_type.to_string(),
                status: status.to_string(),
                records_synced,
                error_message: error_message.to_string(),
                started_at,
                completed_at: Some(completed_at),
                duration_seconds: Some(duration),
            })
            .execute(&mut conn)?;
        Ok(())
    }
}
