use super::cache::{CachedErpCustomer, ErpCacheService};
use super::client::*;
use crate::companies::CompaniesService;
use crate::shared::error::CrmError;
use crate::shared::identity::CurrentUser;
use crate::shared::state::AppState;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

const DEFAULT_LIMIT: usize = 20;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/companies/:id/erp", get(company_erp_handler))
        .route("/erp/status", get(erp_status_handler))
        .route("/erp/customers", get(search_customers_handler))
        .route("/erp/customers/:code", get(get_customer_handler))
        .route("/erp/customers/:code/orders", get(customer_orders_handler))
        .route(
            "/erp/customers/:code/invoices",
            get(customer_invoices_handler),
        )
        .route(
            "/erp/customers/:code/delivery-notes",
            get(customer_delivery_notes_handler),
        )
        .route(
            "/erp/customers/:code/payments",
            get(customer_payments_handler),
        )
        .route(
            "/erp/customers/:code/summary",
            get(customer_summary_handler),
        )
        .route("/erp/orders/:id", get(order_detail_handler))
        .route("/erp/invoices/:id", get(invoice_detail_handler))
}

#[derive(Debug, Default, Deserialize)]
pub struct ErpListQuery {
    pub q: Option<String>,
    pub date_from: Option<chrono::NaiveDate>,
    pub date_to: Option<chrono::NaiveDate>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ErpStatus {
    pub configured: bool,
    pub connected: bool,
}

#[derive(Debug, Serialize)]
pub struct CompanyErpResponse {
    pub customer: Option<CachedErpCustomer>,
    pub summary: Option<ErpCustomerSummary>,
}

/// ERP view of one of the user's companies: the (possibly cached)
/// customer record plus live document statistics when the ERP is up.
async fn company_erp_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CompanyErpResponse>, CrmError> {
    let company = CompaniesService::new(state.conn.clone()).get(user, id).await?;

    let cache = ErpCacheService::new(state.conn.clone());
    let customer = cache
        .customer_for_company(
            state.erp.as_deref(),
            company.id,
            &company.erp_customer_code,
        )
        .await?;

    let summary = match (&state.erp, company.erp_customer_code.is_empty()) {
        (Some(erp), false) => Some(
            erp.get_customer_summary(&company.erp_customer_code, Utc::now().date_naive())
                .await,
        ),
        _ => None,
    };

    Ok(Json(CompanyErpResponse { customer, summary }))
}

async fn erp_status_handler(State(state): State<Arc<AppState>>) -> Json<ErpStatus> {
    let connected = match &state.erp {
        Some(erp) => erp.test_connection().await,
        None => false,
    };
    Json(ErpStatus {
        configured: state.erp.is_some(),
        connected,
    })
}

async fn search_customers_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(_user): CurrentUser,
    Query(query): Query<ErpListQuery>,
) -> Result<Json<Vec<ErpCustomer>>, CrmError> {
    let Some(erp) = &state.erp else {
        return Ok(Json(Vec::new()));
    };
    let q = query.q.unwrap_or_default();
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    Ok(Json(erp.search_customers(&q, limit).await))
}

async fn get_customer_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(_user): CurrentUser,
    Path(code): Path<String>,
) -> Result<Json<ErpCustomer>, CrmError> {
    let erp = state.erp.as_ref().ok_or(CrmError::NotFound)?;
    let customer = erp.get_customer(&code).await.ok_or(CrmError::NotFound)?;
    Ok(Json(customer))
}

async fn customer_orders_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(_user): CurrentUser,
    Path(code): Path<String>,
    Query(query): Query<ErpListQuery>,
) -> Result<Json<Vec<ErpOrder>>, CrmError> {
    let Some(erp) = &state.erp else {
        return Ok(Json(Vec::new()));
    };
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    Ok(Json(
        erp.get_customer_orders(&code, query.date_from, query.date_to, limit)
            .await,
    ))
}

async fn customer_invoices_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(_user): CurrentUser,
    Path(code): Path<String>,
    Query(query): Query<ErpListQuery>,
) -> Result<Json<Vec<ErpInvoice>>, CrmError> {
    let Some(erp) = &state.erp else {
        return Ok(Json(Vec::new()));
    };
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    Ok(Json(
        erp.get_customer_invoices(&code, query.date_from, query.date_to, limit)
            .await,
    ))
}

async fn customer_delivery_notes_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(_user): CurrentUser,
    Path(code): Path<String>,
    Query(query): Query<ErpListQuery>,
) -> Result<Json<Vec<ErpDeliveryNote>>, CrmError> {
    let Some(erp) = &state.erp else {
        return Ok(Json(Vec::new()));
    };
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    Ok(Json(
        erp.get_customer_delivery_notes(&code, query.date_from, query.date_to, limit)
            .await,
    ))
}

async fn customer_payments_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(_user): CurrentUser,
    Path(code): Path<String>,
    Query(query): Query<ErpListQuery>,
) -> Result<Json<Vec<ErpPayment>>, CrmError> {
    let Some(erp) = &state.erp else {
        return Ok(Json(Vec::new()));
    };
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    Ok(Json(
        erp.get_customer_payments(&code, query.date_from, query.date_to, limit)
            .await,
    ))
}

async fn order_detail_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ErpOrder>, CrmError> {
    let erp = state.erp.as_ref().ok_or(CrmError::NotFound)?;
    let order = erp.get_order_detail(&id).await.ok_or(CrmError::NotFound)?;
    Ok(Json(order))
}

async fn invoice_detail_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ErpInvoice>, CrmError> {
    let erp = state.erp.as_ref().ok_or(CrmError::NotFound)?;
    let invoice = erp.get_invoice_detail(&id).await.ok_or(CrmError::NotFound)?;
    Ok(Json(invoice))
}

async fn customer_summary_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(_user): CurrentUser,
    Path(code): Path<String>,
) -> Result<Json<ErpCustomerSummary>, CrmError> {
    let erp = state.erp.as_ref().ok_or(CrmError::NotFound)?;
    Ok(Json(
        erp.get_customer_summary(&code, Utc::now().date_naive()).await,
    ))
}
