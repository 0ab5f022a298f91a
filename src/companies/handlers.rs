use super::service::CompaniesService;
use super::types::*;
use crate::shared::error::CrmError;
use crate::shared::identity::CurrentUser;
use crate::shared::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use uuid::Uuid;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/companies", get(list_companies_handler).post(create_company_handler))
        .route(
            "/companies/:id",
            get(get_company_handler)
                .put(update_company_handler)
                .delete(delete_company_handler),
        )
}

async fn list_companies_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<CompanyListQuery>,
) -> Result<Json<Vec<Company>>, CrmError> {
    let service = CompaniesService::new(state.conn.clone());
    Ok(Json(service.list(user, query).await?))
}

async fn create_company_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<Company>), CrmError> {
    let service = CompaniesService::new(state.conn.clone());
    let company = service.create(user, req).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

async fn get_company_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Company>, CrmError> {
    let service = CompaniesService::new(state.conn.clone());
    Ok(Json(service.get(user, id).await?))
}

async fn update_company_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCompanyRequest>,
) -> Result<Json<Company>, CrmError> {
    let service = CompaniesService::new(state.conn.clone());
    Ok(Json(service.update(user, id, req).await?))
}

async fn delete_company_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, CrmError> {
    let service = CompaniesService::new(state.conn.clone());
    service.delete(user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
