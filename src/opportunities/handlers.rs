use super::service::OpportunitiesService;
use super::types::*;
use crate::shared::error::CrmError;
use crate::shared::identity::CurrentUser;
use crate::shared::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use uuid::Uuid;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/opportunities",
            get(list_opportunities_handler).post(create_opportunity_handler),
        )
        .route(
            "/opportunities/:id",
            get(get_opportunity_handler)
                .put(update_opportunity_handler)
                .delete(delete_opportunity_handler),
        )
        .route("/opportunities/:id/stage", post(move_stage_handler))
}

async fn list_opportunities_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<OpportunityListQuery>,
) -> Result<Json<OpportunityListResponse>, CrmError> {
    let service = OpportunitiesService::new(state.conn.clone());
    Ok(Json(service.list(user, query).await?))
}

async fn create_opportunity_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateOpportunityRequest>,
) -> Result<(StatusCode, Json<Opportunity>), CrmError> {
    let service = OpportunitiesService::new(state.conn.clone());
    let opportunity = service.create(user, req).await?;
    Ok((StatusCode::CREATED, Json(opportunity)))
}

async fn get_opportunity_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Opportunity>, CrmError> {
    let service = OpportunitiesService::new(state.conn.clone());
    Ok(Json(service.get(user, id).await?))
}

async fn update_opportunity_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateOpportunityRequest>,
) -> Result<Json<Opportunity>, CrmError> {
    let service = OpportunitiesService::new(state.conn.clone());
    Ok(Json(service.update(user, id, req).await?))
}

async fn move_stage_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<MoveStageRequest>,
) -> Result<Json<Opportunity>, CrmError> {
    let service = OpportunitiesService::new(state.conn.clone());
    Ok(Json(service.move_to_stage(user, id, req).await?))
}

async fn delete_opportunity_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, CrmError> {
    let service = OpportunitiesService::new(state.conn.clone());
    service.delete(user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
