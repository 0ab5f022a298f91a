use super::service::InteractionsService;
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
        .route(
            "/interactions",
            get(list_interactions_handler).post(create_interaction_handler),
        )
        .route(
            "/interactions/:id",
            get(get_interaction_handler)
                .put(update_interaction_handler)
                .delete(delete_interaction_handler),
        )
}

async fn list_interactions_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<InteractionListQuery>,
) -> Result<Json<Vec<Interaction>>, CrmError> {
    let service = InteractionsService::new(state.conn.clone());
    Ok(Json(service.list(user, query).await?))
}

async fn create_interaction_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateInteractionRequest>,
) -> Result<(StatusCode, Json<Interaction>), CrmError> {
    let service = InteractionsService::new(state.conn.clone());
    let interaction = service.create(user, req).await?;
    Ok((StatusCode::CREATED, Json(interaction)))
}

async fn get_interaction_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Interaction>, CrmError> {
    let service = InteractionsService::new(state.conn.clone());
    Ok(Json(service.get(user, id).await?))
}

async fn update_interaction_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateInteractionRequest>,
) -> Result<Json<Interaction>, CrmError> {
    let service = InteractionsService::new(state.conn.clone());
    Ok(Json(service.update(user, id, req).await?))
}

async fn delete_interaction_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, CrmError> {
    let service = InteractionsService::new(state.conn.clone());
    service.delete(user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
