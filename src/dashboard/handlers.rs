use super::service::DashboardService;
use super::types::DashboardResponse;
use crate::shared::error::CrmError;
use crate::shared::identity::CurrentUser;
use crate::shared::state::AppState;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard", get(dashboard_handler))
}

async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<DashboardResponse>, CrmError> {
    let service = DashboardService::new(state.conn.clone());
    Ok(Json(service.summary(user).await?))
}
