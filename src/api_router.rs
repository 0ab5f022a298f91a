//! Combines the routes of all feature modules into one API router.

use axum::Router;
use std::sync::Arc;

use crate::shared::state::AppState;

pub fn configure_api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(crate::companies::routes())
        .merge(crate::contacts::routes())
        .merge(crate::interactions::routes())
        .merge(crate::tasks::routes())
        .merge(crate::opportunities::routes())
        .merge(crate::dashboard::routes())
        .merge(crate::erp::routes())
}
