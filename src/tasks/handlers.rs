use super::service::TasksService;
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
        .route("/tasks", get(list_tasks_handler).post(create_task_handler))
        .route(
            "/tasks/:id",
            get(get_task_handler)
                .put(update_task_handler)
                .delete(delete_task_handler),
        )
}

async fn list_tasks_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<Vec<Task>>, CrmError> {
    let service = TasksService::new(state.conn.clone());
    Ok(Json(service.list(user, query).await?))
}

async fn create_task_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), CrmError> {
    let service = TasksService::new(state.conn.clone());
    let task = service.create(user, req).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

async fn get_task_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, CrmError> {
    let service = TasksService::new(state.conn.clone());
    Ok(Json(service.get(user, id).await?))
}

async fn update_task_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, CrmError> {
    let service = TasksService::new(state.conn.clone());
    Ok(Json(service.update(user, id, req).await?))
}

async fn delete_task_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, CrmError> {
    let service = TasksService::new(state.conn.clone());
    service.delete(user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
