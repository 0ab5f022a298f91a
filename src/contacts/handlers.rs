use super::service::ContactsService;
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
        .route("/contacts", get(list_contacts_handler).post(create_contact_handler))
        .route(
            "/contacts/:id",
            get(get_contact_handler)
                .put(update_contact_handler)
                .delete(delete_contact_handler),
        )
}

async fn list_contacts_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<ContactListQuery>,
) -> Result<Json<Vec<Contact>>, CrmError> {
    let service = ContactsService::new(state.conn.clone());
    Ok(Json(service.list(user, query).await?))
}

async fn create_contact_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateContactRequest>,
) -> Result<(StatusCode, Json<Contact>), CrmError> {
    let service = ContactsService::new(state.conn.clone());
    let contact = service.create(user, req).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

async fn get_contact_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Contact>, CrmError> {
    let service = ContactsService::new(state.conn.clone());
    Ok(Json(service.get(user, id).await?))
}

async fn update_contact_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateContactRequest>,
) -> Result<Json<Contact>, CrmError> {
    let service = ContactsService::new(state.conn.clone());
    Ok(Json(service.update(user, id, req).await?))
}

async fn delete_contact_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, CrmError> {
    let service = ContactsService::new(state.conn.clone());
    service.delete(user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
