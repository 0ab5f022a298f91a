use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use uuid::Uuid;

/// The acting user, passed explicitly into every store operation.
///
/// Session handling is out of scope; the identity arrives as an `x-user-id`
/// header set by whatever fronts this service.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .ok_or((StatusCode::UNAUTHORIZED, "missing x-user-id header".to_string()))?;

        let id = Uuid::parse_str(raw)
            .map_err(|_| (StatusCode::UNAUTHORIZED, "invalid x-user-id header".to_string()))?;

        Ok(CurrentUser(id))
    }
}
