use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::format::ResponseFormat;
use crate::auth::AuthUser;
use crate::database::models::Entity;
use crate::error::ApiError;
use crate::services::ServiceError;
use crate::state::ResourceState;

/// Ownership gate; must run after `authenticate`.
///
/// Loads the addressed resource and lets the request through only when its
/// owner field matches the authenticated identity.
pub async fn require_owner<T: Entity>(
    State(state): State<ResourceState<T>>,
    Path(raw_id): Path<String>,
    request: Request,
    next: Next,
) -> Response {
    let Some(user) = request.extensions().get::<AuthUser>().cloned() else {
        tracing::error!("Ownership check reached without an authenticated identity");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    let Ok(id) = raw_id.parse::<i32>() else {
        let format = ResponseFormat::from_headers(request.headers());
        return ApiError::bad_request(format!("Invalid id '{}'", raw_id)).render(format);
    };

    let resource = match state.service.get_by_id(id).await {
        Ok(resource) => resource,
        Err(ServiceError::NotFound) => return StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            tracing::error!("Failed to load {} {} for ownership check: {}", T::COLLECTION, id, e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    if !resource.is_owned_by(&user) {
        tracing::warn!("User {} denied access to {} {}", user.id, T::COLLECTION, id);
        return StatusCode::FORBIDDEN.into_response();
    }

    next.run(request).await
}
