// handlers/resource.rs - CRUD handlers shared by /api/posts and /api/comments

use axum::extract::{Extension, Path, State};

use crate::api::format::{Payload, ResponseFormat};
use crate::auth::AuthUser;
use crate::database::models::Entity;
use crate::error::ApiError;
use crate::middleware::{ApiFailure, ApiResponse, ApiResult, Negotiate};
use crate::state::ResourceState;

fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .map_err(|_| ApiError::bad_request(format!("Invalid id '{}'", raw)))
}

/// GET /api/{collection}
pub async fn list<T: Entity>(State(state): State<ResourceState<T>>, format: ResponseFormat) -> ApiResult {
    let items = state.service.get_all().await.negotiated(format)?;
    Ok(ApiResponse::list(format, T::COLLECTION, &items))
}

/// POST /api/{collection} - owner is taken from the authenticated identity
pub async fn create<T: Entity>(
    State(state): State<ResourceState<T>>,
    format: ResponseFormat,
    user: Option<Extension<AuthUser>>,
    Payload(mut entity): Payload<T>,
) -> ApiResult {
    let Some(Extension(user)) = user else {
        tracing::error!("Create on {} reached without an authenticated identity", T::COLLECTION);
        return Err(ApiFailure::new(
            format,
            ApiError::internal_server_error("Missing authenticated identity"),
        ));
    };

    entity.assign_owner(&user);
    let created = state.service.create(entity).await.negotiated(format)?;

    tracing::info!("User {} created {} {}", user.id, T::COLLECTION, created.id());
    Ok(ApiResponse::created(format, &created))
}

/// GET /api/{collection}/:id
pub async fn detail<T: Entity>(
    State(state): State<ResourceState<T>>,
    format: ResponseFormat,
    Path(raw_id): Path<String>,
) -> ApiResult {
    let id = parse_id(&raw_id).negotiated(format)?;
    let item = state.service.get_by_id(id).await.negotiated(format)?;
    Ok(ApiResponse::success(format, &item))
}

/// PATCH /api/{collection}/:id
pub async fn update<T: Entity>(
    State(state): State<ResourceState<T>>,
    format: ResponseFormat,
    Path(raw_id): Path<String>,
    Payload(patch): Payload<T::Patch>,
) -> ApiResult {
    let id = parse_id(&raw_id).negotiated(format)?;
    let updated = state.service.update(id, patch).await.negotiated(format)?;
    Ok(ApiResponse::success(format, &updated))
}

/// DELETE /api/{collection}/:id
pub async fn delete<T: Entity>(
    State(state): State<ResourceState<T>>,
    format: ResponseFormat,
    Path(raw_id): Path<String>,
) -> ApiResult {
    let id = parse_id(&raw_id).negotiated(format)?;
    state.service.delete_by_id(id).await.negotiated(format)?;

    tracing::info!("Deleted {} {}", T::COLLECTION, id);
    Ok(ApiResponse::no_content())
}
