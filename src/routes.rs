use axum::{
    middleware::from_fn_with_state,
    response::Json,
    routing::{get, patch, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;

use crate::auth::IdentityProvider;
use crate::database::models::Entity;
use crate::database::StoreHealth;
use crate::handlers::{health, oauth, resource};
use crate::middleware::{authenticate, require_owner};
use crate::services::Service;
use crate::state::{AppState, AuthRoutesState, ResourceState};

/// Application router without transport-level layers (CORS, tracing)
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(health_routes(state.health.clone()))
        .merge(auth_routes(&state))
        .merge(resource_routes(state.posts.clone(), state.identity.clone()))
        .merge(resource_routes(state.comments.clone(), state.identity.clone()))
}

fn health_routes(store: Arc<dyn StoreHealth>) -> Router {
    Router::new().route("/health", get(health::health)).with_state(store)
}

fn auth_routes(state: &AppState) -> Router {
    Router::new()
        .route("/auth/google/sign-in", get(oauth::sign_in))
        .route("/auth/google/callback", get(oauth::callback))
        .with_state(AuthRoutesState {
            identity: state.identity.clone(),
            oauth_state: state.oauth_state.clone(),
        })
}

/// Five routes per resource. Interceptors run in the order listed in each
/// `ServiceBuilder`, and any of them may answer before the handler runs.
fn resource_routes<T: Entity>(service: Arc<dyn Service<T>>, identity: Arc<dyn IdentityProvider>) -> Router {
    let state = ResourceState::new(service);
    let collection = format!("/api/{}", T::COLLECTION);
    let item = format!("/api/{}/:id", T::COLLECTION);

    let public = Router::new()
        .route(&collection, get(resource::list::<T>))
        .route(&item, get(resource::detail::<T>));

    let authenticated = Router::new()
        .route(&collection, post(resource::create::<T>))
        .route_layer(ServiceBuilder::new().layer(from_fn_with_state(identity.clone(), authenticate)));

    let owner_only = Router::new()
        .route(&item, patch(resource::update::<T>).delete(resource::delete::<T>))
        .route_layer(
            ServiceBuilder::new()
                .layer(from_fn_with_state(identity, authenticate))
                .layer(from_fn_with_state(state.clone(), require_owner::<T>)),
        );

    public.merge(authenticated).merge(owner_only).with_state(state)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Postboard API",
        "version": version,
        "endpoints": {
            "posts": "/api/posts[/:id] (GET public, POST authenticated, PATCH/DELETE owner only)",
            "comments": "/api/comments[/:id] (GET public, POST authenticated, PATCH/DELETE owner only)",
            "auth": "/auth/google/sign-in, /auth/google/callback",
            "health": "/health",
        }
    }))
}
