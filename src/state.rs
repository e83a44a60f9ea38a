use std::sync::Arc;

use crate::auth::IdentityProvider;
use crate::database::models::{Comment, Entity, Post};
use crate::database::StoreHealth;
use crate::services::Service;

/// Everything the router needs, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn Service<Post>>,
    pub comments: Arc<dyn Service<Comment>>,
    pub identity: Arc<dyn IdentityProvider>,
    pub health: Arc<dyn StoreHealth>,
    /// State value passed to the provider consent screen
    pub oauth_state: String,
}

/// Per-resource router state
pub struct ResourceState<T: Entity> {
    pub service: Arc<dyn Service<T>>,
}

impl<T: Entity> ResourceState<T> {
    pub fn new(service: Arc<dyn Service<T>>) -> Self {
        Self { service }
    }
}

impl<T: Entity> Clone for ResourceState<T> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

#[derive(Clone)]
pub struct AuthRoutesState {
    pub identity: Arc<dyn IdentityProvider>,
    pub oauth_state: String,
}
