pub mod crud_service;

pub use crud_service::CrudService;

use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::Entity;
use crate::database::repository::RepoError;
use crate::validation::FieldErrors;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("record not found")]
    NotFound,

    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<RepoError> for ServiceError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => ServiceError::NotFound,
            RepoError::Database(e) => ServiceError::Database(e),
        }
    }
}

/// Business operations over one resource type
#[async_trait]
pub trait Service<T: Entity>: Send + Sync {
    async fn get_all(&self) -> Result<Vec<T>, ServiceError>;

    /// Validate, then persist. Invalid input never reaches the store.
    async fn create(&self, entity: T) -> Result<T, ServiceError>;

    async fn get_by_id(&self, id: i32) -> Result<T, ServiceError>;

    /// Load the stored record, overlay the patch, re-validate and persist
    async fn update(&self, id: i32, patch: T::Patch) -> Result<T, ServiceError>;

    async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError>;
}
