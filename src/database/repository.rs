use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::Entity;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("record not found")]
    NotFound,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// CRUD over a single entity type backed by a store.
///
/// Absence of a row is the only condition reported distinctly; everything else
/// surfaces as `RepoError::Database`.
#[async_trait]
pub trait Repo<T: Entity>: Send + Sync {
    async fn get_all(&self) -> Result<Vec<T>, RepoError>;

    /// Insert and return the row with its store-assigned id
    async fn create(&self, entity: T) -> Result<T, RepoError>;

    async fn get_by_id(&self, id: i32) -> Result<T, RepoError>;

    /// Overwrite the row identified by `entity.id()`
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Existence is checked first so a missing id is `NotFound`
    async fn delete_by_id(&self, id: i32) -> Result<(), RepoError>;
}
