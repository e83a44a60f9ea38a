use async_trait::async_trait;
use std::sync::Arc;

use super::{Service, ServiceError};
use crate::database::models::Entity;
use crate::database::repository::Repo;

/// `Service` implementation shared by every resource; entity-specific rules
/// live on the `Entity` impl.
pub struct CrudService<T: Entity> {
    repo: Arc<dyn Repo<T>>,
}

impl<T: Entity> CrudService<T> {
    pub fn new(repo: Arc<dyn Repo<T>>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<T: Entity> Service<T> for CrudService<T> {
    async fn get_all(&self) -> Result<Vec<T>, ServiceError> {
        Ok(self.repo.get_all().await?)
    }

    async fn create(&self, entity: T) -> Result<T, ServiceError> {
        entity.check().map_err(ServiceError::Validation)?;

        Ok(self.repo.create(entity).await?)
    }

    async fn get_by_id(&self, id: i32) -> Result<T, ServiceError> {
        Ok(self.repo.get_by_id(id).await?)
    }

    async fn update(&self, id: i32, patch: T::Patch) -> Result<T, ServiceError> {
        let mut current = self.repo.get_by_id(id).await?;

        current.apply(patch);
        current.check().map_err(ServiceError::Validation)?;

        Ok(self.repo.update(current).await?)
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError> {
        Ok(self.repo.delete_by_id(id).await?)
    }
}
