use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::models::Post;
use crate::database::repository::{Repo, RepoError};

pub struct PgPostRepo {
    pool: PgPool,
}

impl PgPostRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repo<Post> for PgPostRepo {
    async fn get_all(&self) -> Result<Vec<Post>, RepoError> {
        let posts = sqlx::query_as::<_, Post>("SELECT id, title, body, user_id FROM posts ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    async fn create(&self, post: Post) -> Result<Post, RepoError> {
        let created = sqlx::query_as::<_, Post>(
            "INSERT INTO posts (title, body, user_id)
             VALUES ($1, $2, $3)
             RETURNING id, title, body, user_id",
        )
        .bind(&post.title)
        .bind(&post.body)
        .bind(&post.user_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created post {} for user {}", created.id, created.user_id);
        Ok(created)
    }

    async fn get_by_id(&self, id: i32) -> Result<Post, RepoError> {
        sqlx::query_as::<_, Post>("SELECT id, title, body, user_id FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepoError::NotFound)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        sqlx::query_as::<_, Post>(
            "UPDATE posts SET title = $2, body = $3, user_id = $4
             WHERE id = $1
             RETURNING id, title, body, user_id",
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.body)
        .bind(&post.user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepoError::NotFound)
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), RepoError> {
        self.get_by_id(id).await?;

        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Deleted post {}", id);
        Ok(())
    }
}
