use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::models::Comment;
use crate::database::repository::{Repo, RepoError};

pub struct PgCommentRepo {
    pool: PgPool,
}

impl PgCommentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repo<Comment> for PgCommentRepo {
    async fn get_all(&self) -> Result<Vec<Comment>, RepoError> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT id, name, email, body, post_id FROM comments ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn create(&self, comment: Comment) -> Result<Comment, RepoError> {
        // post_id is stored as given; the referenced post is not checked
        let created = sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (name, email, body, post_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, email, body, post_id",
        )
        .bind(&comment.name)
        .bind(&comment.email)
        .bind(&comment.body)
        .bind(comment.post_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created comment {} on post {}", created.id, created.post_id);
        Ok(created)
    }

    async fn get_by_id(&self, id: i32) -> Result<Comment, RepoError> {
        sqlx::query_as::<_, Comment>(
            "SELECT id, name, email, body, post_id FROM comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepoError::NotFound)
    }

    async fn update(&self, comment: Comment) -> Result<Comment, RepoError> {
        sqlx::query_as::<_, Comment>(
            "UPDATE comments SET name = $2, email = $3, body = $4, post_id = $5
             WHERE id = $1
             RETURNING id, name, email, body, post_id",
        )
        .bind(comment.id)
        .bind(&comment.name)
        .bind(&comment.email)
        .bind(&comment.body)
        .bind(comment.post_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepoError::NotFound)
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), RepoError> {
        self.get_by_id(id).await?;

        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Deleted comment {}", id);
        Ok(())
    }
}
