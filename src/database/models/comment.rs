use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::Entity;
use crate::auth::AuthUser;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow, Validate)]
#[serde(default, rename = "comment")]
pub struct Comment {
    pub id: i32,
    #[validate(length(min = 1, message = "cannot be blank"))]
    pub name: String,
    #[validate(
        length(min = 1, message = "cannot be blank"),
        email(message = "must be a valid email address")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "cannot be blank"))]
    pub body: String,
    #[serde(rename = "postId")]
    #[validate(range(min = 1, message = "cannot be blank"))]
    pub post_id: i32,
}

/// Email and post reference stay as created; only name and body are editable
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentPatch {
    pub name: Option<String>,
    pub body: Option<String>,
}

impl Entity for Comment {
    type Patch = CommentPatch;

    const COLLECTION: &'static str = "comments";

    fn id(&self) -> i32 {
        self.id
    }

    fn apply(&mut self, patch: CommentPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(body) = patch.body {
            self.body = body;
        }
    }

    fn assign_owner(&mut self, user: &AuthUser) {
        self.email = user.email.clone();
    }

    fn is_owned_by(&self, user: &AuthUser) -> bool {
        self.email == user.email
    }
}
