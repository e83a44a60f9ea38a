use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::Entity;
use crate::auth::AuthUser;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow, Validate)]
#[serde(default, rename = "post")]
pub struct Post {
    pub id: i32,
    #[validate(length(min = 1, message = "cannot be blank"))]
    pub title: String,
    #[validate(length(min = 1, message = "cannot be blank"))]
    pub body: String,
    #[serde(rename = "userId")]
    #[validate(length(min = 1, message = "cannot be blank"))]
    pub user_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl Entity for Post {
    type Patch = PostPatch;

    const COLLECTION: &'static str = "posts";

    fn id(&self) -> i32 {
        self.id
    }

    fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(body) = patch.body {
            self.body = body;
        }
    }

    fn assign_owner(&mut self, user: &AuthUser) {
        self.user_id = user.id.clone();
    }

    fn is_owned_by(&self, user: &AuthUser) -> bool {
        self.user_id == user.id
    }
}
