pub mod comment;
pub mod post;

pub use comment::{Comment, CommentPatch};
pub use post::{Post, PostPatch};

use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use validator::Validate;

use crate::auth::AuthUser;
use crate::validation::FieldErrors;

/// A persisted resource owned by the caller that created it.
///
/// The owner field is assigned once from the authenticated identity and is
/// never part of `Patch`, so updates cannot move ownership.
pub trait Entity:
    Clone + Debug + PartialEq + Serialize + DeserializeOwned + Validate + Send + Sync + Unpin + 'static
{
    /// Fields a PATCH may overlay onto the stored record
    type Patch: DeserializeOwned + Debug + Send + 'static;

    /// Collection segment under `/api`, also the table name
    const COLLECTION: &'static str;

    fn id(&self) -> i32;

    /// Overlay the supplied mutable fields
    fn apply(&mut self, patch: Self::Patch);

    fn assign_owner(&mut self, user: &AuthUser);

    fn is_owned_by(&self, user: &AuthUser) -> bool;

    fn check(&self) -> Result<(), FieldErrors> {
        self.validate().map_err(FieldErrors::from)
    }
}
