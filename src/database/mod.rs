pub mod comment_repo;
pub mod manager;
pub mod models;
pub mod post_repo;
pub mod repository;

pub use comment_repo::PgCommentRepo;
pub use manager::{DatabaseError, DatabaseManager, StoreHealth};
pub use post_repo::PgPostRepo;
pub use repository::{Repo, RepoError};
