pub mod auth;
pub mod ownership;
pub mod response;

pub use auth::{authenticate, SIGN_IN_PATH};
pub use ownership::require_owner;
pub use response::{ApiFailure, ApiResponse, ApiResult, Negotiate};
