pub mod auth;
pub mod authorize;
pub mod response;

pub use auth::{authenticate, Identity};
pub use authorize::{require_role, RoleSet};
pub use response::{ApiResponse, ApiResult};
