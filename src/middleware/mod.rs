pub mod auth;
pub mod response;
pub mod validate;

pub use auth::{auth_gate_middleware, AuthGate, AuthUser};
pub use response::{ApiResponse, ApiResult};
pub use validate::ValidatedJson;
