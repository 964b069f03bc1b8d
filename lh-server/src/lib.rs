pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

pub use api::ApiState;
pub use api::error::{ApiError, Result as ApiResult};
pub use error::{Result as ServerErrorResult, ServerError};
pub use routes::build_router;
