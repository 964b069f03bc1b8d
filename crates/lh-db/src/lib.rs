pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::{connect, connect_in_memory};
pub use error::{DbError, Result};
pub use repositories::log_repository::LogRepository;
pub use repositories::user_repository::UserRepository;
