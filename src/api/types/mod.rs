//! Request and response types shared by the handlers

pub mod error;
pub mod json;
pub mod query;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
pub use query::Query;
