// Common module - shared helpers for the request pipeline

pub mod client_builder;
pub mod error_response;
pub mod header_constants;
pub mod sanitize;

pub use error_response::error_response;
pub use sanitize::{stream_response, ResponseSanitizer};
