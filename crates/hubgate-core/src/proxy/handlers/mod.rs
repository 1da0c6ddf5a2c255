// Handlers module - inbound request entry points

pub mod landing;
pub mod registry;
pub mod search;

pub use registry::handle_registry_request;
