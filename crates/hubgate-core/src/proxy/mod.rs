// Proxy module - registry gateway request pipeline

pub mod common;
pub mod context;
pub mod handlers;
pub mod middleware;
pub mod path;
pub mod routing;
pub mod server;
pub mod upstream;

pub use context::RequestContext;
pub use routing::resolve_route;
pub use server::{build_gateway_router, AppState};
