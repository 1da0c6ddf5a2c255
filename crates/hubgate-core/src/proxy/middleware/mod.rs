// Middleware module - Axum middleware

pub mod user_agent;

pub use user_agent::{user_agent_filter, UserAgentBlocklist};
