// Upstream module - outbound requests, redirect following and token relay

pub mod client;
pub mod redirect;
pub mod token_relay;

pub use client::UpstreamClient;
pub use redirect::{RedirectResolver, Resolved};
pub use token_relay::relay_token;
