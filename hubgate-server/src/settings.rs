//! Effective configuration: defaults, then the optional JSON file, then
//! command-line flags and environment variables.

use hubgate_types::{ConfigError, GatewayConfig, LengthCheckPolicy};
use std::path::Path;

use crate::cli::ConfigOverrides;

pub fn load_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<GatewayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => GatewayConfig::default(),
    };
    apply_overrides(&mut config, overrides);
    config.check()?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let display = path.display().to_string();
    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::from_io_error(&display, &e))?;
    GatewayConfig::from_json(&content)
}

fn apply_overrides(config: &mut GatewayConfig, overrides: &ConfigOverrides) {
    if let Some(port) = overrides.port {
        config.port = port;
    }
    if let Some(bind_address) = &overrides.bind_address {
        config.bind_address.clone_from(bind_address);
    }
    if let Some(agents) = &overrides.blocked_user_agents {
        config.blocked_user_agents =
            agents.iter().map(|a| a.trim().to_string()).filter(|a| !a.is_empty()).collect();
    }
    if let Some(url) = non_empty(overrides.redirect_url.as_deref()) {
        config.landing.redirect_url = Some(url.to_string());
    }
    if let Some(url) = non_empty(overrides.proxy_url.as_deref()) {
        config.landing.proxy_url = Some(url.to_string());
    }
    if let Some(policy) = &overrides.length_check {
        config.length_check = LengthCheckPolicy::from_string(policy);
    }
    if let Some(max_redirects) = overrides.max_redirects {
        config.max_redirects = max_redirects;
    }
    if let Some(max_body_bytes) = overrides.max_body_bytes {
        config.max_body_bytes = max_body_bytes;
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
