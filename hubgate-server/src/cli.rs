use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "hubgate",
    about = "hubgate - container registry gateway",
    version = env!("CARGO_PKG_VERSION"),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, env = "HUBGATE_CONFIG", global = true, help = "Path to a JSON config file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

/// Settings that take precedence over the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigOverrides {
    #[arg(short, long, env = "PORT", global = true)]
    pub port: Option<u16>,

    #[arg(long, env = "BIND_ADDRESS", global = true)]
    pub bind_address: Option<String>,

    #[arg(
        long = "block-ua",
        env = "UA",
        value_delimiter = ',',
        global = true,
        help = "User-agent substrings to refuse (comma separated)"
    )]
    pub blocked_user_agents: Option<Vec<String>>,

    #[arg(long, env = "URL302", global = true, help = "Redirect browsers opening / to this URL")]
    pub redirect_url: Option<String>,

    #[arg(long, env = "URL", global = true, help = "Relay this page to browsers opening /")]
    pub proxy_url: Option<String>,

    #[arg(long, env = "LENGTH_CHECK", global = true, help = "off, blobs or all")]
    pub length_check: Option<String>,

    #[arg(long, env = "MAX_REDIRECTS", global = true)]
    pub max_redirects: Option<usize>,

    #[arg(
        long,
        env = "MAX_BODY_BYTES",
        global = true,
        help = "Cap on buffered request bodies, 0 for none"
    )]
    pub max_body_bytes: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Start the gateway (default if no command specified)")]
    Serve,

    #[command(about = "Print the effective configuration")]
    Config {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },
}
