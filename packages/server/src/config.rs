//! Command line / environment configuration for the server binary.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "deai-server")]
#[command(about = "Anonymous 1:1 matchmaking and signaling relay server", long_about = None)]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "DEAI_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Directory with the built web front-end; unknown paths fall back to its index.html
    #[arg(long, env = "DEAI_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Origins allowed by CORS (comma separated, `*` for any)
    #[arg(
        long,
        env = "DEAI_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,

    /// Expose GET /debug/lobby
    #[arg(long, env = "DEAI_DEBUG_ENDPOINTS")]
    pub debug_endpoints: bool,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "DEAI_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}
