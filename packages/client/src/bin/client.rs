//! Terminal chat client for the deai matchmaking server.
//!
//! Connects, starts looking for a stranger right away, and sends each typed
//! line as a chat message. `/next` finds someone new, `/leave` ends the chat,
//! `/quit` exits. Reconnects on connection loss (max 5 attempts with 5 second
//! interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin deai-client
//! cargo run --bin deai-client -- --url ws://example.com:3000/ws
//! ```

use clap::Parser;

use deai_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "deai-client")]
#[command(about = "Terminal client for anonymous one-to-one chat", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:3000/ws")]
    url: String,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(
        &[env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME")],
        &args.log_level,
    );

    if let Err(e) = deai_client::run_client(args.url).await {
        tracing::error!("Client error: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
