//! Tsunagu messaging server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tsunagu-server -- --port 8080 --seed-user u1 --seed-user u2
//! ```

use clap::Parser;
use tsunagu_server::{ServerConfig, run_server};
use tsunagu_shared::logger::setup_logger;

#[derive(Debug, Parser)]
#[command(name = "tsunagu-server", about = "Real-time direct-messaging server")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Known user ids, standing in for the external user directory
    /// (repeatable)
    #[arg(long = "seed-user")]
    seed_users: Vec<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();
    let config = ServerConfig {
        host: args.host,
        port: args.port,
        seed_users: args.seed_users,
    };

    // Run the server
    if let Err(e) = run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
