//! Quiz lobby server.
//!
//! Serves the lobby HTTP API and the `/ws` event channel.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 3000 --catalog packages/server/catalog.sample.json
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use hiroba_server::{
    infrastructure::{
        catalog::{CatalogSeed, InMemoryQuizCatalog},
        message_pusher::WebSocketMessagePusher,
        repository::InMemoryLobbyRepository,
    },
    ui::{AppState, Server},
};
use hiroba_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "Real-time quiz lobby server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// JSON file with the quizzes and users known to the server
    #[arg(short = 'c', long)]
    catalog: Option<PathBuf>,

    /// Default log level (overridden by RUST_LOG)
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,
}

async fn load_catalog(path: Option<PathBuf>) -> Result<InMemoryQuizCatalog, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        tracing::warn!("No --catalog given, every quiz lookup will fail with NotFound");
        return Ok(InMemoryQuizCatalog::new());
    };

    let seed = CatalogSeed::from_file(&path).await?;
    tracing::info!(
        "Loaded {} quizzes and {} users from {}",
        seed.quizzes.len(),
        seed.users.len(),
        path.display()
    );
    Ok(InMemoryQuizCatalog::from_seed(seed)?)
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(
        &[env!("CARGO_BIN_NAME"), "hiroba_server", "tower_http"],
        &args.log_level,
    );

    // Initialize dependencies in order:
    // 1. Catalog (persistence collaborator)
    // 2. Repository
    // 3. MessagePusher
    // 4. AppState (UseCases)
    // 5. Server
    let catalog = match load_catalog(args.catalog).await {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            tracing::error!("Failed to load catalog: {}", e);
            std::process::exit(1);
        }
    };
    let repository = Arc::new(InMemoryLobbyRepository::new());
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    let state = AppState::new(repository, catalog, message_pusher, Arc::new(SystemClock));

    if let Err(e) = Server::new(state).run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
