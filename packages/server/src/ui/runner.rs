//! Server assembly and lifecycle.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    delivery::MessageDispatcher,
    domain::UserId,
    infrastructure::{
        repository::InMemoryConversationRepository, user_directory::InMemoryUserDirectory,
    },
    presence::ConnectionRegistry,
    ui::{handler, state::AppState},
};

/// Server configuration, typically parsed from the command line.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Identifiers treated as registered users, standing in for the external
    /// user directory until the real service is wired in
    pub seed_users: Vec<String>,
}

/// Build the axum router over the given state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handler::health_check))
        .route("/api/chats", get(handler::inbox))
        .route("/api/chats/{id}", get(handler::history))
        .route("/api/chats/send/{id}", post(handler::send_message))
        .route("/ws", get(handler::websocket_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wire the application state, bind, and serve until ctrl-c.
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let registry = Arc::new(ConnectionRegistry::new());
    let dispatcher = Arc::new(MessageDispatcher::new(registry.clone()));

    let users = Arc::new(InMemoryUserDirectory::new());
    for id in &config.seed_users {
        match UserId::new(id.clone()) {
            Ok(user_id) => users.register(user_id).await,
            Err(e) => tracing::warn!("skipping invalid seed user '{}': {}", id, e),
        }
    }

    let state = Arc::new(AppState {
        repository: Arc::new(InMemoryConversationRepository::new()),
        users,
        registry,
        dispatcher,
    });

    let app = build_router(state);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install ctrl-c handler: {}", e);
    }
}
