//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;

use crate::application::services::MessageService;
use crate::config::Settings;
use crate::domain::MessageRepository;
use crate::infrastructure::database;
use crate::presentation::http::routes;
use crate::presentation::middleware::{cors, logging};
use crate::presentation::websocket::Relay;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub messages: MessageService,
    pub relay: Arc<Relay>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire the shared store handle into the REST service and the relay
    pub fn new(store: Arc<dyn MessageRepository>, settings: Settings) -> Self {
        let messages = MessageService::new(store);
        let relay = Arc::new(Relay::new(messages.clone()));

        Self {
            messages,
            relay,
            settings: Arc::new(settings),
        }
    }
}

/// Build the full router, middleware included
pub fn build_router(state: AppState) -> Router {
    let cors_layer = cors::create_cors_layer(&state.settings.cors);

    routes::create_router(state)
        .layer(logging::create_trace_layer())
        .layer(cors_layer)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings, connecting the configured store.
    ///
    /// An unreachable store is an error; there is no retry.
    pub async fn build(settings: Settings) -> Result<Self> {
        let store = database::connect_store(&settings.database)
            .await
            .context("Failed to connect to the message store")?;

        Self::build_with_store(settings, store).await
    }

    /// Build the application around an already connected store
    pub async fn build_with_store(
        settings: Settings,
        store: Arc<dyn MessageRepository>,
    ) -> Result<Self> {
        let addr = settings.server_addr();
        let router = build_router(AppState::new(store, settings));

        // Bind to address
        let listener = TcpListener::bind(addr.as_str())
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
