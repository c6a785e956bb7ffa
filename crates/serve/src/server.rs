//! Server module for StackQuery serve crate

use crate::api::create_routes;
use crate::handlers::AppState;
use crate::middleware::{
    error_handling_middleware, request_id_middleware, security_headers_middleware,
    timing_middleware,
};
use crate::ServerConfig;
use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        Method,
    },
    middleware::from_fn,
    Router,
};
use stackquery_core::{Result, StackQueryError};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use url::Url;

/// StackQuery HTTP server
pub struct StackQueryServer {
    config: ServerConfig,
    app: Router,
}

impl StackQueryServer {
    /// Create a new server instance backed by PostgreSQL
    pub async fn new(config: ServerConfig) -> Result<Self> {
        let state = AppState::new(config.clone()).await.map_err(|e| {
            StackQueryError::Generic(anyhow::anyhow!("Failed to connect to database: {}", e))
        })?;

        Ok(Self::with_state(config, state))
    }

    /// Create a server over prepared application state
    pub fn with_state(config: ServerConfig, state: AppState) -> Self {
        let app = create_app(state, &config);
        Self { config, app }
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let socket_addr: SocketAddr = addr
            .parse()
            .map_err(|e| StackQueryError::validation(format!("Invalid address {}: {}", addr, e)))?;

        tracing::info!("Starting StackQuery server on {}", addr);

        let listener = tokio::net::TcpListener::bind(socket_addr)
            .await
            .map_err(|e| StackQueryError::network(format!("Failed to bind to {}: {}", addr, e)))?;

        axum::serve(listener, self.app)
            .await
            .map_err(|e| StackQueryError::network(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The assembled router, for driving the server in-process
    pub fn router(&self) -> Router {
        self.app.clone()
    }
}

/// Create the Axum application with middleware
pub fn create_app(state: AppState, config: &ServerConfig) -> Router {
    let mut app = create_routes().with_state(state);

    // Add middleware layers
    app = app.layer(
        ServiceBuilder::new()
            .layer(from_fn(request_id_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(from_fn(timing_middleware))
            .layer(from_fn(error_handling_middleware))
            .layer(from_fn(security_headers_middleware))
            .layer(RequestBodyLimitLayer::new(config.max_request_size)),
    );

    // Add CORS if enabled
    if config.cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([ACCEPT, CONTENT_TYPE]);

        app = app.layer(cors);
    }

    app
}

/// Server builder for configuration
pub struct ServerBuilder {
    config: ServerConfig,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Set the host address
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the database URL
    pub fn database_url<S: Into<String>>(mut self, url: S) -> Self {
        self.config.database_url = url.into();
        self
    }

    /// Set the externally visible base URL for navigation links
    pub fn public_base_url(mut self, url: Url) -> Self {
        self.config.public_base_url = Some(url);
        self
    }

    /// Enable or disable CORS
    pub fn cors(mut self, enabled: bool) -> Self {
        self.config.cors_enabled = enabled;
        self
    }

    /// Set maximum request size
    pub fn max_request_size(mut self, size: usize) -> Self {
        self.config.max_request_size = size;
        self
    }

    /// Set the page size ceiling
    pub fn max_page_size(mut self, size: u32) -> Self {
        self.config.max_page_size = size;
        self
    }

    /// Build the server, connecting to the database
    pub async fn build(self) -> Result<StackQueryServer> {
        StackQueryServer::new(self.config).await
    }

    /// Build the server over prepared application state
    pub fn build_with_state(self, state: AppState) -> StackQueryServer {
        StackQueryServer::with_state(self.config, state)
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
