use std::fmt;

use crate::config::Config;

pub mod api;
pub mod page;
pub mod routes;

pub use routes::app;

#[derive(Debug)]
pub enum ServerError {
    Runtime(std::io::Error),
    Bind {
        addr: String,
        source: std::io::Error,
    },
    Serve(std::io::Error),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Runtime(e) => write!(f, "failed to start runtime: {e}"),
            Self::Bind { addr, source } => write!(f, "failed to bind {addr}: {source}"),
            Self::Serve(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Runtime(e) | Self::Serve(e) => Some(e),
            Self::Bind { source, .. } => Some(source),
        }
    }
}

/// Block the current thread serving the API on `config.bind_addr`.
pub fn run_server(config: &Config) -> Result<(), ServerError> {
    let runtime = tokio::runtime::Runtime::new().map_err(ServerError::Runtime)?;
    runtime.block_on(serve(&config.bind_addr))
}

pub async fn serve(bind_addr: &str) -> Result<(), ServerError> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: bind_addr.to_string(),
            source,
        })?;
    tracing::info!("impactor server listening on http://{bind_addr}");

    axum::serve(listener, app())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
