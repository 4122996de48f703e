//! Gateway HTTP server lifecycle.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::infrastructure::config::ServerSettings;

use super::{AppState, create_router};

/// Gateway HTTP server.
pub struct GatewayServer {
    settings: ServerSettings,
    state: AppState,
    cancel: CancellationToken,
}

impl GatewayServer {
    /// Create a new server.
    #[must_use]
    pub const fn new(settings: ServerSettings, state: AppState, cancel: CancellationToken) -> Self {
        Self {
            settings,
            state,
            cancel,
        }
    }

    /// Run the server until cancelled.
    ///
    /// # Errors
    ///
    /// Returns `ServerError` if binding fails or the HTTP server
    /// encounters a fatal error while running.
    pub async fn run(self) -> Result<(), ServerError> {
        let app = create_router(self.state, &self.settings);

        let port = self.settings.port;
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindFailed(port, e.to_string()))?;

        tracing::info!(
            port,
            static_dir = %self.settings.static_dir.display(),
            "Gateway listening"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(self.cancel.cancelled_owned())
            .await
            .map_err(|e| ServerError::ServerFailed(e.to_string()))?;

        tracing::info!("Gateway server stopped");
        Ok(())
    }
}

/// Gateway server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to port.
    #[error("failed to bind to port {0}: {1}")]
    BindFailed(u16, String),

    /// Server error.
    #[error("server error: {0}")]
    ServerFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_error_message() {
        let err = ServerError::BindFailed(5000, "address in use".to_string());
        assert_eq!(
            err.to_string(),
            "failed to bind to port 5000: address in use"
        );
    }
}
