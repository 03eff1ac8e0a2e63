//! Local HTTP server for a generated dashboard
//!
//! Every request falls through to a `ServeDir` rooted at the output
//! directory: `/` resolves to `index.html`, only `GET` and `HEAD` are
//! answered, and paths escaping the root are refused.

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

/// Router serving the files under `root`
pub fn router(root: impl Into<PathBuf>) -> Router {
    Router::new().fallback_service(ServeDir::new(root.into()))
}

pub struct StaticServer {
    listener: TcpListener,
    router: Router,
}

impl StaticServer {
    /// Bind to `host:port`; port 0 picks a free port
    pub async fn bind(root: impl Into<PathBuf>, host: &str, port: u16) -> Result<Self> {
        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind {}:{}", host, port))?;

        Ok(Self {
            listener,
            router: router(root),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn url(&self) -> Result<String> {
        Ok(format!("http://{}/", self.local_addr()?))
    }

    /// Accept connections until the task is cancelled
    pub async fn run(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .await
            .context("Dashboard server failed")
    }
}
