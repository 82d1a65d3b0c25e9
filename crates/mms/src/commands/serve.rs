//! Preview server for a finished build.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::services::ServeDir;

/// Serve `dir` as-is, without rebuilding or live reload.
pub async fn run(port: u16, dir: PathBuf, open: bool) -> Result<()> {
    if !dir.join("index.html").exists() {
        anyhow::bail!(
            "No index.html in {}. Run 'mms build' first.",
            dir.display()
        );
    }

    let addr: SocketAddr = format!("127.0.0.1:{}", port)
        .parse()
        .context("Invalid address")?;

    let app = Router::new().fallback_service(ServeDir::new(&dir));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Previewing {} at http://{}", dir.display(), addr);
    if open {
        let _ = open::that(format!("http://{}", addr));
    }

    axum::serve(listener, app).await?;

    Ok(())
}
