//! Development server command.

use std::path::Path;

use anyhow::Result;
use mms_content::Variant;
use mms_server::{DevServer, DevServerConfig};

use crate::config::{load_config, Overrides};

/// Run the dev server.
pub async fn run(
    config_path: &Path,
    port: u16,
    variant: Option<Variant>,
    open: bool,
) -> Result<()> {
    tracing::info!("Starting development server on port {}", port);

    let build = load_config(config_path)?.build_config(Overrides {
        variant,
        // Readable markup while developing
        minify: Some(false),
        ..Default::default()
    });

    let config = DevServerConfig {
        build,
        port,
        open,
        ..Default::default()
    };

    DevServer::new(config).start().await?;

    Ok(())
}
