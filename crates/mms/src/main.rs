//! MMS CLI - build and preview the Modern Material Supply website.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mms_content::Variant;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "mms")]
#[command(about = "Build and preview the MMS building-materials website")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to site.toml config file
    #[arg(short, long, default_value = "site.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold site.toml, content/catalog.yaml and assets/
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Start development server with live reload
    Dev {
        /// Port to listen on
        #[arg(short, long, default_value = "7777")]
        port: u16,

        /// Page variant: basic (a) or extended (b)
        #[arg(long)]
        variant: Option<Variant>,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },

    /// Build the static site
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Page variant: basic (a) or extended (b)
        #[arg(long)]
        variant: Option<Variant>,

        /// Skip minification
        #[arg(long)]
        no_minify: bool,
    },

    /// Preview a built site
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Directory to serve
        #[arg(short, long, default_value = "dist")]
        dir: PathBuf,

        /// Open browser
        #[arg(long)]
        open: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Dev {
            port,
            variant,
            no_open,
        } => {
            commands::dev::run(&cli.config, port, variant, !no_open).await?;
        }
        Commands::Build {
            output,
            variant,
            no_minify,
        } => {
            let minify = if no_minify { Some(false) } else { None };
            commands::build::run(&cli.config, output, variant, minify).await?;
        }
        Commands::Serve { port, dir, open } => {
            commands::serve::run(port, dir, open).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_variant_flag() {
        let cli = Cli::try_parse_from(["mms", "build", "--variant", "a", "--no-minify"]).unwrap();

        match cli.command {
            Commands::Build {
                variant, no_minify, ..
            } => {
                assert_eq!(variant, Some(Variant::Basic));
                assert!(no_minify);
            }
            _ => panic!("expected build command"),
        }
        assert_eq!(cli.config, PathBuf::from("site.toml"));
    }

    #[test]
    fn rejects_unknown_variant() {
        assert!(Cli::try_parse_from(["mms", "dev", "--variant", "c"]).is_err());
    }
}
