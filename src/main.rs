//! Single-page application host.
//!
//! # Architecture Overview
//!
//! ```text
//!   Browser address bar
//!        │  GET /some/path
//!        ▼
//!   ┌─────────┐    ┌──────────────┐    ┌──────────────────────────┐
//!   │  http   │───▶│   routing    │───▶│ Render(TodoPage)         │──▶ HTML shell, #app
//!   │ server  │    │ first match  │    │ Redirect(/todo)          │──▶ 302 Location
//!   └─────────┘    └──────────────┘    └──────────────────────────┘
//!        ▲                ▲
//!        │                │ built once at startup
//!   lifecycle        config (TOML) → validation → Router
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::net::TcpListener;

use spa_router::config::{load_config, AppConfig};
use spa_router::http::HttpServer;
use spa_router::lifecycle::{signals, Shutdown};
use spa_router::observability::{logging, metrics};
use spa_router::routing::{Navigation, Resolution, Router, RoutingError};

#[derive(Parser)]
#[command(name = "spa-router")]
#[command(about = "Serve and inspect the single-page application's routes", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults to the built-in route table.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the application over HTTP (default)
    Serve {
        /// Override listener.bind_address
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Validate the configuration and print the route table
    Check,
    /// Resolve paths and print the outcome
    Resolve {
        /// Print one JSON object per path
        #[arg(long)]
        json: bool,

        #[arg(required = true)]
        paths: Vec<String>,
    },
}

#[derive(Serialize)]
struct ResolveReport<'a> {
    path: &'a str,
    resolution: Option<Resolution>,
    navigation: Option<Navigation>,
    error: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // The configured level is unknown if the config failed to load.
            logging::init("info");
            tracing::error!(error = %e, "spa-router failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => load_config(path).map_err(|e| {
            format!("failed to load configuration from {}: {e}", path.display())
        })?,
        None => AppConfig::default(),
    };

    logging::init(&config.observability.log_level);

    match cli.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.listener.bind_address = bind;
            }
            serve(config).await
        }
        Command::Check => {
            let router = config.build_router()?;
            println!("configuration ok, {} route(s):", router.table().len());
            for (index, rule) in router.table().rules().iter().enumerate() {
                println!("  {}. {}", index + 1, rule);
            }
            Ok(())
        }
        Command::Resolve { json, paths } => {
            let router = config.build_router()?;
            resolve(&router, &paths, json)
        }
    }
}

async fn serve(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("spa-router v{} starting", env!("CARGO_PKG_VERSION"));

    let router = Arc::new(config.build_router()?);
    for rule in router.table().rules() {
        tracing::info!(rule = %rule, "Route registered");
    }

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        if let Err(e) = metrics::init_metrics(addr) {
            tracing::error!(error = %e, "Failed to start metrics endpoint");
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        mount = %config.app.mount,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    tokio::spawn(signals::forward_signals(shutdown.clone()));

    let server = HttpServer::with_resolver(config, router)?;
    server.run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn resolve(router: &Router, paths: &[String], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut failed = false;

    for path in paths {
        let resolution = router.resolve(path);
        let navigation = router.navigate(path);
        failed |= navigation.is_err();

        if json {
            let report = ResolveReport {
                path,
                error: navigation.as_ref().err().map(RoutingError::to_string),
                resolution: resolution.ok(),
                navigation: navigation.ok(),
            };
            println!("{}", serde_json::to_string(&report)?);
            continue;
        }

        match (resolution, navigation) {
            (Ok(Resolution::Render(page)), _) => println!("{path:?} -> render {page}"),
            (Ok(Resolution::Redirect(to)), Ok(nav)) => {
                println!("{path:?} -> redirect {to} -> render {}", nav.page)
            }
            (_, Err(e)) | (Err(e), _) => println!("{path:?} -> error: {e}"),
        }
    }

    if failed {
        return Err("one or more paths failed to resolve".into());
    }
    Ok(())
}
