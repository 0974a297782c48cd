//! Café Server
//!
//! Axum server that renders the portfolio page, the crawler documents and a
//! read-only JSON API over the project catalog.

use anyhow::Context;
use axum::{routing::get, Router};
use cafe_core::page::AssetProbe;
use cafe_core::{Catalog, PersistedConfig, SiteConfig};
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

mod api;
mod assets;
mod error;
mod pages;
mod state;

use assets::{serve_static, SiteAssets};
use state::AppState;

#[derive(Parser, Clone)]
#[command(author, version, about = "Café - portfolio site server")]
struct Args {
    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand, Clone)]
enum CliCommand {
    /// Start the server (default)
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Public base URL used by robots.txt and sitemap.xml
        #[arg(long)]
        base_url: Option<String>,
        /// JSON catalog replacing the built-in menu
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Directory with photos and the résumé
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
    /// Validate the catalog and report images that cannot be served
    Check {
        /// JSON catalog to check instead of the configured one
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Directory with photos and the résumé
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();
}

/// Defaults, then `.cafe/config.json`, then `CAFE_*` variables, then flags
async fn load_config(overrides: PersistedConfig) -> anyhow::Result<SiteConfig> {
    let mut config = PersistedConfig::load().await?;
    config.merge(PersistedConfig::from_env());
    config.merge(overrides);
    Ok(config.resolve())
}

async fn load_catalog(config: &SiteConfig) -> anyhow::Result<Catalog> {
    match &config.catalog_path {
        Some(path) => Catalog::load(path).await,
        None => Ok(Catalog::builtin()),
    }
}

fn build_router(state: state::SharedState) -> Router {
    Router::new()
        .merge(pages::page_routes())
        .nest("/api/v1", api::api_routes())
        .fallback(get(serve_static))
        .with_state(state)
}

pub async fn run_server(config: SiteConfig) -> anyhow::Result<()> {
    let catalog = load_catalog(&config).await?;
    info!(projects = catalog.len(), "Catalog ready");
    let assets = SiteAssets::scan(&config.static_dir).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::new(config, catalog, assets);
    let app = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Café Server running at http://{}", addr);
    info!("   Page:      /, /robots.txt, /sitemap.xml");
    info!("   Menu API:  /api/v1/projects, /categories, /flavors, /jump/:flavor");
    info!("   OpenAPI:   /api/v1/openapi.json");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

/// Card images that neither the static directory nor the binary provides
fn missing_images<'a>(catalog: &'a Catalog, assets: &SiteAssets) -> Vec<&'a str> {
    catalog
        .image_refs()
        .into_iter()
        .filter(|path| !assets.has_asset(path))
        .collect()
}

/// Validate a catalog; missing images are reported but are not fatal
async fn run_check(config: SiteConfig) -> anyhow::Result<Vec<String>> {
    let catalog = load_catalog(&config).await?;
    info!(projects = catalog.len(), "Catalog passed integrity checks");

    let assets = SiteAssets::scan(&config.static_dir).await?;
    let missing = missing_images(&catalog, &assets);
    for path in &missing {
        warn!(path, "Image not found, cards will render the dimmed fallback");
    }
    info!(
        assets = assets.paths().len(),
        missing_images = missing.len(),
        "Asset check complete"
    );
    Ok(missing.into_iter().map(str::to_string).collect())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is normal
    let _ = dotenvy::dotenv();
    init_tracing();

    let args = Args::parse();
    match args.command {
        Some(CliCommand::Check {
            catalog,
            static_dir,
        }) => {
            let config = load_config(PersistedConfig {
                catalog_path: catalog,
                static_dir,
                ..Default::default()
            })
            .await?;
            run_check(config).await.map(|_| ())
        }
        Some(CliCommand::Serve {
            port,
            base_url,
            catalog,
            static_dir,
        }) => {
            let config = load_config(PersistedConfig {
                port,
                base_url,
                catalog_path: catalog,
                static_dir,
                ..Default::default()
            })
            .await?;
            run_server(config).await
        }
        None => run_server(load_config(PersistedConfig::default()).await?).await,
    }
}
