mod assets;
mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{extract::State, response::Html, routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use config::ServerConfig;

/// Build a cache-controlled static file router.
///
/// Separated so tests can exercise the caching layer with arbitrary directories.
fn cached_static_router(dir: &Path, cache_header: &'static str) -> Router {
    let layer = SetResponseHeaderLayer::overriding(
        axum::http::header::CACHE_CONTROL,
        HeaderValue::from_static(cache_header),
    );
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(layer)
}

const CACHE_1DAY: &str = "public, max-age=86400, must-revalidate";
const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Location of the built `index.html`.
#[derive(Clone)]
struct IndexPage(Arc<PathBuf>);

fn build_app(config: &ServerConfig) -> Router {
    // Map images and descriptors can change between deploys; bundles are content-hashed.
    let static_files = Router::new()
        .nest(
            "/static",
            cached_static_router(&config.assets_dir, CACHE_1DAY),
        )
        .nest(
            "/dist",
            cached_static_router(&config.dist_dir, CACHE_IMMUTABLE),
        )
        .nest(
            "/assets",
            cached_static_router(&config.dist_dir.join("assets"), CACHE_IMMUTABLE),
        );

    let index = IndexPage(Arc::new(config.dist_dir.join("index.html")));
    Router::new()
        .route("/", get(serve_index))
        .fallback(serve_index)
        .with_state(index)
        .merge(static_files)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid configuration: {err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = assets::probe_root(&config.root_map_path()) {
        tracing::warn!("Root map descriptor unavailable: {err}");
    }

    let app = build_app(&config);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            eprintln!("Failed to bind {addr}: {err}");
            std::process::exit(1);
        }
    };
    tracing::info!("Server running at http://localhost:{}", config.port);

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!("Server stopped: {err}");
    }
}

async fn serve_index(State(IndexPage(path)): State<IndexPage>) -> Html<String> {
    // Try to serve the built frontend, fall back to a simple message
    match tokio::fs::read_to_string(path.as_path()).await {
        Ok(html) => Html(html),
        Err(_) => Html(
            r#"<!DOCTYPE html>
<html>
<head><title>Campaign Map</title></head>
<body>
<h1>Campaign Map</h1>
<p>Frontend not built yet. Run <code>dx build</code> in <code>crates/frontend</code>.</p>
</body>
</html>"#
                .to_string(),
        ),
    }
}
