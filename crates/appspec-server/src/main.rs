//! AppSpec server binary
//!
//! Wires the generator to an axum HTTP surface: the parse endpoint,
//! a health probe, the static demo page, permissive CORS, and a
//! panic recovery layer that converts any unexpected fault into a
//! success response carrying the generic fallback spec.

mod config;
mod routes;

use appspec_core::{ModelAdapter, OpenAiBackend, SpecGenerator};
use axum::body::Body;
use axum::http::Response;
use config::ServerConfig;
use routes::AppState;
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tracing_subscriber::EnvFilter;

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("request handler panicked, serving generic fallback: {detail}");
    routes::panic_fallback_response()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();

    let adapter = match &config.api_key {
        Some(key) => {
            tracing::info!(model = %config.model.model, "model-backed generation enabled");
            ModelAdapter::new(Arc::new(OpenAiBackend::new(key.clone(), config.model.clone())))
        }
        None => {
            tracing::info!("no {} set, serving templates only", config::API_KEY_VAR);
            ModelAdapter::disabled()
        }
    };

    let state = AppState {
        generator: SpecGenerator::new(adapter),
    };

    let app = routes::router(state)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(CatchPanicLayer::custom(handle_panic));

    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    tracing::info!("listening on http://{}", config.addr);
    axum::serve(listener, app).await?;

    Ok(())
}
