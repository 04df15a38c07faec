//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API and, when a Leptos site configuration is
//! available, stitches it with Leptos SSR rendering under a single Axum
//! router. Without a site configuration the server runs API-only, matching a
//! deployment where the SPA is hosted elsewhere.

pub mod explain;

use std::path::PathBuf;

use axum::extract::State;
use axum::http::{HeaderValue, Method, header};
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use serde_json::{Value, json};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "https://nexa-mu-three.vercel.app",
    "https://nexa-learn-five.vercel.app",
];

/// Parse a comma-separated origin list, dropping blanks and invalid values.
fn parse_origins(raw: Option<&str>) -> Vec<HeaderValue> {
    let parsed: Vec<HeaderValue> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    if parsed.is_empty() {
        DEFAULT_ALLOWED_ORIGINS
            .iter()
            .copied()
            .map(HeaderValue::from_static)
            .collect()
    } else {
        parsed
    }
}

fn cors_layer() -> CorsLayer {
    let origins = parse_origins(std::env::var("CORS_ALLOWED_ORIGINS").ok().as_deref());
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// JSON API routes.
fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v2/chatbot/explain", post(explain::explain))
        .route("/healthz", get(healthz))
        .layer(cors_layer())
        .with_state(state)
}

/// API-only application with compression and request tracing.
pub fn app(state: AppState) -> Router {
    api_routes(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

/// Leptos SSR frontend: API routes + server-rendered app + static assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing
/// `LEPTOS_*` environment or workspace `metadata.leptos` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(nexa_client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || nexa_client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    // Serve Leptos static assets (WASM, CSS, JS) from the site root /pkg directory.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .fallback_service(ServeDir::new(site_root_path))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

/// `GET /healthz` — liveness plus whether an LLM provider is configured.
async fn healthz(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Backend is running",
        "provider": state.provider_status(),
    }))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
