mod llm;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use llm::LlmChat;
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 5000;

/// Listen port from a raw `PORT` value. Blank, missing, or invalid means the default.
fn parse_port(raw: Option<&str>) -> u16 {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return DEFAULT_PORT;
    };
    raw.parse().unwrap_or_else(|e| {
        tracing::warn!(port = raw, error = %e, "invalid PORT, using default");
        DEFAULT_PORT
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let port = parse_port(std::env::var("PORT").ok().as_deref());

    // Missing key is non-fatal: explain requests report it individually.
    let llm: Option<Arc<dyn LlmChat>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured, explanations disabled");
            None
        }
    };

    let state = state::AppState::new(llm, llm::config::api_key_var());

    let app = match routes::leptos_app(state.clone()) {
        Ok(app) => app,
        Err(e) => {
            tracing::warn!(error = %e, "serving API only");
            routes::app(state)
        }
    };

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    tracing::info!(%port, "nexa-server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
