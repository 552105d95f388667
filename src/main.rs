use agentgate_server::provider::SupabaseAuth;
use agentgate_server::{AppConfig, AppState};
use std::sync::Arc;
use tower_sessions::MemoryStore;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "agentgate_server=info,tower_http=debug".into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app_config = AppConfig::from_env()?;
    init_tracing();

    let auth = SupabaseAuth::new(&app_config.supabase_url, app_config.supabase_key.clone());
    let app_state = AppState::new(app_config.clone(), Arc::new(auth));

    let app = agentgate_server::app(app_state, MemoryStore::default())?;

    tracing::info!(
        supabase_url = %app_config.supabase_url,
        oauth_flow = ?app_config.oauth_flow,
        "listening on http://{}",
        app_config.bind_addr
    );

    let listener = tokio::net::TcpListener::bind(&app_config.bind_addr).await?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
