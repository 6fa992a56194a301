mod model;
mod server;

use axum::Router;
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::{Config, Environment},
    startup,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Invalid configuration: {}", err);
            std::process::exit(1);
        }
    };

    let port = config.port;
    let environment = config.environment.clone();

    // Nothing binds the port until the schema is in place.
    let router = match startup::prepare_app(config).await {
        Ok(router) => router,
        Err(err) => {
            tracing::error!("Failed to start: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = serve(router, port, environment).await {
        tracing::error!("Server error: {}", err);
        std::process::exit(1);
    }
}

async fn serve(
    router: Router,
    port: u16,
    environment: Environment,
) -> Result<(), server::error::AppError> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("Server running in {} mode on port {}", environment, port);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
