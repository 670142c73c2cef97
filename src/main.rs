use axum::{Router, routing};
use github_sensor::api::{handle_webhook, health};
use github_sensor::broker::Broker;
use github_sensor::{AppState, PUSH_EVENT_CHANNEL, SensorConfig, subscriber};
use std::sync::Arc;
use tokio::signal;
use tokio::sync::watch;
use tracing::{self, error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting GitHub sensor...");
    let config = SensorConfig::from_env();
    info!(
        "Signature verification {}",
        if config.verifies_signatures() {
            "enabled"
        } else {
            "disabled"
        }
    );

    let broker = match Broker::new(&config.redis_url) {
        Ok(broker) => broker,
        Err(e) => {
            eprintln!("Broker configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let subscriber_task = tokio::spawn(subscriber::run(
        broker.client(),
        PUSH_EVENT_CHANNEL,
        shutdown_rx,
    ));

    let state = Arc::new(AppState {
        config: config.clone(),
        broker,
    });

    let app = Router::new()
        .route("/", routing::get(health))
        .route("/webhooks", routing::post(handle_webhook))
        .with_state(state);

    info!("Sensor listening on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await.unwrap();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    // Stop the debug subscriber once the server has drained.
    let _ = shutdown_tx.send(true);
    if let Err(e) = subscriber_task.await {
        error!("Debug subscriber task failed: {}", e);
    }
    info!("Sensor shut down");
}

/// Completes when SIGINT or SIGTERM arrives.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
