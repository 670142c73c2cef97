//! Debug subscriber that logs everything published on a channel.
//!
//! Mainly used for observing publishes during development. The loop
//! runs for the life of the process and exits on the shutdown signal
//! or when the subscription stream closes.

use tokio::sync::watch;
use tokio_stream::StreamExt;
use tracing::{error, info, warn};

/// Subscribes to `channel` on a dedicated connection and logs every
/// message until `shutdown` fires or the broker closes the stream.
///
/// Connection and subscription failures are logged and end the task;
/// the sensor itself keeps serving either way.
pub async fn run(client: redis::Client, channel: &'static str, mut shutdown: watch::Receiver<bool>) {
    let mut pubsub = match client.get_async_pubsub().await {
        Ok(pubsub) => pubsub,
        Err(e) => {
            error!("Debug subscriber could not connect to Redis: {}", e);
            return;
        }
    };

    if let Err(e) = pubsub.subscribe(channel).await {
        error!("Debug subscriber could not subscribe to '{}': {}", channel, e);
        return;
    }
    info!("Subscribed to channel {}", channel);

    let mut messages = pubsub.on_message();
    loop {
        tokio::select! {
            // Resolves on the shutdown broadcast, or with Err once the
            // sender is gone; both mean stop.
            _ = shutdown.changed() => {
                info!("Debug subscriber stopping");
                break;
            }
            msg = messages.next() => match msg {
                Some(msg) => match msg.get_payload::<String>() {
                    Ok(content) => info!("{} content: {}", msg.get_channel_name(), content),
                    Err(e) => warn!("Could not decode message payload: {}", e),
                },
                None => {
                    warn!("Subscription stream for '{}' closed", channel);
                    break;
                }
            },
        }
    }
}
