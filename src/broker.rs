//! Redis publisher for relaying push events.
//!
//! One `Broker` handle is shared by every request task. The underlying
//! multiplexed connection is established lazily so the sensor can start
//! before Redis is reachable, and is dropped after a failed publish so
//! the next request reconnects.

use std::sync::Arc;

use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{Result, SensorError};
use crate::event::{PushEvent, PushPayload};

/// Shared handle to the pub/sub broker.
#[derive(Clone)]
pub struct Broker {
    inner: Arc<BrokerInner>,
}

struct BrokerInner {
    client: redis::Client,
    connection: RwLock<Option<MultiplexedConnection>>,
}

impl Broker {
    /// Creates a broker handle for the given Redis URL. No connection
    /// is attempted until the first publish.
    pub fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        Ok(Self {
            inner: Arc::new(BrokerInner {
                client,
                connection: RwLock::new(None),
            }),
        })
    }

    /// A plain client handle for callers that need a connection of
    /// their own, such as the pub/sub subscriber.
    pub fn client(&self) -> redis::Client {
        self.inner.client.clone()
    }

    async fn ensure_connected(&self) -> Result<MultiplexedConnection> {
        {
            let connection = self.inner.connection.read().await;
            if let Some(conn) = connection.as_ref() {
                return Ok(conn.clone());
            }
        }

        let mut connection = self.inner.connection.write().await;
        // Double-check after acquiring the write lock
        if let Some(conn) = connection.as_ref() {
            return Ok(conn.clone());
        }

        info!("Connecting to Redis...");
        let conn = self.inner.client.get_multiplexed_async_connection().await?;
        info!("Redis connection established");

        *connection = Some(conn.clone());
        Ok(conn)
    }

    /// Drops the cached connection so the next publish reconnects.
    async fn reset(&self) {
        let mut connection = self.inner.connection.write().await;
        *connection = None;
    }

    /// Wraps `payload` in a [`PushEvent`] envelope and publishes its
    /// JSON serialization on `channel`. One publish per call,
    /// fire-and-forget: the message reaches whoever is subscribed at
    /// that moment and nobody else.
    pub async fn publish(&self, channel: &str, payload: PushPayload) -> Result<()> {
        let event = PushEvent { payload };
        debug!("Publishing event {:?}", event);
        let body = serde_json::to_vec(&event).map_err(SensorError::EncodeEnvelope)?;

        let mut conn = self.ensure_connected().await?;
        match conn.publish::<_, _, i64>(channel, body.as_slice()).await {
            Ok(receivers) => {
                info!(
                    "Published push event to '{}' ({} bytes, {} subscribers)",
                    channel,
                    body.len(),
                    receivers
                );
                Ok(())
            }
            Err(e) => {
                self.reset().await;
                Err(SensorError::Broker(e))
            }
        }
    }
}
