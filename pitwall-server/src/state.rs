//! Application state management

use pitwall_core::{model::TelemetryFrame, source::TelemetrySource};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tokio_util::sync::CancellationToken;

/// Shared application state
///
/// Lock order is `sources`, then `active_source`, then `latest`.
#[derive(Clone)]
pub struct AppState {
    /// All registered telemetry sources
    pub sources: Arc<RwLock<Vec<Box<dyn TelemetrySource>>>>,

    /// Name of the source currently being ticked
    pub active_source: Arc<RwLock<Option<String>>>,

    /// Broadcast channel for telemetry frames
    /// Multiple consumers can subscribe to receive frames
    pub telemetry_tx: broadcast::Sender<TelemetryFrame>,

    /// Most recent frame, `None` until the first tick of a session
    pub latest: Arc<RwLock<Option<TelemetryFrame>>>,

    /// Cancelled once on shutdown; stops the tick loop and open streams
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new() -> Self {
        // Create broadcast channel with capacity for 100 frames
        let (telemetry_tx, _) = broadcast::channel(100);

        Self {
            sources: Arc::new(RwLock::new(Vec::new())),
            active_source: Arc::new(RwLock::new(None)),
            telemetry_tx,
            latest: Arc::new(RwLock::new(None)),
            shutdown: CancellationToken::new(),
        }
    }

    /// Register a source
    pub async fn register_source(&self, source: Box<dyn TelemetrySource>) {
        let mut sources = self.sources.write().await;
        sources.push(source);
    }

    /// Subscribe to telemetry frames
    pub fn subscribe(&self) -> broadcast::Receiver<TelemetryFrame> {
        self.telemetry_tx.subscribe()
    }

    /// Record `frame` as the latest and send it to all subscribers
    pub async fn publish(&self, frame: TelemetryFrame) {
        *self.latest.write().await = Some(frame.clone());
        // Ignore error if no receivers (they'll get the next frame)
        let _ = self.telemetry_tx.send(frame);
    }

    pub async fn latest_frame(&self) -> Option<TelemetryFrame> {
        self.latest.read().await.clone()
    }

    /// Forget the latest frame, e.g. when a new session starts
    pub async fn clear_latest(&self) {
        *self.latest.write().await = None;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
