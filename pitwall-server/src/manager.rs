//! Session manager: the fixed-cadence driver of the simulation
//!
//! This module handles:
//! - Starting a registered source when none is active
//! - Ticking the active source once per interval
//! - Publishing every frame to the latest slot and to subscribers
//!
//! It is the only caller of `read_frame`, so frames are produced strictly
//! in tick order.

use crate::state::AppState;
use anyhow::Result;
use pitwall_sim::{SimAdapter, SimConfig};
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

/// Register the simulator and drive it until shutdown
pub async fn run(state: AppState, sim: SimConfig, tick_interval: Duration) {
    state
        .register_source(Box::new(SimAdapter::with_config(sim)))
        .await;

    drive(state, tick_interval).await;
}

/// Tick whatever sources are registered until `state.shutdown` is cancelled
pub async fn drive(state: AppState, tick_interval: Duration) {
    info!("Session manager started, ticking every {:?}", tick_interval);

    let mut ticker = interval(tick_interval);
    // A late tick is run late, never skipped or doubled up
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = state.shutdown.cancelled() => break,
            _ = ticker.tick() => {}
        }

        if let Err(e) = activation_cycle(&state).await {
            error!("Error in activation cycle: {}", e);
        }

        if let Err(e) = frame_read_cycle(&state).await {
            error!("Error reading frames: {}", e);
        }
    }

    if let Err(e) = stop_active(&state).await {
        error!("Error stopping active source: {}", e);
    }
    info!("Session manager stopped");
}

/// Start the first registered source if none is active
async fn activation_cycle(state: &AppState) -> Result<()> {
    let mut sources = state.sources.write().await;
    let mut active_source = state.active_source.write().await;

    if active_source.is_some() {
        return Ok(());
    }

    for source in sources.iter_mut() {
        if source.is_active() {
            continue;
        }
        info!("Starting source {}", source.name());
        match source.start() {
            Ok(()) => {
                *active_source = Some(source.name().to_string());
                info!("Source {} started successfully", source.name());
                break;
            }
            Err(e) => {
                error!("Failed to start source {}: {}", source.name(), e);
            }
        }
    }

    Ok(())
}

/// Tick the active source once and publish its frame
///
/// The frame is published while the source lock is held so a concurrent
/// reset can never be followed by a frame from the old session.
async fn frame_read_cycle(state: &AppState) -> Result<()> {
    let Some(active_name) = state.active_source.read().await.clone() else {
        return Ok(());
    };

    let mut sources = state.sources.write().await;
    let Some(source) = sources.iter_mut().find(|s| s.name() == active_name) else {
        return Ok(());
    };

    match source.read_frame() {
        Ok(Some(frame)) => state.publish(frame).await,
        Ok(None) => {
            // Source not producing yet
        }
        Err(e) => warn!("Error reading frame from {}: {}", active_name, e),
    }

    Ok(())
}

/// Stop the active source and mark nothing as active
async fn stop_active(state: &AppState) -> Result<()> {
    let mut sources = state.sources.write().await;
    let mut active_source = state.active_source.write().await;

    if let Some(name) = active_source.take() {
        if let Some(source) = sources.iter_mut().find(|s| s.name() == name) {
            source.stop()?;
            info!("Source {} stopped", name);
        }
    }

    Ok(())
}

/// Restart the active source with a fresh session
///
/// Returns the name of the restarted source, or `None` when nothing is
/// active. If the restart fails the source is left inactive and the next
/// activation cycle tries again.
pub async fn reset_active(state: &AppState) -> Result<Option<String>> {
    let mut sources = state.sources.write().await;
    let mut active_source = state.active_source.write().await;

    let Some(name) = active_source.clone() else {
        return Ok(None);
    };
    let Some(source) = sources.iter_mut().find(|s| s.name() == name) else {
        return Ok(None);
    };

    source.stop()?;
    if let Err(e) = source.start() {
        *active_source = None;
        return Err(e);
    }
    state.clear_latest().await;

    info!("Source {} reset to a new session", name);
    Ok(Some(name))
}
