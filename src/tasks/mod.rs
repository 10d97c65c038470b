//! Background scheduled tasks for the application.
//!
//! Currently hosts the verification-code sweeper. Tasks are owned by the
//! returned handles and stop when `shutdown` is called.

use crate::services::VerificationService;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Lower bound for the sweep interval; `tokio::time::interval` panics on zero.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Handle to a running sweeper. Dropping the handle also stops the loop at its
/// next wake-up, since the shutdown channel closes.
pub struct SweeperHandle {
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signal the loop to stop and wait for it to exit.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Err(e) = self.handle.await {
            log::error!("Verification sweeper terminated abnormally: {e}");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Spawn the periodic sweep of expired verification codes.
///
/// The first pass runs immediately, then once per `interval`. A pass that
/// panics is logged and the loop keeps going.
pub fn spawn_verification_sweeper(
    service: VerificationService,
    interval: Duration,
) -> SweeperHandle {
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
    if interval < MIN_SWEEP_INTERVAL {
        log::warn!(
            "Sweep interval {}ms too short, using {}s",
            interval.as_millis(),
            MIN_SWEEP_INTERVAL.as_secs()
        );
    }
    let interval = interval.max(MIN_SWEEP_INTERVAL);

    let handle = tokio::spawn(async move {
        log::info!(
            "Starting verification code sweeper, interval: {}s, ttl: {}s",
            interval.as_secs(),
            service.ttl_secs()
        );
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => break,
                _ = ticker.tick() => {
                    let svc = service.clone();
                    match tokio::spawn(async move { svc.sweep().await }).await {
                        Ok(n) if n > 0 => log::info!("Expired verification codes removed: {n}"),
                        Ok(_) => log::debug!("No expired verification codes"),
                        Err(e) => log::error!("Failed to sweep verification codes: {e}"),
                    }
                }
            }
        }

        log::info!("Verification code sweeper stopped");
    });

    SweeperHandle {
        shutdown_tx: Some(shutdown_tx),
        handle,
    }
}
