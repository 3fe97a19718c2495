//! Poller - Refreshes the registry on a fixed cadence

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace, warn};

use super::registry::{CommitOutcome, ServerRegistry};
use crate::api::ControlApi;

/// Called after a poll result has been committed
pub type CommitHook = Arc<dyn Fn() + Send + Sync>;

pub struct Poller {
    registry: ServerRegistry,
    api: Arc<dyn ControlApi>,
    interval: Duration,
}

impl Poller {
    pub fn new(registry: ServerRegistry, api: Arc<dyn ControlApi>, interval: Duration) -> Self {
        Self {
            registry,
            api,
            interval,
        }
    }

    /// Start polling: once immediately, then every interval.
    ///
    /// Each tick spawns its own refresh, so a slow daemon response never
    /// delays the next request.
    pub fn spawn(self, runtime: &Handle, on_commit: CommitHook) -> JoinHandle<()> {
        let spawner = runtime.clone();
        runtime.spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                spawner.spawn(refresh_once(
                    self.registry.clone(),
                    Arc::clone(&self.api),
                    Arc::clone(&on_commit),
                ));
            }
        })
    }
}

async fn refresh_once(registry: ServerRegistry, api: Arc<dyn ControlApi>, on_commit: CommitHook) {
    match registry.refresh(api.as_ref()).await {
        Ok(CommitOutcome::Applied) => on_commit(),
        Ok(CommitOutcome::Stale) => trace!("Poll superseded by a newer one"),
        Err(e) if e.is_unreachable() => {
            debug!("Daemon unreachable, keeping previous snapshot: {}", e)
        }
        Err(e) => warn!("Poll failed, keeping previous snapshot: {}", e),
    }
}
