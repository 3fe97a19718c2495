//! Server registry - Single source of truth for server run state
//!
//! The registry is written from two directions: polls that replace the whole
//! snapshot with what the daemon reports, and optimistic writes made when the
//! operator toggles a server. Readers always get a complete `Arc<Snapshot>`.
//!
//! Every refresh takes a poll ticket when it is issued. Commits from polls
//! older than the last committed one are dropped, and an optimistic write is
//! only overridden by a poll issued after the daemon answered its command.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;
use tracing::{debug, trace};

use super::server::{PendingCommand, Snapshot};
use crate::api::{ApiError, ControlApi};

/// Sequence number stamped on a refresh when it is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PollTicket(u64);

/// Result of offering a poll result to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The poll replaced the snapshot
    Applied,
    /// A newer poll had already been committed; this one was discarded
    Stale,
}

struct RegistryInner {
    snapshot: Arc<Snapshot>,
    last_committed: u64,
}

/// Shared handle to the server registry
#[derive(Clone)]
pub struct ServerRegistry {
    inner: Arc<RwLock<RegistryInner>>,
    tickets_issued: Arc<AtomicU64>,
}

impl Default for ServerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner {
                snapshot: Arc::new(Snapshot::default()),
                last_committed: 0,
            })),
            tickets_issued: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The most recently committed snapshot
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&inner.snapshot)
    }

    /// Running flag of `name`, `false` when the server is unknown
    pub fn is_running(&self, name: &str) -> bool {
        self.snapshot().is_running(name)
    }

    /// Fetch both server sets from the daemon and commit the merged snapshot.
    ///
    /// If either request fails nothing is committed and the previous snapshot
    /// stays in place.
    pub async fn refresh(&self, api: &dyn ControlApi) -> Result<CommitOutcome, ApiError> {
        let ticket = self.begin_poll();
        let (configured, running) =
            tokio::try_join!(api.configured_servers(), api.running_servers())?;
        Ok(self.commit_poll(ticket, configured, running))
    }

    /// Reserve the ticket for a poll that is about to be issued
    pub fn begin_poll(&self) -> PollTicket {
        PollTicket(self.tickets_issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Replace the snapshot with a poll result.
    ///
    /// Entries with an unconfirmed optimistic command keep their optimistic
    /// flag while the command is in flight, and against polls issued before
    /// it settled. Otherwise the poll wins and the pending marker is dropped.
    pub fn commit_poll(
        &self,
        ticket: PollTicket,
        configured: Vec<String>,
        running: HashSet<String>,
    ) -> CommitOutcome {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        if ticket.0 <= inner.last_committed {
            trace!(
                "Discarding poll #{} (already committed #{})",
                ticket.0,
                inner.last_committed
            );
            return CommitOutcome::Stale;
        }

        let previous = Arc::clone(&inner.snapshot);
        let mut polled = Snapshot::from_poll(configured, &running);

        for entry in polled.entries_mut() {
            let Some(pending) = previous.get(&entry.name).and_then(|e| e.pending) else {
                continue;
            };

            if entry.running == pending.expected_running {
                trace!("Poll #{} confirmed command on '{}'", ticket.0, entry.name);
            } else if pending.outlasts(ticket.0) {
                entry.running = pending.expected_running;
                entry.pending = Some(pending);
            } else {
                debug!(
                    "Daemon reports '{}' as {}, dropping unconfirmed command",
                    entry.name,
                    if entry.running { "running" } else { "stopped" }
                );
            }
        }

        let next = polled.published(previous.generation() + 1, Some(Utc::now()));
        trace!(
            "Committed poll #{} as generation {} ({} servers, {} running)",
            ticket.0,
            next.generation(),
            next.len(),
            next.running_count()
        );

        inner.snapshot = Arc::new(next);
        inner.last_committed = ticket.0;
        CommitOutcome::Applied
    }

    /// Optimistically overwrite one server's running flag.
    ///
    /// The entry is marked with an in-flight command until
    /// [`command_settled`](Self::command_settled) is called. Returns `false`
    /// without touching the snapshot if no server has that name.
    pub fn set_running(&self, name: &str, running: bool) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        let pending = PendingCommand::in_flight(running);
        let Some(next) = inner.snapshot.with_running(name, running, Some(pending)) else {
            trace!("Ignoring running flag for unknown server '{}'", name);
            return false;
        };

        publish(&mut inner, next);
        true
    }

    /// Record that the daemon answered the command expecting `running`.
    ///
    /// From now on only polls issued after this call may override the
    /// optimistic flag. Ignored when the entry's pending command is a
    /// different one, e.g. after a later toggle replaced it.
    pub fn command_settled(&self, name: &str, running: bool) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        let in_flight = inner
            .snapshot
            .get(name)
            .and_then(|e| e.pending)
            .is_some_and(|p| p.expected_running == running && p.settled_after_poll.is_none());
        if !in_flight {
            return;
        }

        let settled = PendingCommand {
            expected_running: running,
            settled_after_poll: Some(self.tickets_issued.load(Ordering::SeqCst)),
        };
        if let Some(next) = inner.snapshot.with_running(name, running, Some(settled)) {
            publish(&mut inner, next);
        }
    }
}

/// Swap in `next` as the following generation, keeping the last poll time
fn publish(inner: &mut RegistryInner, next: Snapshot) {
    let generation = inner.snapshot.generation() + 1;
    let polled_at = inner.snapshot.polled_at();
    inner.snapshot = Arc::new(next.published(generation, polled_at));
}
