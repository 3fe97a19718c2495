//! Server entries and registry snapshots

use std::collections::HashSet;

use chrono::{DateTime, Utc};

/// An optimistic command that no poll has confirmed yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingCommand {
    /// Running state the command is expected to produce
    pub expected_running: bool,
    /// Newest poll ticket issued once the daemon answered the command, `None`
    /// while the command is still in flight. Polls with a ticket at or below
    /// this may have been answered before the command took effect.
    pub settled_after_poll: Option<u64>,
}

impl PendingCommand {
    pub fn in_flight(expected_running: bool) -> Self {
        Self {
            expected_running,
            settled_after_poll: None,
        }
    }

    /// Whether a poll with this ticket is too early to override the command
    pub fn outlasts(&self, ticket: u64) -> bool {
        match self.settled_after_poll {
            Some(settled) => ticket <= settled,
            None => true,
        }
    }
}

/// One configured server and whether it is running
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEntry {
    pub name: String,
    pub running: bool,
    pub pending: Option<PendingCommand>,
}

impl ServerEntry {
    pub fn new(name: impl Into<String>, running: bool) -> Self {
        Self {
            name: name.into(),
            running,
            pending: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn status_label(&self) -> &'static str {
        match (self.running, self.is_pending()) {
            (true, false) => "Running",
            (false, false) => "Stopped",
            (true, true) => "Starting",
            (false, true) => "Stopping",
        }
    }
}

/// Ordered, immutable set of server entries.
///
/// A snapshot is never edited once the registry has published it; every
/// change builds a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: Vec<ServerEntry>,
    generation: u64,
    polled_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// Merge the configured and running sets reported by the daemon.
    ///
    /// Configured names define membership and order. Duplicate names keep
    /// their first position; running names that are not configured are
    /// dropped.
    pub fn from_poll(configured: Vec<String>, running: &HashSet<String>) -> Self {
        let mut seen = HashSet::with_capacity(configured.len());
        let entries = configured
            .into_iter()
            .filter(|name| seen.insert(name.clone()))
            .map(|name| {
                let is_running = running.contains(&name);
                ServerEntry::new(name, is_running)
            })
            .collect();

        Self {
            entries,
            generation: 0,
            polled_at: None,
        }
    }

    pub fn entries(&self) -> &[ServerEntry] {
        &self.entries
    }

    /// Incremented every time the registry publishes a new snapshot
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// When the last successful poll landed, `None` before the first one
    pub fn polled_at(&self) -> Option<DateTime<Utc>> {
        self.polled_at
    }

    pub fn get(&self, name: &str) -> Option<&ServerEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Running flag of `name`; unknown servers count as not running
    pub fn is_running(&self, name: &str) -> bool {
        self.get(name).map(|e| e.running).unwrap_or(false)
    }

    pub fn running_count(&self) -> usize {
        self.entries.iter().filter(|e| e.running).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Copy of this snapshot with one entry's flag overwritten, or `None`
    /// if no entry has that name.
    pub(crate) fn with_running(
        &self,
        name: &str,
        running: bool,
        pending: Option<PendingCommand>,
    ) -> Option<Self> {
        let index = self.entries.iter().position(|e| e.name == name)?;
        let mut next = self.clone();
        let entry = &mut next.entries[index];
        entry.running = running;
        entry.pending = pending;
        Some(next)
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [ServerEntry] {
        &mut self.entries
    }

    pub(crate) fn published(mut self, generation: u64, polled_at: Option<DateTime<Utc>>) -> Self {
        self.generation = generation;
        self.polled_at = polled_at;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(snapshot: &Snapshot) -> Vec<&str> {
        snapshot.entries().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn merge_marks_running_servers() {
        let running: HashSet<String> = ["web".to_string()].into();
        let snapshot = Snapshot::from_poll(vec!["web".into(), "db".into()], &running);

        assert_eq!(
            snapshot.entries(),
            &[ServerEntry::new("web", true), ServerEntry::new("db", false)]
        );
    }

    #[test]
    fn merge_ignores_unconfigured_runners() {
        let running: HashSet<String> = ["ghost".to_string(), "db".to_string()].into();
        let snapshot = Snapshot::from_poll(vec!["web".into(), "db".into()], &running);

        assert_eq!(names(&snapshot), vec!["web", "db"]);
        assert!(!snapshot.contains("ghost"));
        assert_eq!(snapshot.running_count(), 1);
    }

    #[test]
    fn merge_drops_duplicate_names() {
        let snapshot = Snapshot::from_poll(
            vec!["api".into(), "web".into(), "api".into()],
            &HashSet::new(),
        );
        assert_eq!(names(&snapshot), vec!["api", "web"]);
    }

    #[test]
    fn unknown_server_is_not_running() {
        let snapshot = Snapshot::default();
        assert!(!snapshot.is_running("nope"));
        assert!(snapshot.get("nope").is_none());
    }

    #[test]
    fn with_running_touches_only_the_named_entry() {
        let snapshot = Snapshot::from_poll(
            vec!["a".into(), "b".into(), "c".into()],
            &["c".to_string()].into(),
        );

        let next = snapshot.with_running("b", true, None).unwrap();
        assert_eq!(next.entries()[0], snapshot.entries()[0]);
        assert_eq!(next.entries()[1], ServerEntry::new("b", true));
        assert_eq!(next.entries()[2], snapshot.entries()[2]);

        assert!(snapshot.with_running("zzz", true, None).is_none());
    }

    #[test]
    fn status_label_reflects_pending_command() {
        let mut entry = ServerEntry::new("web", true);
        assert_eq!(entry.status_label(), "Running");
        entry.pending = Some(PendingCommand::in_flight(true));
        assert_eq!(entry.status_label(), "Starting");
        entry.running = false;
        assert_eq!(entry.status_label(), "Stopping");
    }

    #[test]
    fn in_flight_command_outlasts_every_poll() {
        let pending = PendingCommand::in_flight(true);
        assert!(pending.outlasts(1));
        assert!(pending.outlasts(u64::MAX));

        let settled = PendingCommand {
            settled_after_poll: Some(4),
            ..pending
        };
        assert!(settled.outlasts(4));
        assert!(!settled.outlasts(5));
    }
}
