//! Selection tracker - Which server, if any, the operator has focused

use tracing::debug;

use super::server::Snapshot;

/// Holds the name of the selected server.
///
/// Selecting does not check the registry; a name can be selected before or
/// after its server exists.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    selected: Option<String>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, name: impl Into<String>) {
        self.selected = Some(name.into());
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn current(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Clear the selection if a polled snapshot no longer has the server.
    ///
    /// Snapshots that have not seen a poll yet are ignored. Returns whether
    /// the selection was cleared.
    pub fn retain_known(&mut self, snapshot: &Snapshot) -> bool {
        let Some(name) = self.current() else {
            return false;
        };
        if snapshot.polled_at().is_none() || snapshot.contains(name) {
            return false;
        }

        debug!("Selected server '{}' is no longer configured", name);
        self.clear();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::ServerRegistry;

    fn polled(names: &[&str]) -> std::sync::Arc<Snapshot> {
        let registry = ServerRegistry::new();
        let ticket = registry.begin_poll();
        registry.commit_poll(
            ticket,
            names.iter().map(|n| n.to_string()).collect(),
            Default::default(),
        );
        registry.snapshot()
    }

    #[test]
    fn starts_with_nothing_selected() {
        assert_eq!(SelectionTracker::new().current(), None);
    }

    #[test]
    fn select_and_clear() {
        let mut selection = SelectionTracker::new();
        selection.select("db");
        assert_eq!(selection.current(), Some("db"));

        selection.select("web");
        assert_eq!(selection.current(), Some("web"));

        selection.clear();
        assert_eq!(selection.current(), None);
    }

    #[test]
    fn select_accepts_unknown_names() {
        let mut selection = SelectionTracker::new();
        selection.select("not-configured");
        assert_eq!(selection.current(), Some("not-configured"));
    }

    #[test]
    fn retain_known_clears_vanished_server() {
        let mut selection = SelectionTracker::new();
        selection.select("db");

        assert!(!selection.retain_known(&polled(&["web", "db"])));
        assert_eq!(selection.current(), Some("db"));

        assert!(selection.retain_known(&polled(&["web"])));
        assert_eq!(selection.current(), None);
    }

    #[test]
    fn retain_known_waits_for_first_poll() {
        let mut selection = SelectionTracker::new();
        selection.select("db");

        assert!(!selection.retain_known(&Snapshot::default()));
        assert_eq!(selection.current(), Some("db"));
    }
}
