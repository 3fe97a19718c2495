//! Application state - Wires the registry, selection and toggles together

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use super::poller::{CommitHook, Poller};
use super::registry::ServerRegistry;
use super::selection::SelectionTracker;
use super::settings::Settings;
use super::toggle::ToggleController;
use super::view::{self, RenderTree, ViewEvent};
use crate::api::ControlApi;

/// Central application state
pub struct AppState {
    /// Application settings
    pub settings: Settings,
    /// Server run state shared with background tasks
    registry: ServerRegistry,
    /// Focused server
    selection: SelectionTracker,
    /// Start/stop command issuer
    toggles: ToggleController,
    /// Control API client
    api: Arc<dyn ControlApi>,
    /// Runtime that runs network requests
    runtime: Handle,
    /// Generation of the snapshot the selection was last checked against
    seen_generation: u64,
}

impl AppState {
    pub fn new(settings: Settings, api: Arc<dyn ControlApi>, runtime: Handle) -> Self {
        let registry = ServerRegistry::new();
        let toggles = ToggleController::new(registry.clone(), Arc::clone(&api), runtime.clone());

        Self {
            settings,
            registry,
            selection: SelectionTracker::new(),
            toggles,
            api,
            runtime,
            seen_generation: 0,
        }
    }

    /// Start the background poller. `on_commit` runs after every applied poll.
    pub fn start_polling(&self, on_commit: CommitHook) -> JoinHandle<()> {
        Poller::new(
            self.registry.clone(),
            Arc::clone(&self.api),
            self.settings.poll_interval(),
        )
        .spawn(&self.runtime, on_commit)
    }

    /// Derive the render tree from the current snapshot and selection
    pub fn render_tree(&mut self) -> RenderTree {
        let snapshot = self.registry.snapshot();

        if snapshot.generation() != self.seen_generation {
            self.seen_generation = snapshot.generation();
            if self.settings.clear_selection_on_removal {
                self.selection.retain_known(&snapshot);
            }
        }

        view::compose(&snapshot, self.selection.current())
    }

    /// Apply an interaction reported by the UI
    pub fn dispatch(&mut self, event: ViewEvent) {
        debug!("View event: {:?}", event);
        match event {
            ViewEvent::TitleClicked => self.selection.clear(),
            ViewEvent::RowClicked(name) => self.selection.select(name),
            ViewEvent::ToggleClicked(name) => {
                // The task logs its own failure; the poller reconciles
                let (command, _task) = self.toggles.toggle(&name);
                debug!("Issued {} for '{}'", command.label(), name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::FakeControlApi;
    use crate::core::toggle::ServerCommand;
    use crate::core::view::{MainPanel, FRONTPAGE_MESSAGE};

    async fn state_with(configured: &[&str], running: &[&str]) -> (AppState, Arc<FakeControlApi>) {
        let api = Arc::new(FakeControlApi::new(configured, running));
        let state = AppState::new(Settings::default(), api.clone(), Handle::current());
        state.registry.refresh(api.as_ref()).await.unwrap();
        (state, api)
    }

    fn row<'a>(tree: &'a RenderTree, name: &str) -> &'a crate::core::view::NavRow {
        tree.nav.rows.iter().find(|r| r.name == name).unwrap()
    }

    #[tokio::test]
    async fn select_then_title_returns_to_frontpage() {
        let (mut state, _api) = state_with(&["web", "db"], &["web"]).await;
        assert_eq!(state.selection.current(), None);

        state.dispatch(ViewEvent::RowClicked("db".to_string()));
        let tree = state.render_tree();
        assert_eq!(tree.main, MainPanel::Detail { name: "db".to_string() });
        assert!(row(&tree, "db").selected);

        state.dispatch(ViewEvent::TitleClicked);
        let tree = state.render_tree();
        assert_eq!(state.selection.current(), None);
        assert_eq!(
            tree.main,
            MainPanel::Frontpage {
                message: FRONTPAGE_MESSAGE
            }
        );
    }

    #[tokio::test]
    async fn toggle_click_does_not_change_selection() {
        let (mut state, api) = state_with(&["web", "db"], &["web"]).await;
        state.dispatch(ViewEvent::RowClicked("web".to_string()));

        state.dispatch(ViewEvent::ToggleClicked("db".to_string()));

        let tree = state.render_tree();
        assert_eq!(state.selection.current(), Some("web"));
        assert!(row(&tree, "db").running);
        assert!(row(&tree, "db").pending);
        assert!(!row(&tree, "db").selected);

        tokio::task::yield_now().await;
        assert_eq!(api.commands(), vec![(ServerCommand::Start, "db".to_string())]);
    }

    #[tokio::test]
    async fn selection_cleared_when_server_leaves_config() {
        let (mut state, api) = state_with(&["web", "db"], &[]).await;
        state.dispatch(ViewEvent::RowClicked("db".to_string()));
        assert!(matches!(state.render_tree().main, MainPanel::Detail { .. }));

        api.set_configured(&["web"]);
        state.registry.refresh(api.as_ref()).await.unwrap();

        let tree = state.render_tree();
        assert_eq!(state.selection.current(), None);
        assert!(matches!(tree.main, MainPanel::Frontpage { .. }));
    }

    #[tokio::test]
    async fn selection_kept_when_auto_clear_disabled() {
        let api = Arc::new(FakeControlApi::new(&["web", "db"], &[]));
        let settings = Settings {
            clear_selection_on_removal: false,
            ..Settings::default()
        };
        let mut state = AppState::new(settings, api.clone(), Handle::current());
        state.registry.refresh(api.as_ref()).await.unwrap();
        state.dispatch(ViewEvent::RowClicked("db".to_string()));

        api.set_configured(&["web"]);
        state.registry.refresh(api.as_ref()).await.unwrap();

        assert_eq!(
            state.render_tree().main,
            MainPanel::Detail { name: "db".to_string() }
        );
    }
}
