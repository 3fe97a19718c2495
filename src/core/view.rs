//! View composer - Pure projection of registry and selection into a render tree
//!
//! The UI paints whatever `compose` returns and reports clicks back as
//! `ViewEvent`s. Nothing here holds state.

use chrono::{DateTime, Utc};

use super::server::Snapshot;

/// Title shown at the top of the navigation panel
pub const NAV_TITLE: &str = "goprocmgr";

/// Text shown in the main panel when nothing is selected
pub const FRONTPAGE_MESSAGE: &str = "Select a server to view its logs :)";

/// One server row in the navigation list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavRow {
    pub name: String,
    pub running: bool,
    pub selected: bool,
    /// An optimistic command is waiting for a poll to confirm it
    pub pending: bool,
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavPanel {
    pub title: &'static str,
    pub rows: Vec<NavRow>,
    pub running_count: usize,
    pub total_count: usize,
    pub last_poll: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainPanel {
    /// Nothing selected
    Frontpage { message: &'static str },
    /// Detail placeholder keyed by the selected server
    Detail { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTree {
    pub nav: NavPanel,
    pub main: MainPanel,
}

/// Operator interactions with the rendered tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// The navigation title was clicked
    TitleClicked,
    /// A row was clicked outside its toggle switch
    RowClicked(String),
    /// A row's toggle switch was clicked
    ToggleClicked(String),
}

pub fn compose(snapshot: &Snapshot, selection: Option<&str>) -> RenderTree {
    let rows = snapshot
        .entries()
        .iter()
        .map(|entry| NavRow {
            name: entry.name.clone(),
            running: entry.running,
            selected: selection == Some(entry.name.as_str()),
            pending: entry.is_pending(),
            status: entry.status_label(),
        })
        .collect();

    let main = match selection {
        None => MainPanel::Frontpage {
            message: FRONTPAGE_MESSAGE,
        },
        Some(name) => MainPanel::Detail {
            name: name.to_string(),
        },
    };

    RenderTree {
        nav: NavPanel {
            title: NAV_TITLE,
            rows,
            running_count: snapshot.running_count(),
            total_count: snapshot.len(),
            last_poll: snapshot.polled_at(),
        },
        main,
    }
}
