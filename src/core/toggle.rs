//! Toggle controller - Turns a click on a server's switch into a command

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::registry::ServerRegistry;
use crate::api::ControlApi;

/// Command sent to the daemon for one server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerCommand {
    Start,
    Stop,
}

impl ServerCommand {
    /// The command that flips a server from its current state
    pub fn flipping(running: bool) -> Self {
        if running {
            Self::Stop
        } else {
            Self::Start
        }
    }

    /// Running state the server should end up in
    pub fn target_running(&self) -> bool {
        matches!(self, Self::Start)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

/// Issues start/stop commands and applies the optimistic state flip
#[derive(Clone)]
pub struct ToggleController {
    registry: ServerRegistry,
    api: Arc<dyn ControlApi>,
    runtime: Handle,
}

impl ToggleController {
    pub fn new(registry: ServerRegistry, api: Arc<dyn ControlApi>, runtime: Handle) -> Self {
        Self {
            registry,
            api,
            runtime,
        }
    }

    /// Start `name` if it is stopped, stop it if it is running.
    ///
    /// The registry is updated right away and the command is sent in the
    /// background. A second toggle before the next poll reads the optimistic
    /// state, so repeated clicks alternate. Polls cannot revert the flip
    /// until the daemon has answered.
    ///
    /// Returns the command chosen and the task sending it.
    pub fn toggle(&self, name: &str) -> (ServerCommand, JoinHandle<()>) {
        let command = ServerCommand::flipping(self.registry.is_running(name));
        info!("Requesting {} of '{}'", command.label(), name);

        self.registry.set_running(name, command.target_running());
        let task = self.issue(command, name.to_string());

        (command, task)
    }

    fn issue(&self, command: ServerCommand, name: String) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let registry = self.registry.clone();
        self.runtime.spawn(async move {
            let result = match command {
                ServerCommand::Start => api.start_server(&name).await,
                ServerCommand::Stop => api.stop_server(&name).await,
            };
            if let Err(e) = &result {
                warn!("Failed to {} '{}': {}", command.label(), name, e);
            }
            // The next poll reconciles the registry either way
            registry.command_settled(&name, command.target_running());
        })
    }
}
