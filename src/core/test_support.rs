//! In-memory control API for exercising the sync engine in tests

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::toggle::ServerCommand;
use crate::api::{ApiError, ControlApi};

#[derive(Default)]
struct FakeState {
    configured: Vec<String>,
    running: HashSet<String>,
    fail_config: bool,
    fail_runner: bool,
    config_requests: usize,
    commands: Vec<(ServerCommand, String)>,
    command_gate: Option<Arc<Notify>>,
}

/// Fake daemon. Commands are recorded but never change the reported
/// running set; tests move that explicitly with `set_running`.
#[derive(Default)]
pub struct FakeControlApi {
    state: Mutex<FakeState>,
}

impl FakeControlApi {
    pub fn new(configured: &[&str], running: &[&str]) -> Self {
        let api = Self::default();
        api.set_configured(configured);
        api.set_running(running);
        api
    }

    pub fn set_configured(&self, names: &[&str]) {
        self.state.lock().unwrap().configured = names.iter().map(|n| n.to_string()).collect();
    }

    pub fn set_running(&self, names: &[&str]) {
        self.state.lock().unwrap().running = names.iter().map(|n| n.to_string()).collect();
    }

    pub fn fail_config_requests(&self, fail: bool) {
        self.state.lock().unwrap().fail_config = fail;
    }

    pub fn fail_runner_requests(&self, fail: bool) {
        self.state.lock().unwrap().fail_runner = fail;
    }

    /// Hold every start/stop command until the returned gate is notified
    pub fn hold_commands(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state.lock().unwrap().command_gate = Some(Arc::clone(&gate));
        gate
    }

    pub fn commands(&self) -> Vec<(ServerCommand, String)> {
        self.state.lock().unwrap().commands.clone()
    }

    pub fn config_requests(&self) -> usize {
        self.state.lock().unwrap().config_requests
    }

    fn unreachable(endpoint: &str) -> ApiError {
        ApiError::Status {
            endpoint: endpoint.to_string(),
            status: 503,
        }
    }

    async fn record(&self, command: ServerCommand, name: &str) -> Result<(), ApiError> {
        let gate = {
            let mut state = self.state.lock().unwrap();
            state.commands.push((command, name.to_string()));
            state.command_gate.clone()
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(())
    }
}

#[async_trait]
impl ControlApi for FakeControlApi {
    async fn configured_servers(&self) -> Result<Vec<String>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.config_requests += 1;
        if state.fail_config {
            return Err(Self::unreachable("GET /api/config"));
        }
        Ok(state.configured.clone())
    }

    async fn running_servers(&self) -> Result<HashSet<String>, ApiError> {
        let state = self.state.lock().unwrap();
        if state.fail_runner {
            return Err(Self::unreachable("GET /api/runner"));
        }
        Ok(state.running.clone())
    }

    async fn start_server(&self, name: &str) -> Result<(), ApiError> {
        self.record(ServerCommand::Start, name).await
    }

    async fn stop_server(&self, name: &str) -> Result<(), ApiError> {
        self.record(ServerCommand::Stop, name).await
    }
}
