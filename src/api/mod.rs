//! Control API - Client for the process manager daemon's HTTP surface

mod client;
mod error;

use std::collections::HashSet;

use async_trait::async_trait;

pub use client::HttpControlApi;
pub use error::ApiError;

/// Operations the dashboard needs from the process manager daemon.
///
/// The sync engine only talks to the backend through this trait, so tests
/// can drive it with an in-memory fake.
#[async_trait]
pub trait ControlApi: Send + Sync {
    /// Names of all configured servers, in the order the daemon reports them.
    async fn configured_servers(&self) -> Result<Vec<String>, ApiError>;

    /// Names of the servers that are currently running.
    async fn running_servers(&self) -> Result<HashSet<String>, ApiError>;

    /// Ask the daemon to start a server.
    async fn start_server(&self, name: &str) -> Result<(), ApiError>;

    /// Ask the daemon to stop a server.
    async fn stop_server(&self, name: &str) -> Result<(), ApiError>;
}
