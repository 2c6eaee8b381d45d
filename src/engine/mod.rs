//! Access to the container engine.
//!
//! The probe only needs three things from the engine: the list of stopped
//! containers, the full inspect data of one container and whether a container
//! still exists. [`ContainerEngine`] captures exactly that so the probe can run
//! against the docker daemon or an in-memory engine in tests.

use async_trait::async_trait;
use bollard::errors::Error;
use bollard::models::{ContainerInspectResponse, ContainerSummary};

pub mod docker;

/// Container states that mean the container has terminated.
pub const STOPPED_STATES: [&str; 2] = ["exited", "dead"];

#[async_trait]
pub trait ContainerEngine: Send + Sync {
    /// All containers in a stopped state, newest first. When `since` is set
    /// only containers created after that container are returned.
    async fn list_stopped(&self, since: Option<&str>) -> Result<Vec<ContainerSummary>, Error>;

    async fn inspect(&self, id: &str) -> Result<ContainerInspectResponse, Error>;

    async fn exists(&self, id: &str) -> Result<bool, Error> {
        match self.inspect(id).await {
            Ok(_) => Ok(true),
            Err(Error::DockerResponseServerError {
                status_code: 404, ..
            }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Whether the engine reports the container as killed by the OOM killer.
pub fn is_oom_killed(container: &ContainerInspectResponse) -> bool {
    container
        .state
        .as_ref()
        .and_then(|state| state.oom_killed)
        .unwrap_or(false)
}
