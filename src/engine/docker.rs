//! Docker engine access using bollard.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use bollard::Docker;
use bollard::errors::Error;
use bollard::models::{ContainerInspectResponse, ContainerSummary};
use bollard::query_parameters::{
    InspectContainerOptions, InspectContainerOptionsBuilder, ListContainersOptions,
};

use super::{ContainerEngine, STOPPED_STATES};
use crate::error::{ProbeError, Result};

const CONNECT_TIMEOUT_SECS: u64 = 120;

/// Connect to the docker daemon.
///
/// Without a socket path this uses the default connection method (the
/// `DOCKER_HOST` variable, else the local unix socket or named pipe).
pub fn connect(socket: Option<&Path>) -> Result<Docker> {
    let docker = match socket {
        Some(socket) => Docker::connect_with_unix(
            &socket.to_string_lossy(),
            CONNECT_TIMEOUT_SECS,
            bollard::API_DEFAULT_VERSION,
        ),
        None => Docker::connect_with_local_defaults(),
    };
    docker.map_err(ProbeError::Connect)
}

fn list_options(since: Option<&str>) -> ListContainersOptions {
    ListContainersOptions {
        all: true,
        filters: Some(list_filters(since)),
        ..Default::default()
    }
}

fn list_filters(since: Option<&str>) -> HashMap<String, Vec<String>> {
    let mut filters = HashMap::new();
    filters.insert(
        "status".to_string(),
        STOPPED_STATES.iter().map(|s| s.to_string()).collect(),
    );
    if let Some(since) = since {
        filters.insert("since".to_string(), vec![since.to_string()]);
    }
    filters
}

#[async_trait]
impl ContainerEngine for Docker {
    async fn list_stopped(
        &self,
        since: Option<&str>,
    ) -> std::result::Result<Vec<ContainerSummary>, Error> {
        self.list_containers(Some(list_options(since))).await
    }

    async fn inspect(&self, id: &str) -> std::result::Result<ContainerInspectResponse, Error> {
        let options: InspectContainerOptions = InspectContainerOptionsBuilder::new().build();
        self.inspect_container(id, Some(options)).await
    }
}
