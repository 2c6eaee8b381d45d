use std::path::PathBuf;

use crate::config::ConfigError;
use crate::status::{Report, Status};

pub type Result<T> = std::result::Result<T, ProbeError>;

/// Failures that end a run. Every one of them is reported as UNKNOWN.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Connect to docker: {0}")]
    Connect(#[source] bollard::errors::Error),
    #[error("List docker containers: {0}")]
    List(#[source] bollard::errors::Error),
    #[error("Container {id} inspect error: {source}")]
    Inspect {
        id: String,
        #[source]
        source: bollard::errors::Error,
    },
    #[error("Prepare template failed: {0}")]
    TemplateCompile(#[source] minijinja::Error),
    #[error("Execute template failed: {0}")]
    TemplateRender(#[source] minijinja::Error),
    #[error("Read file {} failed: {source}", path.display())]
    CursorRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Write to file {} failed: {source}", path.display())]
    CursorWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ProbeError {
    pub fn status(&self) -> Status {
        Status::Unknown
    }
}

impl From<ProbeError> for Report {
    fn from(err: ProbeError) -> Self {
        Report {
            status: err.status(),
            summary: err.to_string(),
        }
    }
}
