use std::fs::OpenOptions;
use std::path::Path;

use crate::config::{ConfigError, ProbeConfig};

/// Logs go to STDERR (or the debug output file) so STDOUT only carries the
/// status line. `RUST_LOG` still applies, `--debug` raises this crate to debug.
pub fn init(config: &ProbeConfig) -> Result<(), ConfigError> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    if config.debug {
        builder.filter_module(env!("CARGO_CRATE_NAME"), log::LevelFilter::Debug);
    }

    if let Some(path) = &config.debug_output {
        let file = open_target(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

fn open_target(path: &Path) -> Result<std::fs::File, ConfigError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| ConfigError::LogTarget {
            path: path.to_path_buf(),
            source,
        })
}
