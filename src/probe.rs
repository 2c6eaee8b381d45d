//! One pass over the stopped containers.
//!
//! The engine lists containers newest first. They are walked in reverse so
//! findings are reported in the order the containers were created, and the
//! last container visited (the newest one) becomes the cursor for the next
//! run whether or not it was OOM killed.

use crate::config::ProbeConfig;
use crate::cursor::CursorStore;
use crate::engine::{ContainerEngine, is_oom_killed};
use crate::error::{ProbeError, Result};
use crate::notify::Notifier;
use crate::report::ReportFormatter;
use crate::status::{Check, Status};

pub const NO_OOM_MESSAGE: &str = "No OOM killed container";

pub async fn run(
    engine: &dyn ContainerEngine,
    config: &ProbeConfig,
    notifier: Option<&Notifier>,
) -> Result<Check> {
    let formatter = ReportFormatter::new(&config.format).map_err(ProbeError::TemplateCompile)?;
    let cursor = CursorStore::new(config.cursor_file.clone());

    let since = resolve_since(engine, &cursor).await?;
    let containers = engine
        .list_stopped(since.as_deref())
        .await
        .map_err(ProbeError::List)?;
    log::debug!("{} stopped containers to inspect", containers.len());

    let mut check = Check::new();
    let mut newest: Option<&str> = None;

    for summary in containers.iter().rev() {
        let Some(id) = summary.id.as_deref() else {
            continue;
        };

        let info = engine
            .inspect(id)
            .await
            .map_err(|source| ProbeError::Inspect {
                id: id.to_string(),
                source,
            })?;

        if is_oom_killed(&info) {
            log::debug!("Container {id} was OOM killed");
            let message = formatter.render(&info).map_err(ProbeError::TemplateRender)?;
            if let Some(notifier) = notifier {
                notifier.notify(&info, &message).await;
            }
            check.add_result(config.severity.into(), message);
        }

        newest = Some(id);
    }

    log::debug!("{} OOM killed containers found", check.results().len());
    if let Some(id) = newest {
        cursor.save(id)?;
    }

    check.add_result(Status::Ok, NO_OOM_MESSAGE);
    Ok(check)
}

/// The stored cursor, as long as the engine still knows that container.
async fn resolve_since(
    engine: &dyn ContainerEngine,
    cursor: &CursorStore,
) -> Result<Option<String>> {
    let Some(id) = cursor.load()? else {
        return Ok(None);
    };

    let exists = engine
        .exists(&id)
        .await
        .map_err(|source| ProbeError::Inspect {
            id: id.clone(),
            source,
        })?;
    if !exists {
        log::debug!("Loaded container {id} doesn't exist anymore");
        return Ok(None);
    }
    Ok(Some(id))
}
