//! Persistence of the last processed container id.

use std::path::PathBuf;

use crate::error::{ProbeError, Result};

/// Length of a full docker container id.
pub const CONTAINER_ID_LEN: usize = 64;

#[derive(Debug, Clone, Default)]
pub struct CursorStore {
    path: Option<PathBuf>,
}

impl CursorStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Returns the stored id, or `None` when no path is configured, the file
    /// does not exist yet, or its content is not a full container id.
    pub fn load(&self) -> Result<Option<String>> {
        let Some(path) = &self.path else {
            return Ok(None);
        };

        log::debug!("Load from file {}", path.display());
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ProbeError::CursorRead {
                    path: path.clone(),
                    source,
                });
            }
        };

        let id = content.trim();
        if id.len() != CONTAINER_ID_LEN {
            log::debug!("Ignoring cursor of length {} in {}", id.len(), path.display());
            return Ok(None);
        }

        log::debug!("Loaded container {id} from file");
        Ok(Some(id.to_string()))
    }

    pub fn save(&self, id: &str) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if id.is_empty() {
            return Ok(());
        }

        std::fs::write(path, id).map_err(|source| ProbeError::CursorWrite {
            path: path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn hex_id(len: usize) -> String {
        "0123456789abcdef".chars().cycle().take(len).collect()
    }

    #[test]
    fn test_missing_file_is_no_cursor() {
        let dir = tempfile::tempdir().unwrap();
        let store = CursorStore::new(Some(dir.path().join("last")));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_unset_path_is_noop() {
        let store = CursorStore::default();
        assert_eq!(store.load().unwrap(), None);
        store.save(&hex_id(64)).unwrap();
    }

    #[test]
    fn test_round_trip_and_trimming() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last");
        let store = CursorStore::new(Some(path.clone()));
        let id = hex_id(64);

        store.save(&id).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), id);
        assert_eq!(store.load().unwrap(), Some(id.clone()));

        std::fs::write(&path, format!("  {id}\n")).unwrap();
        assert_eq!(store.load().unwrap(), Some(id));
    }

    #[test]
    fn test_save_overwrites_and_skips_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last");
        let store = CursorStore::new(Some(path.clone()));

        std::fs::write(&path, "something much longer than a container id ".repeat(4)).unwrap();
        store.save(&hex_id(64)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), hex_id(64));

        store.save("").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), hex_id(64));
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = CursorStore::new(Some(dir.path().join("missing").join("last")));
        assert!(matches!(
            store.save(&hex_id(64)),
            Err(ProbeError::CursorWrite { .. })
        ));
    }

    #[quickcheck]
    fn prop_only_full_length_ids_survive(len: u8) -> bool {
        let dir = tempfile::tempdir().unwrap();
        let store = CursorStore::new(Some(dir.path().join("last")));
        let id = hex_id(len as usize);
        store.save(&id).unwrap();

        let loaded = store.load().unwrap();
        if len as usize == CONTAINER_ID_LEN {
            loaded == Some(id)
        } else {
            loaded.is_none()
        }
    }
}
