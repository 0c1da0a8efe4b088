use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AutofillError;
use crate::store::state_store::{Scope, StateStore};

/// On-disk layout of a [`FileStore`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreFile {
    #[serde(default)]
    pub persistent: BTreeMap<String, String>,
    #[serde(default)]
    pub session: BTreeMap<String, String>,
}

/// A state store backed by a single JSON file.
///
/// The file is read once on open and rewritten after every mutation, so the
/// CLI sees the same preference, remembered targets and submit marker
/// across invocations. A missing file is an empty store.
pub struct FileStore {
    path: PathBuf,
    data: StoreFile,
}

impl FileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AutofillError> {
        let path = path.as_ref().to_path_buf();
        let data = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => StoreFile::default(),
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| AutofillError::JsonParse {
                    context: format!("state store {}", path.display()),
                    source: e,
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreFile::default(),
            Err(e) => {
                return Err(AutofillError::StoreIo {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };
        Ok(FileStore { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contents(&self) -> &StoreFile {
        &self.data
    }

    /// Drop the session scope and persist the result.
    pub fn end_session(&mut self) -> Result<(), AutofillError> {
        self.data.session.clear();
        self.flush()
    }

    fn map(&self, scope: Scope) -> &BTreeMap<String, String> {
        match scope {
            Scope::Persistent => &self.data.persistent,
            Scope::Session => &self.data.session,
        }
    }

    fn map_mut(&mut self, scope: Scope) -> &mut BTreeMap<String, String> {
        match scope {
            Scope::Persistent => &mut self.data.persistent,
            Scope::Session => &mut self.data.session,
        }
    }

    fn flush(&self) -> Result<(), AutofillError> {
        let json =
            serde_json::to_string_pretty(&self.data).map_err(|e| AutofillError::JsonSerialize {
                context: "state store".into(),
                source: e,
            })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| AutofillError::StoreIo {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        std::fs::write(&self.path, json).map_err(|e| AutofillError::StoreIo {
            path: self.path.display().to_string(),
            source: e,
        })
    }
}

impl StateStore for FileStore {
    fn get(&self, scope: Scope, key: &str) -> Option<String> {
        self.map(scope).get(key).cloned()
    }

    fn set(&mut self, scope: Scope, key: &str, value: &str) -> Result<(), AutofillError> {
        self.map_mut(scope)
            .insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, scope: Scope, key: &str) -> Result<(), AutofillError> {
        if self.map_mut(scope).remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
