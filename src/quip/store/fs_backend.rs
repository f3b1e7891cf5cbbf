use super::backend::StorageBackend;
use crate::error::{QuipError, Result};
use crate::model::Scope;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Filesystem backend: one file per durable key inside the scope directory.
///
/// The session area is process memory, so it is gone when the process exits.
pub struct FsBackend {
    project_root: Option<PathBuf>,
    global_root: PathBuf,
    session: RefCell<HashMap<(Scope, String), String>>,
}

impl FsBackend {
    pub fn new(project_root: Option<PathBuf>, global_root: PathBuf) -> Self {
        Self {
            project_root,
            global_root,
            session: RefCell::new(HashMap::new()),
        }
    }

    fn root(&self, scope: Scope) -> Result<PathBuf> {
        let root = match scope {
            Scope::Project => self.project_root.as_ref().ok_or_else(|| {
                QuipError::Store("No project scope available".to_string())
            })?,
            Scope::Global => &self.global_root,
        };
        Ok(root.clone())
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(QuipError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read(&self, scope: Scope, key: &str) -> Result<Option<String>> {
        let path = self.root(scope)?.join(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(QuipError::Io)?;
        Ok(Some(content))
    }

    fn write(&self, scope: Scope, key: &str, value: &str) -> Result<()> {
        let root = self.root(scope)?;
        self.ensure_dir(&root)?;

        let tmp_file = root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp_file, value).map_err(QuipError::Io)?;
        fs::rename(&tmp_file, root.join(key)).map_err(QuipError::Io)?;

        debug!(key, root = %root.display(), "wrote durable key");
        Ok(())
    }

    fn read_session(&self, scope: Scope, key: &str) -> Result<Option<String>> {
        Ok(self.session.borrow().get(&(scope, key.to_string())).cloned())
    }

    fn write_session(&self, scope: Scope, key: &str, value: &str) -> Result<()> {
        self.session
            .borrow_mut()
            .insert((scope, key.to_string()), value.to_string());
        Ok(())
    }

    fn remove_session(&self, scope: Scope, key: &str) -> Result<()> {
        self.session.borrow_mut().remove(&(scope, key.to_string()));
        Ok(())
    }

    fn scope_available(&self, scope: Scope) -> bool {
        match scope {
            Scope::Project => self.project_root.is_some(),
            Scope::Global => true,
        }
    }
}
