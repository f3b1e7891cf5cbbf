use crate::api::{QuipApi, QuipPaths};
use crate::config::QuipConfig;
use crate::error::{QuipError, Result};
use crate::model::Scope;
use crate::store::fs_backend::FsBackend;
use directories::{BaseDirs, ProjectDirs};
use std::path::{Path, PathBuf};

/// Overrides the global data directory.
pub const HOME_ENV: &str = "QUIP_HOME";

const PROJECT_DIR: &str = ".quip";

pub struct QuipContext {
    pub api: QuipApi<FsBackend>,
    pub scope: Scope,
    pub config: QuipConfig,
}

/// Find the project root by walking up from cwd looking for a directory
/// that has both .git and .quip. A directory with .git but no .quip does
/// not stop the search, so nested repos fall back to a parent that has one.
/// Returns None on reaching home or the filesystem root.
pub fn find_project_root(cwd: &Path) -> Option<PathBuf> {
    let home_dir = BaseDirs::new().map(|bd| bd.home_dir().to_path_buf());
    let mut current = cwd.to_path_buf();

    loop {
        if current.join(".git").exists() && current.join(PROJECT_DIR).exists() {
            return Some(current);
        }

        if home_dir.as_ref() == Some(&current) {
            return None;
        }

        match current.parent() {
            Some(parent) if parent != current => current = parent.to_path_buf(),
            _ => return None,
        }
    }
}

/// Resolves the global data directory: `QUIP_HOME`, else the platform data dir.
pub fn global_data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "quip", "quip")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| QuipError::Config("Could not determine data directory".to_string()))
}

pub fn initialize(cwd: &Path, use_local: bool) -> Result<QuipContext> {
    let project_dir = find_project_root(cwd)
        .map(|root| root.join(PROJECT_DIR))
        .unwrap_or_else(|| cwd.join(PROJECT_DIR));
    let global_dir = global_data_dir()?;

    let scope = if use_local {
        Scope::Project
    } else {
        Scope::Global
    };

    let config_dir = match scope {
        Scope::Project => &project_dir,
        Scope::Global => &global_dir,
    };
    let config = QuipConfig::load(config_dir)?.with_env_overrides();

    let backend = FsBackend::new(Some(project_dir.clone()), global_dir.clone());
    let paths = QuipPaths {
        project: Some(project_dir),
        global: global_dir,
    };
    let api = QuipApi::open(backend, scope, paths)?;

    Ok(QuipContext { api, scope, config })
}
