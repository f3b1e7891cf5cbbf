use crate::commands::{CmdMessage, CmdResult, QuipPaths};
use crate::error::Result;
use crate::model::Scope;
use std::fs;

pub fn run(paths: &QuipPaths, scope: Scope) -> Result<CmdResult> {
    let dir = paths.scope_dir(scope)?;
    fs::create_dir_all(&dir)?;
    let mut result = CmdResult::default().with_paths(vec![dir.clone()]);
    result.add_message(CmdMessage::success(format!(
        "Initialized quip store at {}",
        dir.display()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_scope_directory() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("nested").join(".quip");
        let paths = QuipPaths {
            project: Some(target.clone()),
            global: dir.path().to_path_buf(),
        };

        let result = run(&paths, Scope::Project).unwrap();
        assert!(target.is_dir());
        assert_eq!(result.paths, vec![target]);
    }
}
