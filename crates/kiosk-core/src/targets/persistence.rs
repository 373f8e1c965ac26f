//! Targets file and offline page on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::targets::errors::TargetError;
use crate::targets::types::{Target, TargetList};

const OFFLINE_PAGE: &str = include_str!("../../assets/offline.html");

/// Load the targets file, creating it with `default` when it does not exist.
///
/// One target per line; blank lines are skipped. A file without any target
/// falls back to `default` without being rewritten.
pub fn load_or_create(path: &Path, default: &Target) -> Result<TargetList, TargetError> {
    if !path.exists() {
        write_file(path, &format!("{}\n", default))?;
        info!(
            event = "core.targets.file_created",
            path = %path.display(),
            target = %default
        );
        return Ok(TargetList::single(default.clone()));
    }

    let content = fs::read_to_string(path).map_err(|source| TargetError::ReadFailed {
        path: path.display().to_string(),
        source,
    })?;

    let targets: Vec<Target> = content
        .lines()
        .filter_map(|line| Target::new(line).ok())
        .collect();

    match TargetList::from_targets(targets) {
        Some(list) => {
            info!(
                event = "core.targets.file_loaded",
                path = %path.display(),
                count = list.len(),
                current = %list.current()
            );
            Ok(list)
        }
        None => {
            warn!(
                event = "core.targets.file_empty",
                path = %path.display(),
                fallback = %default
            );
            Ok(TargetList::single(default.clone()))
        }
    }
}

/// Write the bundled offline page into `dir` if missing and return its `file://` target.
pub fn ensure_offline_page(dir: &Path, file_name: &str) -> Result<Target, TargetError> {
    let path = dir.join(file_name);
    if !path.exists() {
        write_file(&path, OFFLINE_PAGE)?;
        info!(
            event = "core.targets.offline_page_written",
            path = %path.display()
        );
    }

    let absolute = absolute_path(&path);
    Target::new(format!("file://{}", absolute.display()))
}

fn absolute_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), TargetError> {
    let to_error = |source| TargetError::WriteFailed {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(path, content).map_err(to_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_target() -> Target {
        Target::new("http://default.example/").unwrap()
    }

    #[test]
    fn test_missing_file_is_created_with_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("targets.txt");

        let list = load_or_create(&path, &default_target()).unwrap();

        assert_eq!(list.current(), &default_target());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "http://default.example/\n"
        );
    }

    #[test]
    fn test_first_line_is_current_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("targets.txt");
        fs::write(&path, "http://one\n\nhttp://two\n").unwrap();

        let mut list = load_or_create(&path, &default_target()).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.current().as_str(), "http://one");
        assert_eq!(list.advance().as_str(), "http://two");
    }

    #[test]
    fn test_blank_file_falls_back_without_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("targets.txt");
        fs::write(&path, "\n   \n").unwrap();

        let list = load_or_create(&path, &default_target()).unwrap();

        assert_eq!(list.current(), &default_target());
        assert_eq!(fs::read_to_string(&path).unwrap(), "\n   \n");
    }

    #[test]
    fn test_offline_page_written_once() {
        let dir = tempfile::tempdir().unwrap();

        let target = ensure_offline_page(dir.path(), "offline.html").unwrap();
        let path = dir.path().join("offline.html");

        assert!(target.as_str().starts_with("file://"));
        assert!(target.as_str().ends_with("offline.html"));
        assert!(fs::read_to_string(&path).unwrap().contains("<html"));

        fs::write(&path, "custom").unwrap();
        ensure_offline_page(dir.path(), "offline.html").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "custom");
    }
}
