//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "norpie";
const APPLICATION: &str = "hashtag";

const LATEST_LOG: &str = "latest.log";

/// Maximum number of old log files to keep.
const MAX_OLD_LOGS: usize = 25;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Cache directory, home of the log files.
///
/// - Linux: `$XDG_CACHE_HOME/hashtag` or `~/.cache/hashtag`
/// - macOS: `~/Library/Caches/dev.norpie.hashtag`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/hashtag` or `~/.config/hashtag`
/// - macOS: `~/Library/Application Support/dev.norpie.hashtag`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Rename `latest.log` to a timestamped name and drop the oldest logs.
///
/// Call this at startup before creating the new log file.
pub fn rotate_logs() {
    let Some(cache) = cache_dir() else { return };
    rotate_logs_in(&cache);
}

fn rotate_logs_in(cache: &Path) {
    let latest = cache.join(LATEST_LOG);

    if latest.exists() {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let archived = cache.join(format!("{timestamp}.log"));
        let _ = fs::rename(&latest, &archived);
    }

    cleanup_old_logs(cache, MAX_OLD_LOGS);
}

/// Remove archived logs, keeping only the `keep` most recent.
fn cleanup_old_logs(cache: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(cache) else { return };

    let mut logs: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .collect();

    // Oldest first; timestamped names sort the same way
    logs.sort_by_key(|e| {
        let modified = e.metadata().and_then(|m| m.modified()).ok();
        (modified, e.file_name())
    });

    if logs.len() > keep {
        for entry in logs.iter().take(logs.len() - keep) {
            let _ = fs::remove_file(entry.path());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "").unwrap();
    }

    fn log_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_rotate_archives_latest() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), LATEST_LOG);

        rotate_logs_in(dir.path());

        let names = log_names(dir.path());
        assert_eq!(names.len(), 1);
        assert_ne!(names[0], LATEST_LOG);
        assert!(names[0].ends_with(".log"));
    }

    #[test]
    fn test_cleanup_keeps_most_recent() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["20240101_000000.log", "20240102_000000.log", "20240103_000000.log"] {
            touch(dir.path(), name);
        }
        touch(dir.path(), LATEST_LOG);
        touch(dir.path(), "config.json");

        cleanup_old_logs(dir.path(), 1);

        let names = log_names(dir.path());
        assert!(names.contains(&LATEST_LOG.to_string()));
        assert!(names.contains(&"config.json".to_string()));
        assert_eq!(names.iter().filter(|n| n.starts_with("2024")).count(), 1);
    }

    #[test]
    fn test_cleanup_on_missing_dir_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        cleanup_old_logs(&dir.path().join("absent"), 0);
    }
}
