use directories::ProjectDirs;
use std::path::PathBuf;

use crate::config::StorageBackend;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// `$HOME/.local/state/typi`, or the platform data dir without a `HOME`.
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(PathBuf::from(home).join(".local").join("state").join("typi"))
        } else {
            ProjectDirs::from("", "", "typi").map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
        }
    }

    pub fn db_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("results.db"))
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("typi.log"))
    }

    /// Where the result log of `backend` lives: a directory for file storage,
    /// the database file for sqlite.
    pub fn results_location(backend: StorageBackend) -> Option<PathBuf> {
        match backend {
            StorageBackend::File => Self::state_dir(),
            StorageBackend::Sqlite => Self::db_path(),
        }
    }
}
