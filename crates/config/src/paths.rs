//! Path utilities

use std::io;
use std::path::{Path, PathBuf};

/// Data directory (~/.basedagent)
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .expect("could not locate home directory")
        .join(".basedagent")
}

/// Config file location
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}

/// Create a directory and any missing parents
pub async fn ensure_dir(path: impl AsRef<Path>) -> io::Result<()> {
    tokio::fs::create_dir_all(path).await
}
