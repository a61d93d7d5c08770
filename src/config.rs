//! Where the limit store lives.
//!
//! Resolution order: explicit path (CLI flag) → `LHCTODD_DATA_DIR` →
//! the `data/` directory shipped next to the crate.

use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "LHCTODD_DATA_DIR";

/// Directory name of the LMDB environment inside the data directory.
pub const STORE_DIR: &str = "darkmatter-data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let data_dir = std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        log::debug!("data directory: {}", data_dir.display());
        Self { data_dir }
    }

    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// `--data-dir` wins over the environment when given.
    pub fn resolve(data_dir: Option<&Path>) -> Self {
        match data_dir {
            Some(dir) => Self::with_data_dir(dir),
            None => Self::from_env(),
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_DIR)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn default_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}
