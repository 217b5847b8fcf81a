//! Configuration of the `fsds` binary.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Directories and the origin-unit kind. Every key is optional; missing keys
/// fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FsdsConfig {
  /// Holds `secfsdstools.db`.
  pub db_dir:       PathBuf,
  /// Quarterly zip archives.
  pub download_dir: PathBuf,
  /// Root of the converted parquet directories.
  pub parquet_dir:  PathBuf,
  pub file_type:    String,
}

impl Default for FsdsConfig {
  fn default() -> Self {
    Self {
      db_dir:       PathBuf::from("db"),
      download_dir: PathBuf::from("dld"),
      parquet_dir:  PathBuf::from("parquet"),
      file_type:    "quarter".to_string(),
    }
  }
}

impl FsdsConfig {
  /// Read `path` if it exists, then apply `FSDS_*` environment variables.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("FSDS"))
      .build()
      .context("failed to read config file")?;

    let cfg: Self = settings
      .try_deserialize()
      .context("failed to deserialise FsdsConfig")?;
    Ok(cfg.expanded())
  }

  fn expanded(self) -> Self {
    Self {
      db_dir:       expand_tilde(&self.db_dir),
      download_dir: expand_tilde(&self.download_dir),
      parquet_dir:  expand_tilde(&self.parquet_dir),
      file_type:    self.file_type,
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
