// src/core/fs_ops.rs
//! File system operations shared by the offline pipeline and the predictor

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct FsOps;

impl FsOps {
    /// Ensure directory exists
    pub fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            info!("Created directory: {}", path.display());
        }
        Ok(())
    }

    pub fn read_file_safe(path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Write through a sibling temp file and rename it over the target.
    ///
    /// Readers never observe a half-written file, but a crash between the
    /// write and the rename can leave the `.tmp` file behind.
    pub fn write_file_atomic(path: &Path, content: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            Self::ensure_dir_exists(parent)?;
        }

        let tmp_path = Self::temp_path_for(path);
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write file: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to move {} into place at {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        debug!("Written file: {} ({} bytes)", path.display(), content.len());
        Ok(())
    }

    /// Check that every listed path exists, returning the first missing one
    pub fn first_missing<'a>(paths: &[&'a Path]) -> Option<&'a Path> {
        paths.iter().copied().find(|p| !p.exists())
    }

    fn temp_path_for(path: &Path) -> PathBuf {
        let mut name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        path.with_file_name(name)
    }
}
