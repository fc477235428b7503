use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::foundation::error::{WavscopeError, WavscopeResult};

/// Directory the frame files are written to.
///
/// A scoped directory is removed when the value is dropped, whether the render succeeded or
/// not. An existing directory is kept.
#[derive(Debug)]
pub struct FrameDir {
    path: PathBuf,
    temp: Option<TempDir>,
}

impl FrameDir {
    /// Fresh uniquely-named directory under `parent`.
    pub fn scoped(parent: &Path) -> WavscopeResult<Self> {
        std::fs::create_dir_all(parent).map_err(|e| {
            WavscopeError::resource(format!("failed to create '{}': {e}", parent.display()))
        })?;
        let temp = tempfile::Builder::new()
            .prefix("wavscope-frames-")
            .tempdir_in(parent)
            .map_err(|e| {
                WavscopeError::resource(format!(
                    "failed to create frame directory under '{}': {e}",
                    parent.display()
                ))
            })?;
        tracing::debug!(path = %temp.path().display(), "created scoped frame directory");
        Ok(Self {
            path: temp.path().to_path_buf(),
            temp: Some(temp),
        })
    }

    pub fn existing(path: impl Into<PathBuf>) -> WavscopeResult<Self> {
        let path = path.into();
        std::fs::create_dir_all(&path).map_err(|e| {
            WavscopeError::resource(format!(
                "failed to create frame directory '{}': {e}",
                path.display()
            ))
        })?;
        Ok(Self { path, temp: None })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_scoped(&self) -> bool {
        self.temp.is_some()
    }

    /// Remove a scoped directory now and report failures instead of ignoring them on drop.
    pub fn close(self) -> WavscopeResult<()> {
        match self.temp {
            Some(temp) => temp.close().map_err(|e| {
                WavscopeError::resource(format!(
                    "failed to remove frame directory '{}': {e}",
                    self.path.display()
                ))
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame_dir.rs"]
mod tests;
