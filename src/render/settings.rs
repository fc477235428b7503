use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::error::{WavscopeError, WavscopeResult},
    raster::CodecKind,
};

/// User-facing knobs for one render run.
///
/// Every field has a default, so a settings file only needs the values it overrides.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VideoSettings {
    /// Frames per second of the output video.
    pub frame_rate: u32,
    pub screen_width: u32,
    pub screen_height: u32,
    /// Image encoding used for every frame.
    pub codec: CodecKind,
    /// Size of the frame worker pool.
    pub workers: usize,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            frame_rate: 24,
            screen_width: 1280,
            screen_height: 720,
            codec: CodecKind::Bmp,
            workers: default_workers(),
        }
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism().map_or(4, |n| n.get())
}

impl VideoSettings {
    pub fn validate(&self) -> WavscopeResult<()> {
        if self.frame_rate == 0 {
            return Err(WavscopeError::config("frame_rate must be non-zero"));
        }
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(WavscopeError::config(format!(
                "screen size must be non-zero, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        if self.screen_height > u32::from(u16::MAX) {
            return Err(WavscopeError::config(format!(
                "screen_height {} exceeds {}",
                self.screen_height,
                u16::MAX
            )));
        }
        if self.workers == 0 {
            return Err(WavscopeError::config("workers must be non-zero"));
        }
        Ok(())
    }

    /// Load settings from a JSON file and validate them.
    pub fn from_json_path(path: &Path) -> WavscopeResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read settings file '{}'", path.display()))?;
        let settings: Self = serde_json::from_str(&text).map_err(|e| {
            WavscopeError::config(format!("invalid settings file '{}': {e}", path.display()))
        })?;
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/settings.rs"]
mod tests;
