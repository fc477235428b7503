use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::{
    container::header::HeaderData,
    foundation::error::{WavscopeError, WavscopeResult},
    render::geometry::FrameGeometry,
};

/// Inputs for one `ffmpeg` mux of numbered frames plus the original audio.
#[derive(Clone, Debug, PartialEq)]
pub struct MuxConfig {
    /// Directory holding `frame-<n>.<ext>` files.
    pub frame_dir: PathBuf,
    pub digit_width: usize,
    /// Frame file extension without the dot.
    pub extension: String,
    pub frame_rate: u32,
    pub audio_path: PathBuf,
    pub channels: u16,
    /// Output duration in whole seconds.
    pub runtime_secs: u64,
    pub width: u32,
    pub height: u32,
    pub out_path: PathBuf,
    pub overwrite: bool,
}

impl MuxConfig {
    /// Config for muxing frames rendered with `geometry` from the audio at `audio_path`.
    pub fn for_render(
        header: &HeaderData,
        geometry: &FrameGeometry,
        frame_dir: &Path,
        audio_path: &Path,
        out_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            frame_dir: frame_dir.to_path_buf(),
            digit_width: geometry.digit_width,
            extension: geometry.codec.extension().to_string(),
            frame_rate: geometry.frame_rate,
            audio_path: audio_path.to_path_buf(),
            channels: header.fmt.channels,
            runtime_secs: header.derived.runtime_secs,
            width: geometry.screen_width,
            height: geometry.screen_height,
            out_path: out_path.into(),
            overwrite: true,
        }
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn validate(&self) -> WavscopeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(WavscopeError::config("mux width/height must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            // libx264 with yuv420p needs even dimensions.
            return Err(WavscopeError::config(format!(
                "mux width/height must be even for yuv420p output, got {}x{}",
                self.width, self.height
            )));
        }
        if self.frame_rate == 0 {
            return Err(WavscopeError::config("mux frame rate must be non-zero"));
        }
        if self.channels == 0 {
            return Err(WavscopeError::config("mux audio channels must be non-zero"));
        }
        if self.digit_width == 0 || self.extension.is_empty() {
            return Err(WavscopeError::config(
                "mux frame pattern needs a digit width and an extension",
            ));
        }
        Ok(())
    }

    /// printf-style input pattern understood by ffmpeg's image2 demuxer.
    pub fn frame_pattern(&self) -> String {
        format!("frame-%0{}d.{}", self.digit_width, self.extension)
    }

    /// The full `ffmpeg` invocation, not yet spawned.
    pub fn build_command(&self) -> Command {
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        cmd.arg(if self.overwrite { "-y" } else { "-n" });
        cmd.args([
            "-loglevel",
            "error",
            "-framerate",
            &self.frame_rate.to_string(),
            "-i",
        ])
        .arg(self.frame_dir.join(self.frame_pattern()))
        .arg("-i")
        .arg(&self.audio_path)
        .args([
            "-map",
            "0:v:0",
            "-map",
            "1:a:0",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-s",
            &format!("{}x{}", self.width, self.height),
            "-r",
            &self.frame_rate.to_string(),
            "-ac",
            &self.channels.to_string(),
            "-t",
            &self.runtime_secs.to_string(),
            "-movflags",
            "+faststart",
        ])
        .arg(&self.out_path);
        cmd
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> WavscopeResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Run `ffmpeg` to completion for `cfg`.
#[tracing::instrument(skip_all, fields(out = %cfg.out_path.display()))]
pub fn mux(cfg: &MuxConfig) -> WavscopeResult<()> {
    cfg.validate()?;
    ensure_parent_dir(&cfg.out_path)?;

    if !cfg.overwrite && cfg.out_path.exists() {
        return Err(WavscopeError::config(format!(
            "output file '{}' already exists",
            cfg.out_path.display()
        )));
    }
    if !is_ffmpeg_on_path() {
        return Err(WavscopeError::encode(
            "ffmpeg is required for video output, but was not found on PATH",
        ));
    }

    let started = std::time::Instant::now();
    let output = cfg.build_command().output().map_err(|e| {
        WavscopeError::encode(format!(
            "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
        ))
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        tracing::error!(status = %output.status, "ffmpeg failed");
        return Err(WavscopeError::encode(format!(
            "ffmpeg exited with status {}: {}",
            output.status,
            stderr.trim()
        )));
    }
    tracing::info!(elapsed_ms = started.elapsed().as_millis(), "wrote video");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
