use crate::{
    container::header::HeaderData,
    foundation::{
        core::decimal_digits,
        error::{WavscopeError, WavscopeResult},
    },
    raster::CodecKind,
    render::settings::VideoSettings,
};

/// Per-run frame layout derived from the header and the settings.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameGeometry {
    pub frame_rate: u32,
    pub screen_width: u32,
    pub screen_height: u32,
    /// Samples drawn per frame: `floor(sample_rate / frame_rate)`.
    pub points_per_frame: u64,
    /// Horizontal distance between consecutive points, in pixels.
    pub point_spacing: f64,
    /// `frame_rate * runtime_secs`.
    pub total_frames: u64,
    /// Zero-padding width of frame file numbers.
    pub digit_width: usize,
    pub channels: usize,
    pub samples_per_channel: usize,
    pub codec: CodecKind,
}

impl FrameGeometry {
    pub fn new(header: &HeaderData, settings: &VideoSettings) -> WavscopeResult<Self> {
        settings.validate()?;

        let sample_rate = header.fmt.sample_rate;
        let points_per_frame = u64::from(sample_rate / settings.frame_rate);
        if points_per_frame == 0 {
            return Err(WavscopeError::config(format!(
                "frame rate {} exceeds sample rate {sample_rate}; no samples per frame",
                settings.frame_rate
            )));
        }

        let total_frames = u64::from(settings.frame_rate)
            .checked_mul(header.derived.runtime_secs)
            .ok_or_else(|| WavscopeError::config("total frame count overflows u64"))?;

        Ok(Self {
            frame_rate: settings.frame_rate,
            screen_width: settings.screen_width,
            screen_height: settings.screen_height,
            points_per_frame,
            point_spacing: f64::from(settings.screen_width) / points_per_frame as f64,
            total_frames,
            digit_width: decimal_digits(total_frames),
            channels: usize::from(header.fmt.channels),
            samples_per_channel: header.derived.total_samples,
            codec: settings.codec,
        })
    }

    /// Column of point `p` within a frame, truncated toward zero.
    pub fn column(&self, point: u64) -> u32 {
        (point as f64 * self.point_spacing).floor() as u32
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/geometry.rs"]
mod tests;
