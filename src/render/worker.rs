use std::path::{Path, PathBuf};

use crate::{
    foundation::{
        core::FrameIndex,
        error::{WavscopeError, WavscopeResult},
    },
    raster::RasterImage,
    render::{geometry::FrameGeometry, shared::SharedSamples},
};

/// Everything one worker needs to produce one frame file.
#[derive(Clone, Copy, Debug)]
pub struct FrameTask<'a> {
    pub frame: FrameIndex,
    pub geometry: &'a FrameGeometry,
    pub shared: &'a SharedSamples,
    pub out_dir: &'a Path,
}

impl FrameTask<'_> {
    /// `<out_dir>/frame-<zero-padded index>.<ext>`
    pub fn output_path(&self) -> PathBuf {
        self.out_dir.join(
            self.frame
                .file_name(self.geometry.digit_width, self.geometry.codec.extension()),
        )
    }
}

/// Draw the frame's slice of samples onto a fresh image.
///
/// Point `p` lands at column `floor(p * point_spacing)` and at the row averaged over every
/// channel. Both coordinates are clamped to the last column/row.
pub fn rasterize_frame(task: &FrameTask<'_>) -> WavscopeResult<Box<dyn RasterImage>> {
    let geometry = task.geometry;
    let mut image = geometry
        .codec
        .create(geometry.screen_width, geometry.screen_height)?;
    let foreground = geometry.codec.foreground();
    let max_x = geometry.screen_width - 1;
    let max_y = geometry.screen_height - 1;

    let start = task.frame.0.saturating_mul(geometry.points_per_frame);
    for p in 0..geometry.points_per_frame {
        let Ok(i) = usize::try_from(start.saturating_add(p)) else {
            break;
        };
        let Some(row) = task.shared.averaged_row(i) else {
            break;
        };
        let x = geometry.column(p).min(max_x);
        let y = u32::from(row).min(max_y);
        image.draw_point(x, y, foreground);
    }
    Ok(image)
}

/// Rasterize one frame and write it to [`FrameTask::output_path`].
pub fn render_frame_to_disk(task: &FrameTask<'_>) -> WavscopeResult<PathBuf> {
    let image = rasterize_frame(task)?;
    let path = task.output_path();
    std::fs::write(&path, image.to_file_buffer()).map_err(|e| {
        WavscopeError::render(format!(
            "failed to write frame {} to '{}': {e}",
            task.frame.0,
            path.display()
        ))
    })?;
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/unit/render/worker.rs"]
mod tests;
