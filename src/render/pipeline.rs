use std::path::Path;
use std::time::Instant;

use anyhow::Context as _;

use crate::{
    container::{decode::decode_header, header::HeaderData},
    foundation::error::{WavscopeError, WavscopeResult},
    normalize::pass::{NormalizedMatrix, normalize_matrix},
    render::{
        frame_dir::FrameDir,
        geometry::FrameGeometry,
        scheduler::{RenderStats, run_stride_schedule},
        settings::VideoSettings,
        shared::SharedSamples,
        worker::{FrameTask, render_frame_to_disk},
    },
    samples::decode::decode_samples,
};

/// Decoded, normalized input ready for rendering.
#[derive(Clone, Debug)]
pub struct PreparedInput {
    pub header: HeaderData,
    pub normalized: NormalizedMatrix,
    pub geometry: FrameGeometry,
}

/// Decode the header and samples of `bytes`, normalize them to the screen, and derive geometry.
///
/// Every failure here happens before any frame is written.
#[tracing::instrument(skip(bytes, settings), fields(len = bytes.len()))]
pub fn prepare_input(bytes: &[u8], settings: &VideoSettings) -> WavscopeResult<PreparedInput> {
    settings.validate()?;

    let t0 = Instant::now();
    let (header, _offset) = decode_header(bytes)?;
    tracing::info!(elapsed_ms = t0.elapsed().as_millis(), "read header data");

    let t0 = Instant::now();
    let samples = decode_samples(&header, bytes)?;
    tracing::info!(elapsed_ms = t0.elapsed().as_millis(), "read amplitude data");

    let t0 = Instant::now();
    let normalized = normalize_matrix(&header, &samples, settings.screen_height)?;
    tracing::info!(elapsed_ms = t0.elapsed().as_millis(), "normalized samples");

    let geometry = FrameGeometry::new(&header, settings)?;
    tracing::info!(
        total_frames = geometry.total_frames,
        points_per_frame = geometry.points_per_frame,
        runtime_secs = header.derived.runtime_secs,
        "frame geometry"
    );

    Ok(PreparedInput {
        header,
        normalized,
        geometry,
    })
}

/// Publish the shared sample buffer and render every frame into `out_dir`.
#[tracing::instrument(skip_all, fields(frames = geometry.total_frames, workers = settings.workers))]
pub fn render_frames(
    normalized: &NormalizedMatrix,
    geometry: &FrameGeometry,
    settings: &VideoSettings,
    out_dir: &Path,
) -> WavscopeResult<RenderStats> {
    if normalized.samples_per_channel() != geometry.samples_per_channel {
        return Err(WavscopeError::config(format!(
            "normalized data has {} samples per channel, geometry expects {}",
            normalized.samples_per_channel(),
            geometry.samples_per_channel
        )));
    }

    let shared = SharedSamples::publish(normalized);
    let t0 = Instant::now();
    let stats = run_stride_schedule(geometry.total_frames, settings.workers, |frame| {
        let task = FrameTask {
            frame,
            geometry,
            shared: &shared,
            out_dir,
        };
        render_frame_to_disk(&task).map(|_| ())
    })?;
    tracing::info!(
        elapsed_ms = t0.elapsed().as_millis(),
        rendered = stats.frames_rendered,
        "rendered frames"
    );
    Ok(stats)
}

/// Read `input`, prepare it, and render all frames into `frame_dir`.
pub fn visualize_file(
    input: &Path,
    settings: &VideoSettings,
    frame_dir: &FrameDir,
) -> WavscopeResult<(PreparedInput, RenderStats)> {
    let bytes =
        std::fs::read(input).with_context(|| format!("read input file '{}'", input.display()))?;
    let prepared = prepare_input(&bytes, settings)?;
    let stats = render_frames(
        &prepared.normalized,
        &prepared.geometry,
        settings,
        frame_dir.path(),
    )?;
    Ok((prepared, stats))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
