//! Frame rendering: geometry, the shared sample buffer, the stride-scheduled worker pool, and the
//! per-frame rasterizer.

/// Scoped or kept output directory for frame files.
pub mod frame_dir;
/// Derived per-run frame geometry.
pub mod geometry;
/// One-call stages from file bytes to rendered frames.
pub mod pipeline;
/// Fixed-size worker pool with stride frame assignment.
pub mod scheduler;
/// Settings for a render run.
pub mod settings;
/// Read-only sample buffer shared by every worker.
pub mod shared;
/// Per-frame rasterize-and-write.
pub mod worker;

pub use frame_dir::FrameDir;
pub use geometry::FrameGeometry;
pub use pipeline::{PreparedInput, prepare_input, render_frames, visualize_file};
pub use scheduler::{RenderStats, run_stride_schedule};
pub use settings::VideoSettings;
pub use shared::SharedSamples;
pub use worker::{FrameTask, render_frame_to_disk};
