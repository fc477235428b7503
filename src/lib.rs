//! wavscope turns a RIFF/RIFX WAVE file into numbered oscilloscope frames.
//!
//! The pipeline is leaf-first:
//!
//! - [`decode_header`] parses the chunk tree and validates it into a [`HeaderData`]
//! - [`decode_samples`] de-interleaves the data region into a [`SampleMatrix`]
//! - [`normalize_matrix`] maps every sample onto a flipped pixel row
//! - [`render_frames`] runs the stride-scheduled worker pool, writing one BMP or PGM per frame
//!
//! [`encode::ffmpeg::mux`] then combines the frames and the source audio with the system
//! `ffmpeg` binary.
#![forbid(unsafe_code)]

pub mod container;
pub mod encode;
pub mod foundation;
pub mod normalize;
pub mod raster;
pub mod render;
pub mod samples;

pub use crate::container::decode::decode_header;
pub use crate::container::header::{EncodingCode, HeaderData};
pub use crate::foundation::core::{Endianness, FrameIndex, Tag};
pub use crate::foundation::error::{WavscopeError, WavscopeResult};
pub use crate::normalize::pass::{NormalizedMatrix, normalize_matrix};
pub use crate::raster::{BmpImage, CodecKind, PgmImage, RasterImage, Rgb8};
pub use crate::render::{
    FrameDir, FrameGeometry, RenderStats, SharedSamples, VideoSettings, prepare_input,
    render_frames, run_stride_schedule, visualize_file,
};
pub use crate::samples::decode::{SampleMatrix, decode_samples};

#[cfg(test)]
#[path = "../tests/support/wav_fixture.rs"]
pub(crate) mod wav_fixture;
