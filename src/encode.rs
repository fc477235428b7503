//! Muxing rendered frames and the source audio into a video.

/// `ffmpeg`-based muxer (system binary).
pub mod ffmpeg;
