//! Single-plane raster images and their on-disk encodings.

pub mod bmp;
pub mod pgm;

use std::str::FromStr;

use crate::foundation::error::{WavscopeError, WavscopeResult};

pub use bmp::{BmpImage, Rgb8};
pub use pgm::PgmImage;

/// A width × height grid of one-byte intensities that can serialize itself to a file.
///
/// Pixel `(x, y)` is column `x` of row `y`, row 0 at the top. Callers are expected to pass in-range
/// coordinates; out-of-range draws are ignored.
pub trait RasterImage: Send {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Row-major intensity buffer, `width * height` bytes.
    fn pixels(&self) -> &[u8];

    /// Set one pixel.
    fn draw_point(&mut self, x: u32, y: u32, intensity: u8);

    /// Exact on-disk byte sequence of this image.
    fn to_file_buffer(&self) -> Vec<u8>;
}

/// Image encodings selectable for a render run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
    /// Bit-packed indexed-color bitmap, 1 bpp black/white.
    #[default]
    Bmp,
    /// ASCII grayscale (`P2`).
    Pgm,
}

impl CodecKind {
    /// File extension used for frames, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Bmp => "bmp",
            Self::Pgm => "pgm",
        }
    }

    /// Intensity the frame worker draws with.
    pub fn foreground(self) -> u8 {
        match self {
            Self::Bmp => BmpImage::DEFAULT_FOREGROUND,
            Self::Pgm => PgmImage::MAX_VALUE,
        }
    }

    /// Fresh blank image of this kind.
    pub fn create(self, width: u32, height: u32) -> WavscopeResult<Box<dyn RasterImage>> {
        match self {
            Self::Bmp => Ok(Box::new(BmpImage::new(width, height)?)),
            Self::Pgm => Ok(Box::new(PgmImage::new(width, height)?)),
        }
    }

    /// Exact byte length of a serialized frame of this kind holding `pixels`.
    ///
    /// The bitmap length depends on geometry only; the graymap length also depends on how many
    /// digits each pixel prints with.
    pub fn file_len(self, width: u32, height: u32, pixels: &[u8]) -> usize {
        match self {
            Self::Bmp => BmpImage::file_len(width, height, 1),
            Self::Pgm => PgmImage::file_len(width, height, pixels),
        }
    }
}

impl FromStr for CodecKind {
    type Err = WavscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "bmp" => Ok(Self::Bmp),
            "pgm" => Ok(Self::Pgm),
            other => Err(WavscopeError::config(format!(
                "unknown image codec '{other}' (expected 'bmp' or 'pgm')"
            ))),
        }
    }
}

pub(crate) fn check_dimensions(width: u32, height: u32) -> WavscopeResult<usize> {
    if width == 0 || height == 0 {
        return Err(WavscopeError::config(format!(
            "image dimensions must be non-zero, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| WavscopeError::config(format!("image {width}x{height} is too large")))
}

#[cfg(test)]
#[path = "../tests/unit/raster/kind.rs"]
mod tests;
