use std::fmt::Write as _;

use crate::{
    foundation::error::WavscopeResult,
    raster::{RasterImage, check_dimensions},
};

const MAGIC: &str = "P2";
const COMMENT: &str = "created by jbukuts";

/// Plain (ASCII) graymap, maxval 255.
#[derive(Clone, Debug)]
pub struct PgmImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PgmImage {
    pub const MAX_VALUE: u8 = 255;

    pub fn new(width: u32, height: u32) -> WavscopeResult<Self> {
        let len = check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0u8; len],
        })
    }

    fn header(width: u32, height: u32) -> String {
        format!(
            "{MAGIC}\n#{COMMENT}\n{width} {height}\n{}\n",
            Self::MAX_VALUE
        )
    }

    /// Exact serialized size for the given pixel values.
    pub fn file_len(width: u32, height: u32, pixels: &[u8]) -> usize {
        let digits: usize = pixels
            .iter()
            .map(|&p| match p {
                0..=9 => 1,
                10..=99 => 2,
                _ => 3,
            })
            .sum();
        Self::header(width, height).len() + digits + pixels.len().saturating_sub(1)
    }
}

impl RasterImage for PgmImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn draw_point(&mut self, x: u32, y: u32, intensity: u8) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[y as usize * self.width as usize + x as usize] = intensity;
    }

    fn to_file_buffer(&self) -> Vec<u8> {
        let mut out = Self::header(self.width, self.height);
        out.reserve(self.pixels.len() * 4);
        for (i, p) in self.pixels.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = write!(out, "{p}");
        }
        out.into_bytes()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/pgm.rs"]
mod tests;
