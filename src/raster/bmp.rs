use crate::{
    foundation::error::{WavscopeError, WavscopeResult},
    raster::{RasterImage, check_dimensions},
};

const SIGNATURE: &[u8; 2] = b"BM";
const FILE_HEADER_LEN: u32 = 14;
const INFO_HEADER_LEN: u32 = 40;
const PIXELS_PER_METRE: u32 = 10;

/// One palette entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Rgb8 = Rgb8 { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb8 = Rgb8 {
        r: 255,
        g: 255,
        b: 255,
    };
}

struct FileHeader {
    file_size: u32,
    data_offset: u32,
}

impl FileHeader {
    fn write_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(SIGNATURE);
        out.extend_from_slice(&self.file_size.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&self.data_offset.to_le_bytes());
    }
}

struct InfoHeader {
    width: u32,
    height: u32,
    bits_per_pixel: u16,
    colors_used: u32,
}

impl InfoHeader {
    fn write_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&INFO_HEADER_LEN.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        // Positive height: rows are stored bottom-up.
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&self.bits_per_pixel.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
        out.extend_from_slice(&0u32.to_le_bytes()); // image size, may be 0 for BI_RGB
        out.extend_from_slice(&PIXELS_PER_METRE.to_le_bytes());
        out.extend_from_slice(&PIXELS_PER_METRE.to_le_bytes());
        out.extend_from_slice(&self.colors_used.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
    }
}

/// Indexed-color bitmap with 1, 2, 4, or 8 bits per pixel.
///
/// Each pixel holds a palette index. Rows are packed most-significant-bits first and padded to
/// four bytes.
#[derive(Clone, Debug)]
pub struct BmpImage {
    width: u32,
    height: u32,
    bits_per_pixel: u8,
    palette: Vec<Rgb8>,
    pixels: Vec<u8>,
}

impl BmpImage {
    /// Index of white in the default palette.
    pub const DEFAULT_FOREGROUND: u8 = 1;

    /// 1 bpp, black background (index 0) and white foreground (index 1).
    pub fn new(width: u32, height: u32) -> WavscopeResult<Self> {
        Self::with_palette(width, height, 1, vec![Rgb8::BLACK, Rgb8::WHITE])
    }

    /// Palette length must be exactly `2^bits_per_pixel`.
    pub fn with_palette(
        width: u32,
        height: u32,
        bits_per_pixel: u8,
        palette: Vec<Rgb8>,
    ) -> WavscopeResult<Self> {
        if !matches!(bits_per_pixel, 1 | 2 | 4 | 8) {
            return Err(WavscopeError::config(format!(
                "bmp bits per pixel must be 1, 2, 4, or 8, got {bits_per_pixel}"
            )));
        }
        let num_colors = 1usize << bits_per_pixel;
        if palette.len() != num_colors {
            return Err(WavscopeError::config(format!(
                "palette has {} colors, {bits_per_pixel} bpp requires exactly {num_colors}",
                palette.len()
            )));
        }
        let len = check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            bits_per_pixel,
            palette,
            pixels: vec![0u8; len],
        })
    }

    pub fn bits_per_pixel(&self) -> u8 {
        self.bits_per_pixel
    }

    pub fn palette(&self) -> &[Rgb8] {
        &self.palette
    }

    /// Bytes per stored row: `ceil(width * bpp / 8)` rounded up to a multiple of 4.
    pub fn row_stride(width: u32, bits_per_pixel: u8) -> usize {
        let packed = (width as usize * usize::from(bits_per_pixel)).div_ceil(8);
        packed.next_multiple_of(4)
    }

    /// Total serialized size for the given geometry.
    pub fn file_len(width: u32, height: u32, bits_per_pixel: u8) -> usize {
        (FILE_HEADER_LEN + INFO_HEADER_LEN) as usize
            + 4 * (1usize << bits_per_pixel)
            + Self::row_stride(width, bits_per_pixel) * height as usize
    }

    fn pack_row(&self, row: &[u8], out: &mut [u8]) {
        let bpp = u32::from(self.bits_per_pixel);
        let per_byte = (8 / bpp) as usize;
        let mask = ((1u16 << bpp) - 1) as u8;
        for (byte, pixels) in out.iter_mut().zip(row.chunks(per_byte)) {
            let mut packed = 0u8;
            for (i, &px) in pixels.iter().enumerate() {
                let shift = 8 - bpp * (i as u32 + 1);
                packed |= (px & mask) << shift;
            }
            *byte = packed;
        }
    }
}

impl RasterImage for BmpImage {
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
        let mask = ((1u16 << self.bits_per_pixel) - 1) as u8;
        self.pixels[y as usize * self.width as usize + x as usize] = intensity & mask;
    }

    fn to_file_buffer(&self) -> Vec<u8> {
        let file_len = Self::file_len(self.width, self.height, self.bits_per_pixel);
        let data_offset = FILE_HEADER_LEN + INFO_HEADER_LEN + 4 * self.palette.len() as u32;
        let mut out = Vec::with_capacity(file_len);

        FileHeader {
            file_size: file_len as u32,
            data_offset,
        }
        .write_into(&mut out);
        InfoHeader {
            width: self.width,
            height: self.height,
            bits_per_pixel: u16::from(self.bits_per_pixel),
            colors_used: self.palette.len() as u32,
        }
        .write_into(&mut out);
        for c in &self.palette {
            out.extend_from_slice(&[c.b, c.g, c.r, 0]);
        }
        debug_assert_eq!(out.len(), data_offset as usize);

        let stride = Self::row_stride(self.width, self.bits_per_pixel);
        let mut line = vec![0u8; stride];
        for row in self.pixels.chunks_exact(self.width as usize).rev() {
            line.fill(0);
            self.pack_row(row, &mut line);
            out.extend_from_slice(&line);
        }
        debug_assert_eq!(out.len(), file_len);
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/bmp.rs"]
mod tests;
