use crate::{
    container::header::EncodingCode,
    foundation::error::{WavscopeError, WavscopeResult},
};

/// Linear map of `value` from `[old_min, old_max]` onto `[new_min, new_max]`, floored toward
/// negative infinity.
///
/// Truncation (not rounding) is relied on by pixel placement.
#[inline]
pub fn convert_range(value: f64, old_min: f64, old_max: f64, new_min: f64, new_max: f64) -> i64 {
    let old_range = old_max - old_min;
    let new_range = new_max - new_min;
    (((value - old_min) * new_range) / old_range + new_min).floor() as i64
}

/// Native numeric range of one sample encoding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NativeRange {
    pub min: f64,
    pub max: f64,
}

impl NativeRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Range table keyed by resolved encoding and bit depth.
    pub fn for_encoding(encoding: u16, bits_per_sample: u16) -> WavscopeResult<Self> {
        let range = match (encoding, bits_per_sample) {
            (EncodingCode::PCM, 8) => Self::new(0.0, 255.0),
            (EncodingCode::PCM, 16) => Self::new(-32_768.0, 32_767.0),
            (EncodingCode::PCM, 24) => Self::new(-8_388_608.0, 8_388_607.0),
            (EncodingCode::PCM, 32) => Self::new(-2_147_483_648.0, 2_147_483_647.0),
            (EncodingCode::IEEE_FLOAT, 32 | 64) => Self::new(-1.0, 1.0),
            (EncodingCode::ALAW, 8) => Self::new(-32_768.0, 32_767.0),
            (encoding, bits) => {
                return Err(WavscopeError::config(format!(
                    "encoding [{encoding}] at {bits} bits per sample is not supported for visualization"
                )));
            }
        };
        Ok(range)
    }

    /// Map `value` onto pixel rows `[0, height]`, flipped so the native maximum lands on row 0.
    ///
    /// Values outside the native range (float overs, NaN) are clamped to the frame.
    #[inline]
    pub fn to_row(self, value: f64, height: u16) -> u16 {
        let h = i64::from(height);
        let mapped = convert_range(value, self.min, self.max, 0.0, h as f64).clamp(0, h);
        (h - mapped) as u16
    }
}
