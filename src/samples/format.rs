use crate::{
    container::{
        bytes::ByteSource,
        header::{EncodingCode, HeaderData},
    },
    foundation::{
        core::Endianness,
        error::{WavscopeError, WavscopeResult},
    },
    samples::alaw::alaw_to_i16,
};

/// Scalar reader selected for one container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleFormat {
    /// Unsigned 8-bit PCM. Single bytes have no byte order.
    U8,
    I16(Endianness),
    I24(Endianness),
    I32(Endianness),
    F32(Endianness),
    F64(Endianness),
    /// 8-bit A-law, expanded through the lookup table.
    ALaw,
}

impl SampleFormat {
    /// Pick the reader for an (already resolved) encoding and bit depth.
    pub fn resolve(
        endianness: Endianness,
        encoding: u16,
        bits_per_sample: u16,
    ) -> WavscopeResult<Self> {
        let e = endianness;
        let format = match (encoding, bits_per_sample) {
            (EncodingCode::PCM, 8) => Self::U8,
            (EncodingCode::PCM, 16) => Self::I16(e),
            (EncodingCode::PCM, 24) => Self::I24(e),
            (EncodingCode::PCM, 32) => Self::I32(e),
            (EncodingCode::IEEE_FLOAT, 32) => Self::F32(e),
            (EncodingCode::IEEE_FLOAT, 64) => Self::F64(e),
            (EncodingCode::ALAW, 8) => Self::ALaw,
            (encoding, bits) => {
                return Err(WavscopeError::decode(format!(
                    "no sample reader for encoding [{encoding}] at {bits} bits per sample"
                )));
            }
        };
        Ok(format)
    }

    pub fn for_header(header: &HeaderData) -> WavscopeResult<Self> {
        Self::resolve(
            header.endianness,
            header.effective_encoding()?,
            header.fmt.bits_per_sample,
        )
    }

    pub fn width_bytes(self) -> usize {
        match self {
            Self::U8 | Self::ALaw => 1,
            Self::I16(_) => 2,
            Self::I24(_) => 3,
            Self::I32(_) | Self::F32(_) => 4,
            Self::F64(_) => 8,
        }
    }

    /// Read one scalar at `offset`, widened to `f64` in its native domain.
    #[inline]
    pub fn read(self, bytes: &[u8], offset: usize) -> WavscopeResult<f64> {
        Ok(match self {
            Self::U8 => f64::from(bytes.read_u8_at(offset)?),
            Self::I16(e) => f64::from(bytes.read_i16_at(offset, e)?),
            Self::I24(e) => f64::from(bytes.read_i24_at(offset, e)?),
            Self::I32(e) => f64::from(bytes.read_i32_at(offset, e)?),
            Self::F32(e) => f64::from(bytes.read_f32_at(offset, e)?),
            Self::F64(e) => bytes.read_f64_at(offset, e)?,
            Self::ALaw => f64::from(alaw_to_i16(bytes.read_u8_at(offset)?)),
        })
    }
}
