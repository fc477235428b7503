//! Chunk grammar: which `(tag, declared size)` pairs the decoder understands and how their
//! payloads are laid out.

use crate::{
    container::{
        bytes::ByteSource,
        header::{ChannelPeak, EncodingCode, FactChunk, FmtChunk, FmtExtension, PeakChunk},
    },
    foundation::{
        core::{Endianness, Tag},
        error::{WavscopeError, WavscopeResult},
    },
};

/// Size of the `RIFF`/`RIFX` common prefix: id, chunk size, file type.
pub const COMMON_PREFIX_LEN: usize = 12;
/// Size of the generic chunk prologue: tag, little-endian payload size.
pub const CHUNK_PROLOGUE_LEN: usize = 8;

/// The three legal `fmt ` payload sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FmtLayout {
    Base,
    Extended,
    Extensible,
}

impl FmtLayout {
    pub const fn payload_len(self) -> usize {
        match self {
            Self::Base => 16,
            Self::Extended => 18,
            Self::Extensible => 40,
        }
    }
}

/// Field layout selected for one chunk prologue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChunkLayout {
    Fmt(FmtLayout),
    Fact,
    Peak { channels: usize },
    /// Sample region; the declared size is the region length, not a layout size.
    Data,
}

impl ChunkLayout {
    /// Look up the grammar entry for a chunk. Unknown tags or sizes are rejected.
    pub fn lookup(tag: Tag, size: u32) -> WavscopeResult<Self> {
        let layout = match (tag, size) {
            (Tag::FMT, 16) => Self::Fmt(FmtLayout::Base),
            (Tag::FMT, 18) => Self::Fmt(FmtLayout::Extended),
            (Tag::FMT, 40) => Self::Fmt(FmtLayout::Extensible),
            (Tag::FACT, 4) => Self::Fact,
            (Tag::PEAK, n) if n > 8 && (n - 8) % 8 == 0 => Self::Peak {
                channels: ((n - 8) / 8) as usize,
            },
            (Tag::DATA, _) => Self::Data,
            _ => {
                return Err(WavscopeError::decode(format!(
                    "unsupported chunk '{tag}' with size {size}"
                )));
            }
        };
        Ok(layout)
    }

    /// Number of payload bytes this layout consumes after the prologue.
    pub fn payload_len(self) -> usize {
        match self {
            Self::Fmt(l) => l.payload_len(),
            Self::Fact => 4,
            Self::Peak { channels } => 8 + 8 * channels,
            Self::Data => 0,
        }
    }
}

/// Sequential field reader over one chunk payload.
struct FieldCursor<'a> {
    bytes: &'a [u8],
    offset: usize,
    endianness: Endianness,
}

impl<'a> FieldCursor<'a> {
    fn new(bytes: &'a [u8], offset: usize, endianness: Endianness) -> Self {
        Self {
            bytes,
            offset,
            endianness,
        }
    }

    fn u16(&mut self) -> WavscopeResult<u16> {
        let v = self.bytes.read_u16_at(self.offset, self.endianness)?;
        self.offset += 2;
        Ok(v)
    }

    fn u32(&mut self) -> WavscopeResult<u32> {
        let v = self.bytes.read_u32_at(self.offset, self.endianness)?;
        self.offset += 4;
        Ok(v)
    }

    fn f32(&mut self) -> WavscopeResult<f32> {
        let v = self.bytes.read_f32_at(self.offset, self.endianness)?;
        self.offset += 4;
        Ok(v)
    }

    fn raw<const N: usize>(&mut self) -> WavscopeResult<[u8; N]> {
        let v = self.bytes.read_array::<N>(self.offset)?;
        self.offset += N;
        Ok(v)
    }
}

pub(crate) fn read_fmt(
    bytes: &[u8],
    payload_offset: usize,
    layout: FmtLayout,
    e: Endianness,
) -> WavscopeResult<FmtChunk> {
    let mut c = FieldCursor::new(bytes, payload_offset, e);
    let encoding = EncodingCode(c.u16()?);
    let channels = c.u16()?;
    let sample_rate = c.u32()?;
    let byte_rate = c.u32()?;
    let block_align = c.u16()?;
    let bits_per_sample = c.u16()?;

    let extension = match layout {
        FmtLayout::Base => None,
        FmtLayout::Extended => Some(FmtExtension::Extended {
            extension_size: c.u16()?,
        }),
        FmtLayout::Extensible => Some(FmtExtension::Extensible {
            extension_size: c.u16()?,
            valid_bits_per_sample: c.u16()?,
            channel_mask: c.u32()?,
            sub_code: c.u16()?,
            sub_format: c.raw::<14>()?,
        }),
    };
    debug_assert_eq!(c.offset - payload_offset, layout.payload_len());

    Ok(FmtChunk {
        encoding,
        channels,
        sample_rate,
        byte_rate,
        block_align,
        bits_per_sample,
        extension,
    })
}

pub(crate) fn read_fact(
    bytes: &[u8],
    payload_offset: usize,
    e: Endianness,
) -> WavscopeResult<FactChunk> {
    let mut c = FieldCursor::new(bytes, payload_offset, e);
    Ok(FactChunk {
        sample_length: c.u32()?,
    })
}

pub(crate) fn read_peak(
    bytes: &[u8],
    payload_offset: usize,
    channels: usize,
    e: Endianness,
) -> WavscopeResult<PeakChunk> {
    let mut c = FieldCursor::new(bytes, payload_offset, e);
    let version = c.u32()?;
    let timestamp = c.u32()?;
    let mut peaks = Vec::with_capacity(channels);
    for _ in 0..channels {
        peaks.push(ChannelPeak {
            value: c.f32()?,
            position: c.u32()?,
        });
    }
    Ok(PeakChunk {
        version,
        timestamp,
        peaks,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/container/grammar.rs"]
mod tests;
