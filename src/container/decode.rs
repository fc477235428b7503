use crate::{
    container::{
        bytes::ByteSource,
        grammar::{self, CHUNK_PROLOGUE_LEN, COMMON_PREFIX_LEN, ChunkLayout},
        header::{DataChunk, DerivedData, FactChunk, FmtChunk, HeaderData, PeakChunk},
    },
    foundation::{
        core::{Endianness, Tag},
        error::{WavscopeError, WavscopeResult},
    },
};

/// Parse the container header and locate the sample region.
///
/// Walks the chunk sequence after the 12-byte common prefix until the `data` chunk, then validates
/// the result. Returns the header and the byte offset where samples start.
///
/// Size words (the prefix's `riff_chunk_size` and every chunk prologue) are always little-endian.
/// Only the fields inside a chunk layout follow the byte order picked by the riff id.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_header(bytes: &[u8]) -> WavscopeResult<(HeaderData, usize)> {
    decode_header_inner(bytes).inspect_err(|e| tracing::warn!(error = %e, "rejected container"))
}

fn decode_header_inner(bytes: &[u8]) -> WavscopeResult<(HeaderData, usize)> {
    let riff_id = bytes.read_tag(0)?;
    let endianness = match riff_id {
        Tag::RIFF => Endianness::Little,
        Tag::RIFX => Endianness::Big,
        other => {
            return Err(WavscopeError::decode(format!(
                "riff id '{other}' did not match RIFF or RIFX"
            )));
        }
    };
    let riff_chunk_size = bytes.read_u32_at(4, Endianness::Little)?;
    let file_type = bytes.read_tag(8)?;

    let mut offset = COMMON_PREFIX_LEN;
    let mut fmt: Option<FmtChunk> = None;
    let mut fact: Option<FactChunk> = None;
    let mut peak: Option<PeakChunk> = None;

    let data = loop {
        let tag = bytes.read_tag(offset)?;
        let size = bytes.read_u32_at(offset + 4, Endianness::Little)?;
        tracing::debug!(chunk = %tag, size, offset, "chunk");

        let layout = ChunkLayout::lookup(tag, size)?;
        let payload = offset + CHUNK_PROLOGUE_LEN;
        match layout {
            ChunkLayout::Fmt(l) => {
                let chunk = grammar::read_fmt(bytes, payload, l, endianness)?;
                set_once(&mut fmt, chunk, tag)?;
            }
            ChunkLayout::Fact => {
                let chunk = grammar::read_fact(bytes, payload, endianness)?;
                set_once(&mut fact, chunk, tag)?;
            }
            ChunkLayout::Peak { channels } => {
                let chunk = grammar::read_peak(bytes, payload, channels, endianness)?;
                set_once(&mut peak, chunk, tag)?;
            }
            ChunkLayout::Data => {
                let len = size as usize;
                let available = bytes.len().saturating_sub(payload);
                if len > available {
                    return Err(WavscopeError::decode(format!(
                        "data chunk declares {len} bytes but only {available} remain"
                    )));
                }
                break DataChunk {
                    offset: payload,
                    len,
                };
            }
        }
        offset = payload + layout.payload_len();
    };

    let fmt = fmt.ok_or_else(|| WavscopeError::decode("missing 'fmt ' chunk before 'data'"))?;
    let derived = DerivedData::compute(&fmt, &data, bytes.len());
    let header = HeaderData {
        riff_id,
        endianness,
        riff_chunk_size,
        file_type,
        fmt,
        fact,
        peak,
        data,
        derived,
    };
    header.validate()?;

    tracing::debug!(
        channels = header.fmt.channels,
        sample_rate = header.fmt.sample_rate,
        bits = header.fmt.bits_per_sample,
        total_samples = header.derived.total_samples,
        runtime_secs = header.derived.runtime_secs,
        "decoded header"
    );
    Ok((header, data.offset))
}

fn set_once<T>(slot: &mut Option<T>, value: T, tag: Tag) -> WavscopeResult<()> {
    if slot.is_some() {
        return Err(WavscopeError::decode(format!("duplicate '{tag}' chunk")));
    }
    *slot = Some(value);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/container/decode.rs"]
mod tests;
