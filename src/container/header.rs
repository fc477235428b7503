use crate::foundation::{
    core::{Endianness, Tag},
    error::{WavscopeError, WavscopeResult},
};

/// Format codes accepted in the `fmt ` chunk.
pub const SUPPORTED_ENCODINGS: [u16; 3] = [
    EncodingCode::PCM,
    EncodingCode::IEEE_FLOAT,
    EncodingCode::EXTENSIBLE,
];

/// Raw `fmt ` encoding code plus the named values wavscope understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct EncodingCode(pub u16);

impl EncodingCode {
    pub const PCM: u16 = 1;
    pub const IEEE_FLOAT: u16 = 3;
    pub const ALAW: u16 = 6;
    pub const EXTENSIBLE: u16 = 65534;
}

/// Decoded `fmt ` chunk.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FmtChunk {
    pub encoding: EncodingCode,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub extension: Option<FmtExtension>,
}

/// Trailing fields present only in 18- and 40-byte `fmt ` chunks.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum FmtExtension {
    /// 18-byte layout: only the (usually zero) extension size.
    Extended { extension_size: u16 },
    /// 40-byte `WAVE_FORMAT_EXTENSIBLE` layout.
    Extensible {
        extension_size: u16,
        valid_bits_per_sample: u16,
        channel_mask: u32,
        sub_code: u16,
        sub_format: [u8; 14],
    },
}

/// `fact` chunk.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FactChunk {
    pub sample_length: u32,
}

/// One channel's entry in a `PEAK` chunk.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ChannelPeak {
    pub value: f32,
    pub position: u32,
}

/// `PEAK` chunk.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PeakChunk {
    pub version: u32,
    pub timestamp: u32,
    pub peaks: Vec<ChannelPeak>,
}

/// Location of the sample region inside the file buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DataChunk {
    pub offset: usize,
    pub len: usize,
}

/// Values computed from the decoded chunks.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DerivedData {
    pub bytes_per_sample: usize,
    pub total_samples: usize,
    /// Whole seconds, rounded up.
    pub runtime_secs: u64,
    pub size_mb: f64,
}

/// Everything the pipeline needs to know about one container, built once by
/// [`decode_header`](crate::decode_header).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct HeaderData {
    pub riff_id: Tag,
    pub endianness: Endianness,
    pub riff_chunk_size: u32,
    pub file_type: Tag,
    pub fmt: FmtChunk,
    pub fact: Option<FactChunk>,
    pub peak: Option<PeakChunk>,
    pub data: DataChunk,
    pub derived: DerivedData,
}

impl FmtChunk {
    /// Sub-format code of an extensible chunk, if present.
    pub fn sub_code(&self) -> Option<u16> {
        match &self.extension {
            Some(FmtExtension::Extensible { sub_code, .. }) => Some(*sub_code),
            _ => None,
        }
    }

    /// Encoding code with the extensible indirection resolved.
    pub fn effective_encoding(&self) -> WavscopeResult<u16> {
        if self.encoding.0 != EncodingCode::EXTENSIBLE {
            return Ok(self.encoding.0);
        }
        self.sub_code().ok_or_else(|| {
            WavscopeError::decode(
                "extensible encoding (65534) requires a 40-byte fmt chunk carrying a sub-code",
            )
        })
    }
}

impl HeaderData {
    pub fn effective_encoding(&self) -> WavscopeResult<u16> {
        self.fmt.effective_encoding()
    }

    /// Reject headers whose fields disagree with each other.
    pub fn validate(&self) -> WavscopeResult<()> {
        let fmt = &self.fmt;
        if !SUPPORTED_ENCODINGS.contains(&fmt.encoding.0) {
            return Err(WavscopeError::decode(format!(
                "encoding format [{}] is not supported",
                fmt.encoding.0
            )));
        }
        let effective = fmt.effective_encoding()?;
        if !matches!(
            effective,
            EncodingCode::PCM | EncodingCode::IEEE_FLOAT | EncodingCode::ALAW
        ) {
            return Err(WavscopeError::decode(format!(
                "extensible sub-format [{effective}] is not supported"
            )));
        }
        if self.riff_id != Tag::RIFF && self.riff_id != Tag::RIFX {
            return Err(WavscopeError::decode(format!(
                "riff id '{}' did not match RIFF or RIFX",
                self.riff_id
            )));
        }
        if fmt.channels == 0 {
            return Err(WavscopeError::decode("channel count must be non-zero"));
        }
        if fmt.sample_rate == 0 {
            return Err(WavscopeError::decode("sample rate must be non-zero"));
        }
        if fmt.bits_per_sample == 0 || !fmt.bits_per_sample.is_multiple_of(8) {
            return Err(WavscopeError::decode(format!(
                "bits per sample [{}] must be a non-zero multiple of 8",
                fmt.bits_per_sample
            )));
        }

        let bits = u64::from(fmt.bits_per_sample);
        let channels = u64::from(fmt.channels);
        if bits * channels != u64::from(fmt.block_align) * 8 {
            return Err(WavscopeError::decode(format!(
                "(bits_per_sample * channels) / 8 = {} did not match block_align = {}",
                bits * channels / 8,
                fmt.block_align
            )));
        }
        if u64::from(fmt.sample_rate) * channels * bits != u64::from(fmt.byte_rate) * 8 {
            return Err(WavscopeError::decode(format!(
                "(sample_rate * channels * bits_per_sample) / 8 = {} did not match byte_rate = {}",
                u64::from(fmt.sample_rate) * channels * bits / 8,
                fmt.byte_rate
            )));
        }
        Ok(())
    }
}

impl DerivedData {
    pub(crate) fn compute(fmt: &FmtChunk, data: &DataChunk, file_len: usize) -> Self {
        let bytes_per_sample = usize::from(fmt.bits_per_sample / 8);
        let frame_bytes = bytes_per_sample * usize::from(fmt.channels);
        let total_samples = data.len.checked_div(frame_bytes).unwrap_or(0);
        let runtime_secs = if fmt.sample_rate == 0 {
            0
        } else {
            (total_samples as u64).div_ceil(u64::from(fmt.sample_rate))
        };
        Self {
            bytes_per_sample,
            total_samples,
            runtime_secs,
            size_mb: file_len as f64 / (1024.0 * 1024.0),
        }
    }
}
