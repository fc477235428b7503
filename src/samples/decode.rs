use crate::{
    container::header::HeaderData,
    foundation::error::{WavscopeError, WavscopeResult},
    samples::format::SampleFormat,
};

/// Per-channel sample sequences in the encoding's native numeric domain.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleMatrix {
    channels: Vec<Vec<f64>>,
}

impl SampleMatrix {
    pub fn from_channels(channels: Vec<Vec<f64>>) -> WavscopeResult<Self> {
        if let Some(first) = channels.first()
            && channels.iter().any(|c| c.len() != first.len())
        {
            return Err(WavscopeError::decode(
                "sample matrix channels must all have the same length",
            ));
        }
        Ok(Self { channels })
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn samples_per_channel(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn channel(&self, idx: usize) -> Option<&[f64]> {
        self.channels.get(idx).map(Vec::as_slice)
    }

    pub fn channels(&self) -> &[Vec<f64>] {
        &self.channels
    }
}

/// De-interleave the sample region of `bytes` into one sequence per channel.
#[tracing::instrument(skip(header, bytes))]
pub fn decode_samples(header: &HeaderData, bytes: &[u8]) -> WavscopeResult<SampleMatrix> {
    let format = SampleFormat::for_header(header)?;
    let channels = usize::from(header.fmt.channels);
    let total = header.derived.total_samples;
    let step = header.derived.bytes_per_sample;
    debug_assert_eq!(step, format.width_bytes());

    let start = header.data.offset;
    let needed = total
        .checked_mul(channels)
        .and_then(|n| n.checked_mul(step))
        .ok_or_else(|| WavscopeError::decode("sample region size overflows"))?;
    let region = start
        .checked_add(needed)
        .and_then(|end| bytes.get(start..end))
        .ok_or_else(|| {
            WavscopeError::decode(format!(
                "sample region [{start}, +{needed}) runs past the end of a {}-byte buffer",
                bytes.len()
            ))
        })?;

    let mut out = vec![Vec::with_capacity(total); channels];
    let mut offset = 0usize;
    for _ in 0..total {
        for channel in out.iter_mut() {
            channel.push(format.read(region, offset)?);
            offset += step;
        }
    }

    // Legacy mono files can declare a second channel that carries nothing.
    if out.len() > 1 && out[1].is_empty() {
        tracing::debug!("dropping empty second channel");
        out.remove(1);
    }

    tracing::debug!(?format, channels = out.len(), total, "decoded samples");
    SampleMatrix::from_channels(out)
}

#[cfg(test)]
#[path = "../../tests/unit/samples/decode.rs"]
mod tests;
