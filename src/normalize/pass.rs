use rayon::prelude::*;

use crate::{
    container::header::HeaderData,
    foundation::error::{WavscopeError, WavscopeResult},
    normalize::range::NativeRange,
    samples::decode::SampleMatrix,
};

/// Samples mapped to pixel rows: `[0, screen_height]`, row 0 at the top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedMatrix {
    screen_height: u16,
    channels: Vec<Vec<u16>>,
}

impl NormalizedMatrix {
    pub fn screen_height(&self) -> u16 {
        self.screen_height
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn samples_per_channel(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn channel(&self, idx: usize) -> Option<&[u16]> {
        self.channels.get(idx).map(Vec::as_slice)
    }

    pub fn channels(&self) -> &[Vec<u16>] {
        &self.channels
    }
}

/// Map every sample of `samples` onto `[0, screen_height]` using the header's native range.
#[tracing::instrument(skip(header, samples))]
pub fn normalize_matrix(
    header: &HeaderData,
    samples: &SampleMatrix,
    screen_height: u32,
) -> WavscopeResult<NormalizedMatrix> {
    let height = u16::try_from(screen_height)
        .ok()
        .filter(|h| *h > 0)
        .ok_or_else(|| {
            WavscopeError::config(format!(
                "screen height {screen_height} must be within 1..={}",
                u16::MAX
            ))
        })?;
    let range =
        NativeRange::for_encoding(header.effective_encoding()?, header.fmt.bits_per_sample)?;

    let channels = samples
        .channels()
        .par_iter()
        .map(|channel| {
            channel
                .par_iter()
                .map(|&v| range.to_row(v, height))
                .collect::<Vec<u16>>()
        })
        .collect::<Vec<_>>();

    Ok(NormalizedMatrix {
        screen_height: height,
        channels,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/normalize/pass.rs"]
mod tests;
