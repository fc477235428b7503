use std::sync::Arc;

use crate::normalize::pass::NormalizedMatrix;

/// Normalized rows flattened channel-major: `index = channel * samples_per_channel + sample`.
///
/// Published once before any worker starts; clones share the same allocation.
#[derive(Clone, Debug)]
pub struct SharedSamples {
    data: Arc<[u16]>,
    channels: usize,
    samples_per_channel: usize,
}

impl SharedSamples {
    pub fn publish(matrix: &NormalizedMatrix) -> Self {
        let data: Arc<[u16]> = matrix.channels().iter().flatten().copied().collect();
        Self {
            data,
            channels: matrix.channel_count(),
            samples_per_channel: matrix.samples_per_channel(),
        }
    }

    pub fn channel_count(&self) -> usize {
        self.channels
    }

    pub fn samples_per_channel(&self) -> usize {
        self.samples_per_channel
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.data
    }

    pub fn get(&self, channel: usize, sample: usize) -> Option<u16> {
        if channel >= self.channels || sample >= self.samples_per_channel {
            return None;
        }
        self.data
            .get(channel * self.samples_per_channel + sample)
            .copied()
    }

    /// Mean row of `sample` across every channel, floored.
    pub fn averaged_row(&self, sample: usize) -> Option<u16> {
        if self.channels == 0 || sample >= self.samples_per_channel {
            return None;
        }
        let sum: u64 = (0..self.channels)
            .filter_map(|c| self.get(c, sample))
            .map(u64::from)
            .sum();
        Some((sum / self.channels as u64) as u16)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/shared.rs"]
mod tests;
