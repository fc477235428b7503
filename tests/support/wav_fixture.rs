//! In-memory WAV builder shared by unit and integration tests.
#![allow(dead_code)]

/// Builds RIFF/RIFX byte buffers chunk by chunk.
#[derive(Clone, Debug)]
pub struct WavFixture {
    pub big_endian: bool,
    pub encoding: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub block_align: Option<u16>,
    pub byte_rate: Option<u32>,
    /// `None` for a 16-byte fmt chunk, `Some(sub_code)` for a 40-byte extensible chunk.
    pub sub_code: Option<u16>,
    /// Emit an 18-byte fmt chunk (ignored when `sub_code` is set).
    pub extended_fmt: bool,
    pub fact: Option<u32>,
    pub peak: Option<Vec<(f32, u32)>>,
    pub extra_chunks: Vec<([u8; 4], Vec<u8>)>,
    pub data: Vec<u8>,
}

impl WavFixture {
    pub fn pcm(channels: u16, sample_rate: u32, bits_per_sample: u16, data: Vec<u8>) -> Self {
        Self {
            big_endian: false,
            encoding: 1,
            channels,
            sample_rate,
            bits_per_sample,
            block_align: None,
            byte_rate: None,
            sub_code: None,
            extended_fmt: false,
            fact: None,
            peak: None,
            extra_chunks: Vec::new(),
            data,
        }
    }

    fn u16b(&self, v: u16) -> [u8; 2] {
        if self.big_endian {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        }
    }

    fn u32b(&self, v: u32) -> [u8; 4] {
        if self.big_endian {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        }
    }

    /// Size words are little-endian in both RIFF and RIFX.
    fn chunk(&self, out: &mut Vec<u8>, tag: &[u8; 4], payload: &[u8]) {
        out.extend_from_slice(tag);
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(payload);
    }

    pub fn build(&self) -> Vec<u8> {
        let block_align = self
            .block_align
            .unwrap_or(self.bits_per_sample * self.channels / 8);
        let byte_rate = self.byte_rate.unwrap_or(
            self.sample_rate * u32::from(self.channels) * u32::from(self.bits_per_sample) / 8,
        );

        let mut fmt = Vec::new();
        fmt.extend_from_slice(&self.u16b(self.encoding));
        fmt.extend_from_slice(&self.u16b(self.channels));
        fmt.extend_from_slice(&self.u32b(self.sample_rate));
        fmt.extend_from_slice(&self.u32b(byte_rate));
        fmt.extend_from_slice(&self.u16b(block_align));
        fmt.extend_from_slice(&self.u16b(self.bits_per_sample));
        if let Some(sub_code) = self.sub_code {
            fmt.extend_from_slice(&self.u16b(22));
            fmt.extend_from_slice(&self.u16b(self.bits_per_sample));
            fmt.extend_from_slice(&self.u32b(0));
            fmt.extend_from_slice(&self.u16b(sub_code));
            fmt.extend_from_slice(&[
                0x00, 0x00, 0x00, 0x00, 0x10, 0x00, 0x80, 0x00, 0x00, 0xaa, 0x00, 0x38, 0x9b, 0x71,
            ]);
        } else if self.extended_fmt {
            fmt.extend_from_slice(&self.u16b(0));
        }

        let mut body = Vec::new();
        body.extend_from_slice(b"WAVE");
        self.chunk(&mut body, b"fmt ", &fmt);
        if let Some(len) = self.fact {
            let payload = self.u32b(len);
            self.chunk(&mut body, b"fact", &payload);
        }
        if let Some(peaks) = &self.peak {
            let mut payload = Vec::new();
            payload.extend_from_slice(&self.u32b(1));
            payload.extend_from_slice(&self.u32b(0));
            for (value, pos) in peaks {
                payload.extend_from_slice(&self.u32b(value.to_bits()));
                payload.extend_from_slice(&self.u32b(*pos));
            }
            self.chunk(&mut body, b"PEAK", &payload);
        }
        for (tag, payload) in &self.extra_chunks {
            self.chunk(&mut body, tag, payload);
        }
        self.chunk(&mut body, b"data", &self.data);

        let mut out = Vec::with_capacity(body.len() + 8);
        out.extend_from_slice(if self.big_endian { b"RIFX" } else { b"RIFF" });
        out.extend_from_slice(&(body.len() as u32).to_le_bytes());
        out.extend_from_slice(&body);
        out
    }
}
