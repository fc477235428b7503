use crate::foundation::{
    core::{Endianness, Tag},
    error::{WavscopeError, WavscopeResult},
};

/// Positional readers over a raw byte slice.
///
/// Every multi-byte numeric read takes the container's [`Endianness`]. Tag and raw-byte reads do
/// not: four-character codes are stored in file order regardless of byte order.
pub trait ByteSource {
    fn read_array<const N: usize>(&self, offset: usize) -> WavscopeResult<[u8; N]>;

    fn read_tag(&self, offset: usize) -> WavscopeResult<Tag> {
        self.read_array::<4>(offset).map(Tag)
    }

    fn read_u8_at(&self, offset: usize) -> WavscopeResult<u8> {
        self.read_array::<1>(offset).map(|[b]| b)
    }

    fn read_u16_at(&self, offset: usize, e: Endianness) -> WavscopeResult<u16> {
        let b = self.read_array::<2>(offset)?;
        Ok(match e {
            Endianness::Little => u16::from_le_bytes(b),
            Endianness::Big => u16::from_be_bytes(b),
        })
    }

    fn read_u32_at(&self, offset: usize, e: Endianness) -> WavscopeResult<u32> {
        let b = self.read_array::<4>(offset)?;
        Ok(match e {
            Endianness::Little => u32::from_le_bytes(b),
            Endianness::Big => u32::from_be_bytes(b),
        })
    }

    fn read_i16_at(&self, offset: usize, e: Endianness) -> WavscopeResult<i16> {
        self.read_u16_at(offset, e).map(|v| v as i16)
    }

    /// Signed 24-bit two's complement, sign-extended into an `i32`.
    fn read_i24_at(&self, offset: usize, e: Endianness) -> WavscopeResult<i32> {
        let [a, b, c] = self.read_array::<3>(offset)?;
        let (lo, mid, hi) = match e {
            Endianness::Little => (a, b, c),
            Endianness::Big => (c, b, a),
        };
        Ok(i32::from_le_bytes([lo, mid, hi, 0]) << 8 >> 8)
    }

    fn read_i32_at(&self, offset: usize, e: Endianness) -> WavscopeResult<i32> {
        self.read_u32_at(offset, e).map(|v| v as i32)
    }

    fn read_f32_at(&self, offset: usize, e: Endianness) -> WavscopeResult<f32> {
        self.read_u32_at(offset, e).map(f32::from_bits)
    }

    fn read_f64_at(&self, offset: usize, e: Endianness) -> WavscopeResult<f64> {
        let b = self.read_array::<8>(offset)?;
        Ok(match e {
            Endianness::Little => f64::from_le_bytes(b),
            Endianness::Big => f64::from_be_bytes(b),
        })
    }
}

impl ByteSource for [u8] {
    fn read_array<const N: usize>(&self, offset: usize) -> WavscopeResult<[u8; N]> {
        offset
            .checked_add(N)
            .and_then(|end| self.get(offset..end))
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| {
                WavscopeError::decode(format!(
                    "unexpected end of input: wanted {N} bytes at offset {offset}, buffer is {} bytes",
                    self.len()
                ))
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/container/bytes.rs"]
mod tests;
