use std::fmt;

/// Byte order of the chunk layout fields in a container, chosen by its riff id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Endianness {
    /// `"RIFF"` containers.
    Little,
    /// `"RIFX"` containers.
    Big,
}

/// Four raw bytes identifying a container or chunk (`"RIFF"`, `"fmt "`, ...).
///
/// Tags are compared byte-for-byte and never byte-swapped.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag(pub [u8; 4]);

impl Tag {
    pub const RIFF: Tag = Tag(*b"RIFF");
    pub const RIFX: Tag = Tag(*b"RIFX");
    pub const WAVE: Tag = Tag(*b"WAVE");
    pub const FMT: Tag = Tag(*b"fmt ");
    pub const FACT: Tag = Tag(*b"fact");
    pub const PEAK: Tag = Tag(*b"PEAK");
    pub const DATA: Tag = Tag(*b"data");

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(\"{self}\")")
    }
}

impl serde::Serialize for Tag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Zero-based index of a rendered frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Frame file name, zero-padded to `digit_width` digits.
    pub fn file_name(self, digit_width: usize, extension: &str) -> String {
        format!("frame-{:0width$}.{extension}", self.0, width = digit_width)
    }
}

/// Number of decimal digits needed to print `n` (at least 1).
pub fn decimal_digits(n: u64) -> usize {
    let mut digits = 1;
    let mut v = n / 10;
    while v > 0 {
        digits += 1;
        v /= 10;
    }
    digits
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
