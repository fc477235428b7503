//! RIFF/RIFX container decoding: chunk grammar, byte readers, and the typed header.

pub mod bytes;
pub mod decode;
pub mod grammar;
pub mod header;
