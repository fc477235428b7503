//! Sample-to-pixel-row mapping.

pub mod pass;
pub mod range;
