//! Sample extraction from the container's data region.

pub mod alaw;
pub mod decode;
pub mod format;
