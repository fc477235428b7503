/// Convenience result type used across wavscope.
pub type WavscopeResult<T> = Result<T, WavscopeError>;

/// Top-level error taxonomy used by the decode, normalize, and render stages.
#[derive(thiserror::Error, Debug)]
pub enum WavscopeError {
    /// Malformed or unsupported container or sample layout.
    #[error("decode error: {0}")]
    Decode(String),

    /// Invalid settings or a combination the visualizer cannot handle.
    #[error("config error: {0}")]
    Config(String),

    /// A frame failed to render or be written to disk.
    #[error("render error: {0}")]
    Render(String),

    /// Failure creating or removing the frame directory.
    #[error("resource error: {0}")]
    Resource(String),

    /// Failure invoking the external muxer.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WavscopeError {
    /// Build a [`WavscopeError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`WavscopeError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`WavscopeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`WavscopeError::Resource`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build a [`WavscopeError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// `true` for errors raised before any frame is rendered.
    pub fn is_pre_render(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::Config(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
