use thiserror::Error;

/// Errors surfaced by the engine during configuration and startup.
///
/// Per-frame work never fails: malformed input is dropped and logged instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The drawing surface reported a degenerate or non-finite size.
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Embedded or host-supplied JSON failed to parse.
    #[error("malformed data: {0}")]
    Data(#[from] serde_json::Error),
}
