use thiserror::Error;

/// Typed errors for the pitchcraft system.
///
/// Upstream-service failures (engine or retrieval) are recovered locally
/// via fallback paths and never surface through this enum; only
/// caller-contract violations and configuration problems are hard errors.
#[derive(Debug, Error)]
pub enum PitchError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("tool error: {0}")]
    Tool(String),
}
