//! Error types for the decision core
//!
//! Every failure here is local and recoverable: the worst outcome a turn
//! can reach is an ASK stance or CENTER damping, never a crash.

use thiserror::Error;

/// Result alias used across the core
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors the decision core surfaces to its caller
#[derive(Debug, Error)]
pub enum CoreError {
    /// Empty or whitespace-only message; the turn is aborted before
    /// any conversation state is touched
    #[error("empty message: nothing to decide")]
    EmptyMessage,

    /// A claim cited an evidence id the pack does not carry
    #[error("evidence record '{0}' not found in pack")]
    EvidenceNotFound(String),

    /// Frozen configuration failed its checksum re-check
    #[error("frozen config integrity violation (expected {expected}, computed {computed})")]
    IntegrityViolation {
        /// Checksum recorded when the config was sealed (hex)
        expected: String,
        /// Checksum recomputed from the current value (hex)
        computed: String,
    },

    /// An evidence pack file could not be parsed
    #[error("malformed evidence pack: {0}")]
    PackFormat(#[from] serde_json::Error),
}

impl CoreError {
    /// True for the integrity variant, which must force CENTER damping
    pub fn is_integrity(&self) -> bool {
        matches!(self, CoreError::IntegrityViolation { .. })
    }
}
