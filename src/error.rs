use thiserror::Error;

/// Failures surfaced while turning input text into a JSON value. The graph
/// builder and layout engine are total and add no variants of their own.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input text is not valid JSON and no repair was attempted.
    #[error("invalid JSON: {0}")]
    Invalid(#[source] serde_json::Error),

    /// Input text is not valid JSON and the one-shot repair pass failed too.
    #[error("invalid JSON ({parse}); repair failed ({repair})")]
    RepairFailed { parse: String, repair: String },
}
