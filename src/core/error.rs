use thiserror::Error;

/// Errors from the render → map → embed pipeline.
///
/// All variants are fail-fast and non-retryable: no stage ever returns
/// partial output, and retrying means re-invoking the whole pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PipelineError {
    /// The referenced invoice does not exist; no work was attempted.
    #[error("invoice not found")]
    NotFound,

    /// The visual document could not be composed.
    #[error("render error: {0}")]
    Render(String),

    /// The structured payload could not be constructed or serialized.
    #[error("mapping error: {0}")]
    Mapping(String),

    /// Attaching the payload to the document failed.
    #[error("embedding error: {0}")]
    Embedding(String),
}

impl PipelineError {
    /// Whether this error maps to a missing-resource response at the
    /// transport boundary (as opposed to an internal failure).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}
