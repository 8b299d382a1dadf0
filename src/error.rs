// =============================================================================
// Typed provider errors
// =============================================================================
//
// The fetch collaborators return `FetchError` rather than collapsing every
// failure into "no data". The service layer treats each variant the same way
// (degrade to the documented fallback payload), but logs them distinctly so
// an unreachable upstream is not mistaken for a broken parser.

use thiserror::Error;

/// Failure reported by an upstream fetch collaborator.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The upstream could not be reached or answered with a failure status.
    #[error("upstream unavailable: {0}")]
    Upstream(String),

    /// The upstream answered but the body did not match the expected shape.
    #[error("malformed upstream payload: {0}")]
    Malformed(String),

    /// The upstream answered with a well-formed but empty payload.
    #[error("upstream returned no data")]
    Empty,
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Upstream(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_detail() {
        let err = FetchError::Upstream("connect timeout".into());
        assert!(err.to_string().contains("connect timeout"));

        let err = FetchError::Malformed("expected array".into());
        assert!(err.to_string().contains("expected array"));
    }
}
