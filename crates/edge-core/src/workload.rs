//! Workload error type.

/// Error type for workload operations.
#[derive(Debug, thiserror::Error)]
pub enum WorkloadError {
    #[error("Shell not sent before sections")]
    ShellNotSent,

    #[error("Streaming error: {0}")]
    StreamError(String),

    /// The page could not be built. The cause chain is kept as the source.
    #[error("Page generation failed")]
    Generation(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;
    use anyhow::Context;

    #[test]
    fn test_generation_error_keeps_context_chain() {
        let inner: Result<(), std::io::Error> = Err(std::io::Error::other("connection reset"));
        let err: WorkloadError = inner.context("loading episodes").unwrap_err().into();
        assert_eq!(err.to_string(), "Page generation failed");

        let mut chain = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }
        assert_eq!(chain, ["loading episodes", "connection reset"]);
    }

    #[test]
    fn test_stream_error_message() {
        let err = WorkloadError::StreamError("closed".into());
        assert_eq!(err.to_string(), "Streaming error: closed");
        assert!(err.source().is_none());
    }
}
