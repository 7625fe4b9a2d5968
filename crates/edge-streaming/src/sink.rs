//! Platform-controlled streaming sink.

use std::fmt::Display;

use edge_core::{LifecyclePhase, TimingContext, WorkloadError};
use futures::{Sink, SinkExt};

/// State of the streaming sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SinkState {
    /// Initial state, shell not yet sent.
    Initial,
    /// Shell has been sent, sections can be streamed.
    ShellSent,
    /// Response has been completed.
    Completed,
}

/// Platform-controlled streaming sink that enforces shell-first pattern.
///
/// This is generic over the underlying sink type to work with any
/// `Sink<Vec<u8>>` implementation, including Spin's `OutgoingBody` and a plain
/// `Vec<Vec<u8>>` in tests.
pub struct StreamingSink<S, E>
where
    S: Sink<Vec<u8>, Error = E> + Unpin,
    E: Display,
{
    inner: S,
    state: SinkState,
    timing: TimingContext,
    sections_sent: Vec<String>,
    bytes_sent: usize,
}

impl<S, E> StreamingSink<S, E>
where
    S: Sink<Vec<u8>, Error = E> + Unpin,
    E: Display,
{
    /// Create a new streaming sink.
    pub fn new(sink: S, timing: TimingContext) -> Self {
        Self {
            inner: sink,
            state: SinkState::Initial,
            timing,
            sections_sent: Vec::new(),
            bytes_sent: 0,
        }
    }

    /// Send the shell HTML. Must be called before any sections.
    pub async fn send_shell(&mut self, html: &str) -> Result<(), WorkloadError> {
        if self.state != SinkState::Initial {
            return Err(WorkloadError::StreamError(
                "Shell already sent or sink completed".to_string(),
            ));
        }

        self.timing.mark("shell_start");
        self.write(html).await?;
        self.timing.mark("shell_sent");
        self.state = SinkState::ShellSent;

        Ok(())
    }

    /// Send a named section. Shell must be sent first.
    pub async fn send_section(&mut self, name: &str, html: &str) -> Result<(), WorkloadError> {
        match self.state {
            SinkState::Initial => return Err(WorkloadError::ShellNotSent),
            SinkState::Completed => {
                return Err(WorkloadError::StreamError(
                    "Sink already completed".to_string(),
                ))
            }
            SinkState::ShellSent => {}
        }

        self.timing.mark_section_start(name);
        self.write(html).await?;
        self.timing.mark_section_sent(name);
        self.sections_sent.push(name.to_string());

        Ok(())
    }

    /// Flush and close the underlying body.
    pub async fn complete(&mut self) -> Result<(), WorkloadError> {
        if self.state == SinkState::Initial {
            return Err(WorkloadError::ShellNotSent);
        }
        if self.state == SinkState::Completed {
            return Ok(());
        }

        self.inner
            .close()
            .await
            .map_err(|e| WorkloadError::StreamError(e.to_string()))?;
        self.state = SinkState::Completed;
        self.timing.mark("complete");
        Ok(())
    }

    async fn write(&mut self, html: &str) -> Result<(), WorkloadError> {
        self.inner
            .send(html.as_bytes().to_vec())
            .await
            .map_err(|e| WorkloadError::StreamError(e.to_string()))?;
        self.bytes_sent += html.len();
        Ok(())
    }

    /// Get the list of sections sent.
    pub fn sections_sent(&self) -> &[String] {
        &self.sections_sent
    }

    /// Total body bytes written so far.
    pub fn bytes_sent(&self) -> usize {
        self.bytes_sent
    }

    /// Get the current lifecycle phase.
    pub fn phase(&self) -> LifecyclePhase {
        match (self.state, self.sections_sent.last()) {
            (SinkState::Initial, _) => LifecyclePhase::Start,
            (SinkState::ShellSent, None) => LifecyclePhase::ShellSent,
            (SinkState::ShellSent, Some(last)) => LifecyclePhase::SectionSent(last.clone()),
            (SinkState::Completed, _) => LifecyclePhase::Completion,
        }
    }

    /// Get timing context reference.
    pub fn timing(&self) -> &TimingContext {
        &self.timing
    }

    /// Consume the sink and return the inner value.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use futures::executor::block_on;

    use super::*;

    fn sink() -> StreamingSink<Vec<Vec<u8>>, Infallible> {
        StreamingSink::new(Vec::new(), TimingContext::new())
    }

    #[test]
    fn test_shell_then_sections() {
        let mut sink = sink();
        block_on(async {
            sink.send_shell("<html>").await.unwrap();
            assert_eq!(sink.phase(), LifecyclePhase::ShellSent);
            sink.send_section("latest", "<section>a</section>").await.unwrap();
            sink.send_section("all", "<section>b</section>").await.unwrap();
            assert_eq!(sink.phase(), LifecyclePhase::SectionSent("all".into()));
            sink.complete().await.unwrap();
        });

        assert_eq!(sink.phase(), LifecyclePhase::Completion);
        assert_eq!(sink.sections_sent(), ["latest", "all"]);
        assert_eq!(sink.bytes_sent(), 6 + 20 + 20);
        assert!(sink.timing().time_to_shell().is_some());
        assert!(sink.timing().has_mark("complete"));

        let chunks = sink.into_inner();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], b"<html>");
    }

    #[test]
    fn test_section_before_shell_is_rejected() {
        let mut sink = sink();
        let err = block_on(sink.send_section("latest", "x")).unwrap_err();
        assert!(matches!(err, WorkloadError::ShellNotSent));
        assert_eq!(sink.phase(), LifecyclePhase::Start);
        assert!(sink.into_inner().is_empty());
    }

    #[test]
    fn test_shell_twice_is_rejected() {
        let mut sink = sink();
        block_on(sink.send_shell("a")).unwrap();
        assert!(matches!(
            block_on(sink.send_shell("b")),
            Err(WorkloadError::StreamError(_))
        ));
    }

    #[test]
    fn test_nothing_after_complete() {
        let mut sink = sink();
        block_on(async {
            sink.send_shell("a").await.unwrap();
            sink.complete().await.unwrap();
            sink.complete().await.unwrap();
            assert!(sink.send_section("late", "x").await.is_err());
        });
        assert_eq!(sink.into_inner().len(), 1);
    }

    #[test]
    fn test_complete_requires_shell() {
        let mut sink = sink();
        assert!(matches!(
            block_on(sink.complete()),
            Err(WorkloadError::ShellNotSent)
        ));
    }
}
