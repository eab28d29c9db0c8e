//! Async line iteration over the host's chunked read primitive.
//!
//! The host hands back whole chunks of lines; script code wants them one at a
//! time. [`LineReader`] is the bridge: a pull-based state machine that drains
//! the buffered chunk before requesting the next one, so at most one
//! `read_chunk` is ever in flight. That single-in-flight rule is what gives
//! strict ordering and backpressure - the host is never asked for more input
//! than the consumer has caught up with.

use std::collections::VecDeque;
use std::rc::Rc;

use futures_util::Stream;
use thiserror::Error;

use crate::port::{Chunk, HostError, HostPort};

/// A pull failed, either because the host read primitive failed or because
/// the host returned a malformed chunk.
///
/// Both kinds are fatal to the reader: every pull after the one that observed
/// the failure returns an equal error (no resurrection).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error(transparent)]
    Host(#[from] HostError),
    #[error("host protocol violation: {0}")]
    Protocol(&'static str),
}

enum ReaderState {
    /// Producing. `buffered` holds the undelivered remainder of the current
    /// chunk; empty means the next pull must ask the host.
    Buffered { lines: VecDeque<String> },
    /// The host signalled EOF. Every later pull yields `Ok(None)`.
    Done,
    /// A read failed. Every later pull replays the error.
    Failed(ReadError),
}

/// Per-line pull iterator over the host's chunk stream.
///
/// Constructed once per [`Environment`](crate::Environment); the sequence is
/// finite and not restartable. Holding `&mut self` across the await in
/// [`next`](Self::next) is what enforces the single-in-flight read.
pub struct LineReader<P> {
    port: Rc<P>,
    state: ReaderState,
}

impl<P: HostPort> LineReader<P> {
    pub(crate) fn new(port: Rc<P>) -> Self {
        Self {
            port,
            state: ReaderState::Buffered {
                lines: VecDeque::new(),
            },
        }
    }

    /// Pull the next line.
    ///
    /// Yields immediately when a buffered line remains; otherwise suspends on
    /// one `read_chunk` call. `Ok(None)` means EOF, permanently. Lines
    /// delivered before a failure are never lost - the failure only surfaces
    /// on the pull that actually had to touch the host.
    pub async fn next(&mut self) -> Result<Option<String>, ReadError> {
        match &mut self.state {
            ReaderState::Done => return Ok(None),
            ReaderState::Failed(err) => return Err(err.clone()),
            ReaderState::Buffered { lines } => {
                if let Some(line) = lines.pop_front() {
                    return Ok(Some(line));
                }
            }
        }

        match self.port.read_chunk().await {
            Ok(Chunk::Lines(batch)) => self.accept_chunk(batch).map(Some),
            Ok(Chunk::Eof) => {
                self.state = ReaderState::Done;
                Ok(None)
            }
            Err(e) => {
                let err = ReadError::Host(e);
                self.state = ReaderState::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Buffer a fresh chunk and hand out its first line, after checking the
    /// shape the host promised: chunks are non-empty and lines carry no
    /// embedded newline.
    fn accept_chunk(&mut self, batch: Vec<String>) -> Result<String, ReadError> {
        if batch.iter().any(|line| line.contains('\n')) {
            return Err(self.fail_protocol("line contains an embedded newline"));
        }
        let mut lines = VecDeque::from(batch);
        let Some(first) = lines.pop_front() else {
            return Err(self.fail_protocol("empty chunk"));
        };
        self.state = ReaderState::Buffered { lines };
        Ok(first)
    }

    fn fail_protocol(&mut self, violation: &'static str) -> ReadError {
        let err = ReadError::Protocol(violation);
        self.state = ReaderState::Failed(err.clone());
        err
    }

    /// Adapt the reader into a [`Stream`] of lines.
    ///
    /// The stream ends at EOF, or after yielding a single error item; it never
    /// produces anything past either.
    pub fn into_stream(self) -> impl Stream<Item = Result<String, ReadError>> {
        futures_util::stream::unfold(Some(self), |slot| async move {
            let mut reader = slot?;
            match reader.next().await {
                Ok(Some(line)) => Some((Ok(line), Some(reader))),
                Ok(None) => None,
                Err(e) => Some((Err(e), None)),
            }
        })
    }
}
