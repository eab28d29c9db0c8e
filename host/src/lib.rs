//! Tokio-backed implementation of the weft host port.
//!
//! [`TokioHost`] supplies the three primitives [`weft_core::HostPort`] asks
//! for: chunked stdin reads from a producer thread (see [`stdin`]), locked
//! write-and-flush prints to stdout/stderr, and `tokio::time::sleep` delays.
//! How input is buffered and how delays are implemented is this crate's
//! business alone; `weft-core` only ever sees the port trait.

use std::io::{BufRead, BufReader, Write};
use std::time::Duration;

use weft_core::{Chunk, HostError, HostPort};

mod stdin;
pub use stdin::LineSource;

/// Tuning for the stdin producer. Plain values, no files or environment
/// variables: the embedding binary decides and passes it in.
#[derive(Debug, Clone, Copy)]
pub struct HostConfig {
    /// Lines per chunk handed to the consumer.
    pub chunk_size: usize,
    /// Chunks allowed in flight before the producer thread blocks.
    pub channel_capacity: usize,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            channel_capacity: 10,
        }
    }
}

/// The default host: stdin lines in, stdout/stderr out, tokio timers.
pub struct TokioHost {
    source: LineSource,
}

impl TokioHost {
    /// Host reading from the process's standard input.
    #[must_use]
    pub fn from_stdin(config: &HostConfig) -> Self {
        Self::from_reader(BufReader::new(std::io::stdin()), config)
    }

    /// Host reading from any buffered reader; what the tests use.
    pub fn from_reader<R>(reader: R, config: &HostConfig) -> Self
    where
        R: BufRead + Send + 'static,
    {
        Self {
            source: LineSource::spawn(reader, config),
        }
    }
}

impl HostPort for TokioHost {
    async fn read_chunk(&self) -> Result<Chunk, HostError> {
        self.source.recv().await
    }

    fn print(&self, text: &str, is_error: bool) {
        // The port contract observes no result; a failed write is logged and
        // otherwise dropped.
        let result = if is_error {
            let mut stream = std::io::stderr().lock();
            stream
                .write_all(text.as_bytes())
                .and_then(|()| stream.flush())
        } else {
            let mut stream = std::io::stdout().lock();
            stream
                .write_all(text.as_bytes())
                .and_then(|()| stream.flush())
        };
        if let Err(e) = result {
            tracing::warn!(%e, is_error, "host print failed");
        }
    }

    async fn delay(&self, ms: u64) -> Result<(), HostError> {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        Ok(())
    }
}
