//! The host operation port.
//!
//! Everything this crate does rides on three primitive operations supplied by
//! the embedding host: a chunked asynchronous read, a synchronous print with a
//! stream selector, and an asynchronous delay. The primitives are opaque; the
//! bootstrap layer depends only on this trait, which is what makes the whole
//! crate testable against a scripted fake.

use thiserror::Error;

/// One batch of already-decoded lines from the host's read primitive, or the
/// end-of-stream sentinel.
///
/// The sentinel is a dedicated variant rather than an empty batch: an empty
/// `Lines` is a protocol violation and the line reader treats it as fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    /// Lines in arrival order, newlines already stripped.
    Lines(Vec<String>),
    /// No further chunks will ever be produced.
    Eof,
}

/// Failure of a host primitive (`read_chunk` or `delay`).
///
/// `Clone` is load-bearing: the line reader replays the failure on every pull
/// after the one that observed it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("host {operation} failed: {message}")]
pub struct HostError {
    operation: &'static str,
    message: String,
}

impl HostError {
    #[must_use]
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }

    /// The primitive that failed, e.g. `"read_chunk"`.
    #[must_use]
    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

/// The set of primitive operations a host must supply.
///
/// The layer is single-threaded and cooperative, so none of the futures need
/// to be `Send`; implementations may hold `Rc` state internally. Suspension
/// happens only inside `read_chunk` and `delay` - `print` is synchronous and
/// observes no result.
// No Send bound on the returned futures: the layer is single-threaded.
#[allow(async_fn_in_trait)]
pub trait HostPort {
    /// Asynchronously produce the next chunk of lines, the EOF sentinel, or a
    /// failure. Callers guarantee at most one `read_chunk` is in flight.
    async fn read_chunk(&self) -> Result<Chunk, HostError>;

    /// Write `text` to standard output (`is_error == false`) or standard
    /// error (`is_error == true`). No result is observed.
    fn print(&self, text: &str, is_error: bool);

    /// Resolve after at least `ms` milliseconds have elapsed.
    async fn delay(&self, ms: u64) -> Result<(), HostError>;
}
