//! Global-environment bootstrap layer for an embedded scripting host.
//!
//! # Architecture
//!
//! The host supplies three opaque asynchronous primitives through the
//! [`HostPort`] trait; this crate bridges them into the idioms script code
//! actually wants:
//!
//! | Primitive | Script-facing surface |
//! |-----------|----------------------|
//! | `read_chunk` | [`LineReader`] - a per-line async pull iterator |
//! | `print` | [`Console`] - `log` / `error` with formatted arguments |
//! | `delay` | [`Timers`] - one-shot `set_timeout` scheduling |
//!
//! Everything runs on one cooperative thread. Suspension happens only at the
//! host-operation boundaries (awaiting a chunk read or a delay), never inside
//! formatting or iteration bookkeeping, and the line reader keeps at most one
//! read in flight - that is where ordering and backpressure come from.
//!
//! # Construction
//!
//! There is no ambient global state. [`Environment::new`] takes the host port
//! and returns the constructed shims as plain values; the embedder decides
//! how and where to expose them to script code:
//!
//! ```no_run
//! # async fn demo(port: impl weft_core::HostPort + 'static) {
//! use serde_json::json;
//!
//! let mut env = weft_core::Environment::new(port);
//! let mut stdin = env.take_stdin().unwrap();
//! while let Ok(Some(line)) = stdin.next().await {
//!     env.console().log(&[json!(line)]);
//! }
//! # }
//! ```
//!
//! # Error Handling
//!
//! A host primitive failure aborts only the call site that was awaiting it:
//! a failed read surfaces on that pull (and sticks), a failed delay drops the
//! one timer and is logged. Nothing tears down the other shims.

mod console;
mod format;
mod lines;
mod port;
mod timer;

pub use console::Console;
pub use format::{UNSERIALIZABLE_TOKEN, format_args};
pub use lines::{LineReader, ReadError};
pub use port::{Chunk, HostError, HostPort};
pub use timer::Timers;

use std::rc::Rc;

/// The bootstrap entry point: all three shims wired to one host port.
///
/// The line reader is yielded by value exactly once via
/// [`take_stdin`](Self::take_stdin) - the line sequence is finite and not
/// restartable, so a fresh iteration requires a fresh environment.
pub struct Environment<P> {
    console: Console<P>,
    timers: Timers<P>,
    stdin: Option<LineReader<P>>,
}

impl<P: HostPort + 'static> Environment<P> {
    #[must_use]
    pub fn new(port: P) -> Self {
        let port = Rc::new(port);
        Self {
            console: Console::new(Rc::clone(&port)),
            timers: Timers::new(Rc::clone(&port)),
            stdin: Some(LineReader::new(port)),
        }
    }

    #[must_use]
    pub fn console(&self) -> &Console<P> {
        &self.console
    }

    #[must_use]
    pub fn timers(&self) -> &Timers<P> {
        &self.timers
    }

    /// Take ownership of the line iterator. Returns `None` after the first
    /// call.
    pub fn take_stdin(&mut self) -> Option<LineReader<P>> {
        self.stdin.take()
    }
}
