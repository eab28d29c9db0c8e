//! Deterministic fake host port shared by the integration suite.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use weft_core::{Chunk, HostError, HostPort};

/// Shared view of everything a [`FakePort`] printed, usable after the port
/// itself has been moved into an `Environment`.
#[derive(Clone, Default)]
pub struct PrintLog(Rc<RefCell<Vec<(String, bool)>>>);

impl PrintLog {
    pub fn entries(&self) -> Vec<(String, bool)> {
        self.0.borrow().clone()
    }
}

/// Plays back a scripted sequence of `read_chunk` results, records every
/// `print`, and sleeps on `delay` (virtual time under a paused runtime).
pub struct FakePort {
    reads: RefCell<VecDeque<Result<Chunk, HostError>>>,
    prints: PrintLog,
    read_in_flight: Cell<bool>,
}

impl FakePort {
    pub fn new(script: Vec<Result<Chunk, HostError>>) -> Self {
        Self {
            reads: RefCell::new(script.into()),
            prints: PrintLog::default(),
            read_in_flight: Cell::new(false),
        }
    }

    pub fn chunk(batch: &[&str]) -> Result<Chunk, HostError> {
        Ok(Chunk::Lines(batch.iter().map(ToString::to_string).collect()))
    }

    pub fn print_log(&self) -> PrintLog {
        self.prints.clone()
    }
}

impl HostPort for FakePort {
    async fn read_chunk(&self) -> Result<Chunk, HostError> {
        assert!(!self.read_in_flight.replace(true), "concurrent read_chunk");
        tokio::task::yield_now().await;
        self.read_in_flight.set(false);
        self.reads
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(Chunk::Eof))
    }

    fn print(&self, text: &str, is_error: bool) {
        self.prints.0.borrow_mut().push((text.to_string(), is_error));
    }

    async fn delay(&self, ms: u64) -> Result<(), HostError> {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        Ok(())
    }
}
