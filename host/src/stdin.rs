//! Chunked line production from a blocking reader.
//!
//! Reading stdin is blocking; the event loop must never be. A dedicated
//! producer thread batches decoded lines into chunks and hands them through a
//! bounded channel - the bound is the backpressure: once the consumer falls
//! behind by `channel_capacity` chunks, the producer thread parks on the
//! channel instead of buffering the whole input.

use std::io::BufRead;

use tokio::sync::mpsc;

use weft_core::{Chunk, HostError};

use crate::HostConfig;

type ChunkResult = Result<Vec<String>, std::io::Error>;

/// Consumer half of the producer thread: an async source of [`Chunk`]s.
pub struct LineSource {
    rx: tokio::sync::Mutex<mpsc::Receiver<ChunkResult>>,
}

impl LineSource {
    /// Spawn the producer thread over `reader` and return the async consumer.
    pub fn spawn<R>(reader: R, config: &HostConfig) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(config.channel_capacity);
        let chunk_size = config.chunk_size;
        std::thread::spawn(move || produce(reader, &tx, chunk_size));
        Self {
            rx: tokio::sync::Mutex::new(rx),
        }
    }

    /// Await the next chunk. A drained, closed channel is EOF; reader IO
    /// errors arrive in-band, after any lines read before the error.
    pub async fn recv(&self) -> Result<Chunk, HostError> {
        let mut rx = self.rx.lock().await;
        match rx.recv().await {
            Some(Ok(lines)) => Ok(Chunk::Lines(lines)),
            Some(Err(e)) => Err(HostError::new("read_chunk", e.to_string())),
            None => Ok(Chunk::Eof),
        }
    }
}

/// Runs on the producer thread. Stops when the input ends, the reader fails,
/// or the consumer is gone (send failure).
fn produce<R: BufRead>(reader: R, tx: &mpsc::Sender<ChunkResult>, chunk_size: usize) {
    let mut chunk = Vec::with_capacity(chunk_size);
    for line in reader.lines() {
        match line {
            Ok(line) => {
                chunk.push(line);
                if chunk.len() == chunk_size {
                    let full = std::mem::replace(&mut chunk, Vec::with_capacity(chunk_size));
                    if tx.blocking_send(Ok(full)).is_err() {
                        return;
                    }
                }
            }
            Err(e) => {
                // Deliver what was read before surfacing the failure.
                if !chunk.is_empty() && tx.blocking_send(Ok(std::mem::take(&mut chunk))).is_err() {
                    return;
                }
                if tx.blocking_send(Err(e)).is_err() {
                    tracing::warn!("consumer gone before reader failure could be delivered");
                }
                return;
            }
        }
    }
    if !chunk.is_empty() {
        let _ = tx.blocking_send(Ok(chunk));
    }
}
