//! Timer shim: one-shot delayed callbacks over the host delay primitive.

use std::rc::Rc;

use crate::port::HostPort;

/// Script-facing `setTimeout`.
///
/// Scheduling is fire-and-forget: no handle is returned and there is no
/// cancellation. Each pending timer is an independent local task, so timers
/// never delay one another; no relative firing order is promised between
/// timers beyond what the host delay primitive provides.
#[derive(Debug)]
pub struct Timers<P> {
    port: Rc<P>,
}

impl<P: HostPort + 'static> Timers<P> {
    pub(crate) fn new(port: Rc<P>) -> Self {
        Self { port }
    }

    /// Invoke `callback` exactly once, no earlier than `delay_ms` milliseconds
    /// from now.
    ///
    /// The callback runs on the same cooperative thread as everything else, so
    /// it need not be `Send`. If the host delay primitive fails, the callback
    /// is not invoked; fire-and-forget leaves no caller-visible propagation
    /// path, so the failure goes to the log instead.
    ///
    /// Must be called from within a `tokio` local task context (e.g. inside
    /// [`tokio::task::LocalSet::run_until`]).
    pub fn set_timeout<F>(&self, callback: F, delay_ms: u64)
    where
        F: FnOnce() + 'static,
    {
        let port = Rc::clone(&self.port);
        tokio::task::spawn_local(async move {
            match port.delay(delay_ms).await {
                Ok(()) => callback(),
                Err(e) => {
                    tracing::warn!(%e, delay_ms, "timer delay failed; callback dropped");
                }
            }
        });
    }
}
