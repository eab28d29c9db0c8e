//! Console shim: formatted fire-and-forget output through the host print
//! primitive.

use std::rc::Rc;

use serde_json::Value;

use crate::format::format_args;
use crate::port::HostPort;

/// Script-facing `console.log` / `console.error`.
///
/// Each call formats the full argument list, appends a trailing newline, and
/// makes exactly one `print` call on the host port. Formatting completes
/// before the host is touched, so a line is either printed whole or not at
/// all.
#[derive(Debug)]
pub struct Console<P> {
    port: Rc<P>,
}

impl<P: HostPort> Console<P> {
    pub(crate) fn new(port: Rc<P>) -> Self {
        Self { port }
    }

    /// Write one formatted line to standard output.
    pub fn log(&self, values: &[Value]) {
        self.write(values, false);
    }

    /// Write one formatted line to standard error.
    pub fn error(&self, values: &[Value]) {
        self.write(values, true);
    }

    fn write(&self, values: &[Value], is_error: bool) {
        let mut line = format_args(values);
        line.push('\n');
        self.port.print(&line, is_error);
    }
}
