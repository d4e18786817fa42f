//! Line-oriented output shared by concurrently running check-in tasks.
use parking_lot::Mutex;
use std::io::{self, Stdout, Write};

/// Anything tasks can report status lines to.
///
/// Implementations must write each line atomically with respect to other callers.
pub trait LineSink: Send + Sync {
    // Write `line` followed by a newline. Errors from the underlying writer are
    // returned as-is.
    fn write_line(&self, line: &str) -> io::Result<()>;
}

/// Serializes writes to `W` behind a single lock.
pub struct ConsoleSink<W> {
    out: Mutex<W>,
}

impl ConsoleSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write + Send> LineSink for ConsoleSink<W> {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut out = self.out.lock();
        writeln!(out, "{line}")?;
        out.flush()
    }
}
