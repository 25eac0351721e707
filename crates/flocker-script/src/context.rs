//! Process context and injectable output streams.
//!
//! Scripts never write to the real process streams directly. Every component
//! receives an [`OutputStream`] handle, and the handles default to the ones
//! carried by a [`ProcessContext`]. Tests swap in a context built by
//! [`ProcessContext::captured`] and read back what was written.
//!
//! ```rust,ignore
//! use flocker_script::ProcessContext;
//!
//! let context = ProcessContext::captured(["flocker-volume", "--version"]);
//! assert_eq!(context.arguments().len(), 1);
//! ```

use std::ffi::OsString;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;

static PROCESS: Lazy<ProcessContext> = Lazy::new(|| {
    ProcessContext::new(
        std::env::args_os(),
        OutputStream::stdout(),
        OutputStream::stderr(),
    )
});

#[derive(Debug)]
enum Sink {
    Stdout,
    Stderr,
    Memory(Vec<u8>),
}

/// A shared, cheaply cloneable handle to an output destination.
///
/// Clones refer to the same destination; use [`OutputStream::ptr_eq`] to
/// check whether two handles are the same stream.
#[derive(Clone, Debug)]
pub struct OutputStream {
    sink: Arc<Mutex<Sink>>,
}

impl OutputStream {
    fn from_sink(sink: Sink) -> Self {
        Self {
            sink: Arc::new(Mutex::new(sink)),
        }
    }

    /// A handle writing to the process standard output.
    pub fn stdout() -> Self {
        Self::from_sink(Sink::Stdout)
    }

    /// A handle writing to the process standard error.
    pub fn stderr() -> Self {
        Self::from_sink(Sink::Stderr)
    }

    /// An in-memory stream that records everything written to it.
    pub fn memory() -> Self {
        Self::from_sink(Sink::Memory(Vec::new()))
    }

    /// Whether both handles refer to the same underlying stream.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.sink, &other.sink)
    }

    /// Bytes captured by an in-memory stream. Empty for process streams.
    pub fn contents(&self) -> Vec<u8> {
        match &*self.lock() {
            Sink::Memory(buffer) => buffer.clone(),
            Sink::Stdout | Sink::Stderr => Vec::new(),
        }
    }

    /// Captured bytes decoded as UTF-8, replacing invalid sequences.
    pub fn contents_lossy(&self) -> String {
        String::from_utf8_lossy(&self.contents()).into_owned()
    }

    /// Write `text` in full and flush.
    pub fn write_text(&self, text: &str) -> io::Result<()> {
        let mut handle = self.clone();
        handle.write_all(text.as_bytes())?;
        handle.flush()
    }

    fn lock(&self) -> MutexGuard<'_, Sink> {
        // A panic mid-write leaves the buffer usable.
        self.sink.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Write for OutputStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut *self.lock() {
            Sink::Stdout => io::stdout().write(buf),
            Sink::Stderr => io::stderr().write(buf),
            Sink::Memory(buffer) => buffer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.lock() {
            Sink::Stdout => io::stdout().flush(),
            Sink::Stderr => io::stderr().flush(),
            Sink::Memory(_) => Ok(()),
        }
    }
}

struct ContextInner {
    argv: Vec<OsString>,
    stdout: OutputStream,
    stderr: OutputStream,
}

/// The system context a script runs in: its argument vector and default
/// output streams.
///
/// Components receive a context explicitly; only a binary's entry point should
/// ask for [`ProcessContext::current`].
#[derive(Clone)]
pub struct ProcessContext {
    inner: Arc<ContextInner>,
}

impl ProcessContext {
    /// Build a context from an argument vector (program name first) and streams.
    pub fn new<I, A>(argv: I, stdout: OutputStream, stderr: OutputStream) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        Self {
            inner: Arc::new(ContextInner {
                argv: argv.into_iter().map(Into::into).collect(),
                stdout,
                stderr,
            }),
        }
    }

    /// The context of the running process.
    ///
    /// Every call returns a handle to the same context.
    pub fn current() -> Self {
        PROCESS.clone()
    }

    /// A context whose streams are in-memory buffers.
    pub fn captured<I, A>(argv: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        Self::new(argv, OutputStream::memory(), OutputStream::memory())
    }

    /// The full argument vector, including the program name.
    pub fn argv(&self) -> &[OsString] {
        &self.inner.argv
    }

    /// The argument vector without the program name.
    pub fn arguments(&self) -> &[OsString] {
        self.inner.argv.get(1..).unwrap_or_default()
    }

    /// The default output stream.
    pub fn stdout(&self) -> &OutputStream {
        &self.inner.stdout
    }

    /// The default error stream.
    pub fn stderr(&self) -> &OutputStream {
        &self.inner.stderr
    }

    /// Whether both handles refer to the same context.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ProcessContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessContext")
            .field("argv", &self.inner.argv)
            .finish_non_exhaustive()
    }
}
