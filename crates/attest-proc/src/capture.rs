//! Captured standard streams.
//!
//! Code under test that reads stdin or writes stdout/stderr can be handed
//! the pipe ends held here instead of the real process streams. Background
//! threads feed the fixed input and drain everything written, so the code
//! under test never blocks on a full pipe buffer.

use std::io::{self, PipeReader, PipeWriter, Read, Write};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::error::{ProcError, ProcResult};

/// Everything written to the captured output streams.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Three captured streams around a piece of code under test.
///
/// Take the pipe ends with [`take_stdin`](CapturedIo::take_stdin),
/// [`take_stdout`](CapturedIo::take_stdout) and
/// [`take_stderr`](CapturedIo::take_stderr), run the code, drop the taken
/// ends, then call [`finish`](CapturedIo::finish) to collect the output.
/// A writer that is still alive at `finish` time keeps its drain thread
/// running, so `finish` would block until it is dropped.
#[derive(Debug)]
pub struct CapturedIo {
    stdin: Option<PipeReader>,
    stdout: Option<PipeWriter>,
    stderr: Option<PipeWriter>,
    feeder: Option<JoinHandle<()>>,
    stdout_drain: Option<JoinHandle<io::Result<Vec<u8>>>>,
    stderr_drain: Option<JoinHandle<io::Result<Vec<u8>>>>,
}

impl CapturedIo {
    /// Set up the three pipes and their background threads, with `input`
    /// queued for the stdin reader.
    pub fn new(input: &str) -> ProcResult<Self> {
        let (stdin_reader, mut stdin_writer) = io::pipe()?;
        let (stdout_reader, stdout_writer) = io::pipe()?;
        let (stderr_reader, stderr_writer) = io::pipe()?;

        let bytes = input.as_bytes().to_vec();
        let feeder = thread::spawn(move || {
            // A broken pipe here means the reader was dropped before
            // consuming everything, which is fine.
            if let Err(err) = stdin_writer.write_all(&bytes) {
                if err.kind() != io::ErrorKind::BrokenPipe {
                    warn!(%err, "could not feed the captured stdin");
                }
            }
        });

        debug!("captured standard streams are set up");
        Ok(CapturedIo {
            stdin: Some(stdin_reader),
            stdout: Some(stdout_writer),
            stderr: Some(stderr_writer),
            feeder: Some(feeder),
            stdout_drain: Some(spawn_drain(stdout_reader)),
            stderr_drain: Some(spawn_drain(stderr_reader)),
        })
    }

    /// The reader end pre-loaded with the fixed input. `None` after the
    /// first call.
    pub fn take_stdin(&mut self) -> Option<PipeReader> {
        self.stdin.take()
    }

    /// The writer end of the captured stdout. `None` after the first call.
    pub fn take_stdout(&mut self) -> Option<PipeWriter> {
        self.stdout.take()
    }

    /// The writer end of the captured stderr. `None` after the first call.
    pub fn take_stderr(&mut self) -> Option<PipeWriter> {
        self.stderr.take()
    }

    /// Close this side's pipe ends, join the background threads, and
    /// return everything that was written.
    pub fn finish(&mut self) -> ProcResult<CapturedOutput> {
        if self.stdout_drain.is_none() {
            return Err(ProcError::AlreadyFinished);
        }
        self.release_ends();

        let stdout = join_drain(self.stdout_drain.take(), "stdout")?;
        let stderr = join_drain(self.stderr_drain.take(), "stderr")?;
        debug!(
            stdout_len = stdout.len(),
            stderr_len = stderr.len(),
            "captured standard streams are finished"
        );
        Ok(CapturedOutput { stdout, stderr })
    }

    fn release_ends(&mut self) {
        self.stdin.take();
        self.stdout.take();
        self.stderr.take();
        if let Some(feeder) = self.feeder.take() {
            if feeder.join().is_err() {
                warn!("the stdin feeder thread panicked");
            }
        }
    }
}

impl Drop for CapturedIo {
    fn drop(&mut self) {
        self.release_ends();
        for drain in [self.stdout_drain.take(), self.stderr_drain.take()] {
            if let Some(handle) = drain {
                let _ = handle.join();
            }
        }
    }
}

fn spawn_drain(mut reader: PipeReader) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn join_drain(
    handle: Option<JoinHandle<io::Result<Vec<u8>>>>,
    stream: &'static str,
) -> ProcResult<Vec<u8>> {
    let Some(handle) = handle else {
        return Err(ProcError::AlreadyFinished);
    };
    match handle.join() {
        Ok(Ok(buf)) => Ok(buf),
        Ok(Err(source)) => Err(ProcError::StreamCopy { stream, source }),
        Err(_) => Err(ProcError::StreamCopy {
            stream,
            source: io::Error::other("the drain thread panicked"),
        }),
    }
}
