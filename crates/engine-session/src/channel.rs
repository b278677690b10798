//! Line-oriented duplex channels to a UCI engine.
//!
//! The session never talks to a process directly; it talks to a
//! [`LineChannel`]. [`ProcessChannel`] is the real implementation over a
//! child process's stdin/stdout pipes.

use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, ExitStatus, Stdio};

/// A bidirectional, line-based connection to an engine.
pub trait LineChannel {
    /// Write one line (a trailing newline is added) and flush it.
    fn send_line(&mut self, line: &str) -> io::Result<()>;

    /// Block until the engine writes a complete line.
    ///
    /// Returns `Ok(None)` once the engine has closed its output. The
    /// returned line has its line ending and trailing whitespace removed.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Whether the engine is still running.
    fn is_alive(&mut self) -> bool;

    /// Stop the engine and release both directions of the channel.
    ///
    /// Every release step runs even if an earlier one fails; the first
    /// failure is returned. Calling this again after it returned is a no-op.
    fn terminate(&mut self) -> io::Result<()>;
}

/// A [`LineChannel`] over the pipes of a spawned engine process.
pub struct ProcessChannel {
    /// The child process handle.
    process: Child,
    /// Handle to write commands to the engine's stdin. `None` once released.
    stdin: Option<ChildStdin>,
    /// Buffered reader for the engine's stdout. `None` once released.
    stdout: Option<BufReader<ChildStdout>>,
}

impl ProcessChannel {
    /// Spawns the engine executable with piped stdin/stdout.
    ///
    /// The engine's stderr is discarded.
    ///
    /// # Errors
    ///
    /// Returns the spawn error if the process cannot be started, or a
    /// [`io::ErrorKind::BrokenPipe`] error if either pipe could not be opened
    /// (the process is killed in that case).
    pub fn spawn<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let mut process = Command::new(path.as_ref())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let (stdin, stdout) = match (process.stdin.take(), process.stdout.take()) {
            (Some(stdin), Some(stdout)) => (stdin, stdout),
            _ => {
                let _ = process.kill();
                let _ = process.wait();
                return Err(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "failed to open engine stdin/stdout",
                ));
            }
        };

        tracing::info!(
            "Spawned engine {} (pid {})",
            path.as_ref().display(),
            process.id()
        );

        Ok(Self {
            process,
            stdin: Some(stdin),
            stdout: Some(BufReader::new(stdout)),
        })
    }
}

impl LineChannel for ProcessChannel {
    fn send_line(&mut self, line: &str) -> io::Result<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "engine stdin is closed"))?;
        tracing::debug!("> {}", line);
        writeln!(stdin, "{}", line)?;
        stdin.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let stdout = self
            .stdout
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "engine stdout is closed"))?;
        let mut line = String::new();
        if stdout.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim_end().to_string();
        tracing::debug!("< {}", line);
        Ok(Some(line))
    }

    fn is_alive(&mut self) -> bool {
        matches!(self.process.try_wait(), Ok(None))
    }

    fn terminate(&mut self) -> io::Result<()> {
        let process = &mut self.process;
        let killed = kill_unless_exited(process.try_wait(), || process.kill());
        let reaped = self.process.wait().map(|status| {
            tracing::info!("Engine exited with {}", status);
        });

        // Dropping the handles closes the pipes
        self.stdin.take();
        self.stdout.take();

        killed.and(reaped)
    }
}

/// Kills the engine unless it is known to have exited already.
///
/// A failed status query still kills, so the `wait` that follows cannot
/// block on a live engine. The status error is returned either way.
fn kill_unless_exited(
    exited: io::Result<Option<ExitStatus>>,
    kill: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    match exited {
        Ok(Some(_)) => Ok(()),
        Ok(None) => kill(),
        Err(e) => {
            if let Err(kill_err) = kill() {
                tracing::warn!("Failed to kill engine after status error: {}", kill_err);
            }
            Err(e)
        }
    }
}
