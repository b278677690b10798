//! Synchronous UCI session with a single engine process.
//!
//! Every public operation is a fixed sequence of command/response
//! exchanges. UCI has no request identifiers, so ordering is enforced with a
//! readiness barrier (`isready` → `readyok`) before every command that
//! changes or reads engine state, and with an explicit [`SessionState`] that
//! refuses a new command while the previous one is unacknowledged.
//!
//! # Example
//!
//! ```no_run
//! use engine_session::{EngineOption, EngineSession};
//!
//! let mut session = EngineSession::spawn("/usr/bin/stockfish", &[EngineOption::skill_level(5)])?;
//! let mv = session.best_move("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 5)?;
//! println!("Best move: {}", mv);
//! session.shutdown()?;
//! # Ok::<(), engine_session::SessionError>(())
//! ```

use crate::channel::{LineChannel, ProcessChannel};
use crate::config::EngineSettings;
use crate::error::{ProtocolError, SessionError};
use crate::option::EngineOption;
use crate::response::{ResponseBuffer, Terminator};
use std::path::{Path, PathBuf};
use uci::{GuiCommand, BEST_MOVE_PREFIX, CHECKERS_PREFIX, READY_OK};

/// Think time used when none is configured.
pub const DEFAULT_MOVETIME_MS: u64 = 1000;

/// Where the session is in its command/acknowledge cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No exchange is outstanding; any command may be sent.
    Idle,
    /// A command was sent and its acknowledgment has not been read yet.
    /// Only `isready` may be sent.
    AwaitingAck,
    /// An I/O failure left the engine in an unknown state.
    Broken,
    /// The session was shut down.
    Closed,
}

/// A live UCI session with one engine.
///
/// The session exclusively owns its channel. Every protocol operation takes
/// `&mut self`; share a session across threads only behind a lock.
///
/// Dropping the session shuts it down on a best-effort basis.
pub struct EngineSession<C: LineChannel = ProcessChannel> {
    /// Engine executable, resolved once at construction.
    executable: PathBuf,
    channel: C,
    state: SessionState,
    movetime_ms: u64,
}

impl EngineSession<ProcessChannel> {
    /// Spawns the engine described by `settings`.
    ///
    /// The settings' options are applied first, then `options`, so a caller
    /// option overrides a configured one with the same name.
    ///
    /// # Errors
    ///
    /// [`SessionError::Initialization`] if the engine cannot be started or
    /// an option cannot be applied.
    pub fn new(settings: &EngineSettings, options: &[EngineOption]) -> Result<Self, SessionError> {
        let mut all_options = settings.engine_options();
        all_options.extend_from_slice(options);

        let session = Self::spawn(settings.executable_path(), &all_options)?;
        Ok(session.with_movetime(settings.movetime_ms))
    }

    /// Spawns the engine at `path` and applies `options`.
    ///
    /// # Errors
    ///
    /// [`SessionError::Initialization`] if the process cannot be spawned, its
    /// pipes cannot be opened, or an option cannot be applied.
    pub fn spawn<P: AsRef<Path>>(path: P, options: &[EngineOption]) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let channel =
            ProcessChannel::spawn(path).map_err(|e| SessionError::initialization(path, e))?;
        Self::with_channel(path, channel, options)
    }
}

impl<C: LineChannel> EngineSession<C> {
    /// Wraps an already-connected channel and applies `options`.
    ///
    /// Each option is followed by a readiness barrier.
    ///
    /// # Errors
    ///
    /// [`SessionError::Initialization`] if applying an option fails. The
    /// channel is terminated before returning.
    pub fn with_channel(
        executable: impl Into<PathBuf>,
        channel: C,
        options: &[EngineOption],
    ) -> Result<Self, SessionError> {
        let mut session = Self {
            executable: executable.into(),
            channel,
            state: SessionState::Idle,
            movetime_ms: DEFAULT_MOVETIME_MS,
        };

        for option in options {
            if let Err(e) = session.set_option(option) {
                if let Err(shutdown_err) = session.shutdown() {
                    tracing::warn!(
                        "Failed to release engine after initialization error: {}",
                        shutdown_err
                    );
                }
                return Err(SessionError::initialization(session.executable.clone(), e));
            }
        }

        Ok(session)
    }

    /// Sets the think time for [`best_move`](Self::best_move).
    pub fn with_movetime(mut self, movetime_ms: u64) -> Self {
        self.movetime_ms = movetime_ms;
        self
    }

    /// The executable this session was started from.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Current protocol state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Think time handed to `go movetime`.
    pub fn movetime_ms(&self) -> u64 {
        self.movetime_ms
    }

    /// Asks the engine for its best move from `position` (a FEN string) at
    /// the given skill level.
    ///
    /// Returns the first token of the latest `bestmove` line, or an empty
    /// string if the engine sent no move token.
    pub fn best_move(&mut self, position: &str, difficulty: i32) -> Result<String, SessionError> {
        self.wait_for_ready()?;
        self.set_option(&EngineOption::skill_level(difficulty))?;

        self.send(&GuiCommand::position_fen(position, ""))?;

        self.wait_for_ready()?;
        self.send(&GuiCommand::Go {
            movetime: self.movetime_ms,
        })?;

        let response = self.read_response(Terminator::Prefix(BEST_MOVE_PREFIX))?;
        Ok(response.best_move())
    }

    /// Squares of the pieces giving check in `position`.
    ///
    /// Empty when nothing gives check, or when the engine printed no
    /// `Checkers:` squares.
    pub fn checkers(&mut self, position: &str) -> Result<Vec<String>, SessionError> {
        self.wait_for_ready()?;
        self.send(&GuiCommand::position_fen(position, ""))?;

        let response = self.display()?;
        Ok(response.checkers())
    }

    /// The engine's canonical FEN for its current position, or an empty
    /// string if the diagram carried none.
    pub fn current_position(&mut self) -> Result<String, SessionError> {
        Ok(self.display()?.fen())
    }

    /// Plays `moves` (one move or a whitespace-separated list) from
    /// `position` and returns the resulting FEN as echoed by the engine.
    pub fn apply_move(&mut self, position: &str, moves: &str) -> Result<String, SessionError> {
        self.wait_for_ready()?;
        self.send(&GuiCommand::position_fen(position, moves))?;
        self.current_position()
    }

    /// Whether the engine process is still running. Sends nothing.
    pub fn is_alive(&mut self) -> bool {
        self.channel.is_alive()
    }

    /// Stops the engine and releases its pipes.
    ///
    /// `quit` is sent best-effort; the process is terminated whether or not
    /// that send succeeded. Calling this on a closed session does nothing.
    ///
    /// # Errors
    ///
    /// [`SessionError::Shutdown`] if terminating the process or releasing
    /// the pipes failed. The session is closed either way.
    pub fn shutdown(&mut self) -> Result<(), SessionError> {
        if self.state == SessionState::Closed {
            return Ok(());
        }

        if let Err(e) = self.channel.send_line(&GuiCommand::Quit.to_uci()) {
            tracing::warn!("Failed to send quit to engine: {}", e);
        }
        self.state = SessionState::Closed;

        self.channel.terminate().map_err(SessionError::Shutdown)?;
        tracing::info!("Engine session {} shut down", self.executable.display());
        Ok(())
    }

    /// `d` → board diagram up to the `Checkers:` line.
    fn display(&mut self) -> Result<ResponseBuffer, ProtocolError> {
        self.wait_for_ready()?;
        self.send(&GuiCommand::Display)?;
        self.read_response(Terminator::Prefix(CHECKERS_PREFIX))
    }

    /// `setoption` followed by a barrier, leaving the session idle.
    fn set_option(&mut self, option: &EngineOption) -> Result<(), ProtocolError> {
        self.send(&option.to_command())?;
        self.wait_for_ready()
    }

    /// Readiness barrier: `isready`, then discard everything up to and
    /// including exactly one `readyok`.
    fn wait_for_ready(&mut self) -> Result<(), ProtocolError> {
        self.send(&GuiCommand::IsReady)?;
        self.read_response(Terminator::Exact(READY_OK))?;
        Ok(())
    }

    fn ensure_usable(&self) -> Result<(), ProtocolError> {
        match self.state {
            SessionState::Broken => Err(ProtocolError::Broken),
            SessionState::Closed => Err(ProtocolError::Closed),
            SessionState::Idle | SessionState::AwaitingAck => Ok(()),
        }
    }

    fn send(&mut self, command: &GuiCommand) -> Result<(), ProtocolError> {
        self.ensure_usable()?;

        let is_ready_check = matches!(command, GuiCommand::IsReady);
        if self.state == SessionState::AwaitingAck && !is_ready_check {
            return Err(ProtocolError::ExchangeOutstanding {
                command: command.to_uci(),
            });
        }

        if let Err(e) = self.channel.send_line(&command.to_uci()) {
            self.state = SessionState::Broken;
            return Err(e.into());
        }
        self.state = SessionState::AwaitingAck;
        Ok(())
    }

    fn read_response(&mut self, terminator: Terminator<'_>) -> Result<ResponseBuffer, ProtocolError> {
        self.ensure_usable()?;

        match ResponseBuffer::collect(&mut self.channel, terminator) {
            Ok(response) => {
                self.state = SessionState::Idle;
                Ok(response)
            }
            Err(e) => {
                self.state = SessionState::Broken;
                Err(e)
            }
        }
    }
}

impl<C: LineChannel> Drop for EngineSession<C> {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            tracing::warn!("Engine shutdown on drop failed: {}", e);
        }
    }
}
