//! The chess-engine capability, independent of how the engine is reached.

use crate::channel::LineChannel;
use crate::error::SessionError;
use crate::session::EngineSession;

/// Operations a caller needs from a chess engine.
///
/// Positions are FEN strings and moves are UCI move tokens; neither is
/// validated on this side.
pub trait ChessEngine {
    /// Best move from `position` at the given skill level, or an empty
    /// string if the engine gave none.
    fn best_move(&mut self, position: &str, difficulty: i32) -> Result<String, SessionError>;

    /// Squares of the pieces giving check in `position`.
    fn checkers(&mut self, position: &str) -> Result<Vec<String>, SessionError>;

    /// The engine's FEN for its current position.
    fn current_position(&mut self) -> Result<String, SessionError>;

    /// FEN after playing `moves` from `position`.
    fn apply_move(&mut self, position: &str, moves: &str) -> Result<String, SessionError>;

    fn is_alive(&mut self) -> bool;

    fn shutdown(&mut self) -> Result<(), SessionError>;
}

impl<C: LineChannel> ChessEngine for EngineSession<C> {
    fn best_move(&mut self, position: &str, difficulty: i32) -> Result<String, SessionError> {
        EngineSession::best_move(self, position, difficulty)
    }

    fn checkers(&mut self, position: &str) -> Result<Vec<String>, SessionError> {
        EngineSession::checkers(self, position)
    }

    fn current_position(&mut self) -> Result<String, SessionError> {
        EngineSession::current_position(self)
    }

    fn apply_move(&mut self, position: &str, moves: &str) -> Result<String, SessionError> {
        EngineSession::apply_move(self, position, moves)
    }

    fn is_alive(&mut self) -> bool {
        EngineSession::is_alive(self)
    }

    fn shutdown(&mut self) -> Result<(), SessionError> {
        EngineSession::shutdown(self)
    }
}
