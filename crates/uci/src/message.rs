//! Lines sent from engine to GUI.

/// Readiness acknowledgment. Matched exactly.
pub const READY_OK: &str = "readyok";
/// Prefix of the search result line.
pub const BEST_MOVE_PREFIX: &str = "bestmove";
/// Prefix of the position echo inside the `d` diagram.
pub const FEN_PREFIX: &str = "Fen: ";
/// Prefix of the checkers line, the last line of the `d` diagram.
pub const CHECKERS_PREFIX: &str = "Checkers:";

/// Lines sent from engine to GUI that the client reads.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineMessage {
    /// Engine is ready.
    ReadyOk,
    /// Best move found. `mv` is empty when the engine sent no move token.
    BestMove { mv: String },
    /// Position echo from the board diagram.
    Fen(String),
    /// Squares of pieces giving check, from the board diagram.
    Checkers(Vec<String>),
    /// Anything else: diagram rows, `info` lines, banners.
    Other(String),
}

impl EngineMessage {
    /// Classify a single line received from the engine.
    ///
    /// Never fails: lines that do not carry anything the client reads are
    /// returned as [`EngineMessage::Other`].
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end();

        if line == READY_OK {
            return EngineMessage::ReadyOk;
        }
        if let Some(rest) = line.strip_prefix(BEST_MOVE_PREFIX) {
            return Self::parse_bestmove(rest);
        }
        if let Some(rest) = line.strip_prefix(FEN_PREFIX) {
            return EngineMessage::Fen(rest.to_string());
        }
        if let Some(rest) = line.strip_prefix(CHECKERS_PREFIX) {
            return EngineMessage::Checkers(Self::parse_checkers(rest));
        }
        EngineMessage::Other(line.to_string())
    }

    // "bestmove e2e4 ponder e7e5": only the first token is the move
    fn parse_bestmove(rest: &str) -> Self {
        let mv = rest.split_whitespace().next().unwrap_or("").to_string();
        EngineMessage::BestMove { mv }
    }

    // Square tokens are exactly two characters; anything else on the line is annotation
    fn parse_checkers(rest: &str) -> Vec<String> {
        rest.split_whitespace()
            .filter(|token| token.chars().count() == 2)
            .map(str::to_string)
            .collect()
    }

    /// Format message for output.
    pub fn to_uci(&self) -> String {
        match self {
            EngineMessage::ReadyOk => READY_OK.to_string(),
            EngineMessage::BestMove { mv } => format!("{} {}", BEST_MOVE_PREFIX, mv),
            EngineMessage::Fen(fen) => format!("{}{}", FEN_PREFIX, fen),
            EngineMessage::Checkers(squares) => {
                format!("{} {}", CHECKERS_PREFIX, squares.join(" "))
            }
            EngineMessage::Other(line) => line.clone(),
        }
    }
}
