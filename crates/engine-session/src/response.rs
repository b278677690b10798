//! Collection of engine output between a command and its terminator line.

use crate::channel::LineChannel;
use crate::error::ProtocolError;
use uci::EngineMessage;

/// The line that ends an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator<'a> {
    /// The line must equal the token.
    Exact(&'a str),
    /// The line must start with the token.
    Prefix(&'a str),
}

impl Terminator<'_> {
    /// Whether `line` ends the exchange.
    pub fn matches(&self, line: &str) -> bool {
        match self {
            Terminator::Exact(token) => line == *token,
            Terminator::Prefix(prefix) => line.starts_with(prefix),
        }
    }

    fn token(&self) -> &str {
        match self {
            Terminator::Exact(token) | Terminator::Prefix(token) => token,
        }
    }
}

/// Every line the engine wrote during one exchange, terminator included.
///
/// Data-bearing lines may appear anywhere before the terminator, or be the
/// terminator itself. When a kind of line appears more than once, the latest
/// one wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseBuffer {
    lines: Vec<String>,
}

impl ResponseBuffer {
    /// Read lines from `channel` until one matches `terminator`.
    ///
    /// Non-matching lines are kept in order. Blocks until the terminator
    /// arrives; there is no timeout.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::Io`] if a read fails, [`ProtocolError::StreamClosed`]
    /// if the engine closes its output first.
    pub fn collect<C: LineChannel + ?Sized>(
        channel: &mut C,
        terminator: Terminator<'_>,
    ) -> Result<Self, ProtocolError> {
        let mut lines = Vec::new();
        loop {
            let line = channel
                .read_line()?
                .ok_or_else(|| ProtocolError::StreamClosed {
                    expected: terminator.token().to_string(),
                })?;
            let done = terminator.matches(&line);
            lines.push(line);
            if done {
                return Ok(Self { lines });
            }
        }
    }

    /// Raw lines in arrival order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Latest line that `extract` accepts.
    pub fn last_match<T>(&self, mut extract: impl FnMut(EngineMessage) -> Option<T>) -> Option<T> {
        self.lines
            .iter()
            .rev()
            .find_map(|line| extract(EngineMessage::parse(line)))
    }

    /// Move from the latest `bestmove` line, or an empty string.
    pub fn best_move(&self) -> String {
        self.last_match(|msg| match msg {
            EngineMessage::BestMove { mv, .. } => Some(mv),
            _ => None,
        })
        .unwrap_or_default()
    }

    /// Squares from the latest `Checkers:` line, or an empty list.
    pub fn checkers(&self) -> Vec<String> {
        self.last_match(|msg| match msg {
            EngineMessage::Checkers(squares) => Some(squares),
            _ => None,
        })
        .unwrap_or_default()
    }

    /// Position from the latest `Fen:` line, or an empty string.
    pub fn fen(&self) -> String {
        self.last_match(|msg| match msg {
            EngineMessage::Fen(fen) => Some(fen),
            _ => None,
        })
        .unwrap_or_default()
    }
}

impl From<Vec<String>> for ResponseBuffer {
    fn from(lines: Vec<String>) -> Self {
        Self { lines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::VecDeque;
    use std::io;

    /// Replays canned output and ignores input.
    struct Replay(VecDeque<String>);

    impl Replay {
        fn new(lines: &[&str]) -> Self {
            Replay(lines.iter().map(|l| l.to_string()).collect())
        }
    }

    impl LineChannel for Replay {
        fn send_line(&mut self, _line: &str) -> io::Result<()> {
            Ok(())
        }

        fn read_line(&mut self) -> io::Result<Option<String>> {
            Ok(self.0.pop_front())
        }

        fn is_alive(&mut self) -> bool {
            true
        }

        fn terminate(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn buffer(lines: &[&str]) -> ResponseBuffer {
        ResponseBuffer::from(lines.iter().map(|l| l.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn test_terminator_exact_vs_prefix() {
        assert!(Terminator::Exact("readyok").matches("readyok"));
        assert!(!Terminator::Exact("readyok").matches("readyok now"));
        assert!(Terminator::Prefix("bestmove").matches("bestmove e2e4 ponder e7e5"));
        assert!(!Terminator::Prefix("bestmove").matches("info bestmove"));
    }

    #[test]
    fn test_collect_stops_at_terminator_and_keeps_earlier_lines() {
        let mut channel = Replay::new(&[
            "info depth 1 score cp 20 pv e2e4",
            "bestmove e2e4 ponder e7e5",
            "readyok",
        ]);

        let response = ResponseBuffer::collect(&mut channel, Terminator::Prefix("bestmove")).unwrap();
        assert_eq!(response.lines().len(), 2);
        assert_eq!(response.best_move(), "e2e4");

        // Lines after the terminator are left for the next exchange
        assert_eq!(channel.read_line().unwrap().as_deref(), Some("readyok"));
    }

    #[test]
    fn test_collect_reports_closed_stream() {
        let mut channel = Replay::new(&["Stockfish 9 64 POPCNT by T. Romstad"]);
        let err = ResponseBuffer::collect(&mut channel, Terminator::Exact("readyok")).unwrap_err();
        match err {
            ProtocolError::StreamClosed { expected } => assert_eq!(expected, "readyok"),
            other => panic!("Expected StreamClosed, got {:?}", other),
        }
    }

    #[test]
    fn test_last_bestmove_wins() {
        let response = buffer(&["bestmove a2a3", "info string stray", "bestmove e2e4"]);
        assert_eq!(response.best_move(), "e2e4");
    }

    #[test]
    fn test_bestmove_drops_trailing_annotation() {
        let response = buffer(&["bestmove g1f3 ponder d7d5"]);
        assert_eq!(response.best_move(), "g1f3");
    }

    #[test]
    fn test_missing_lines_degrade_to_empty() {
        let response = buffer(&["info depth 1", "readyok"]);
        assert_eq!(response.best_move(), "");
        assert!(response.checkers().is_empty());
        assert_eq!(response.fen(), "");
    }

    #[test]
    fn test_fen_and_checkers_from_diagram() {
        let response = buffer(&[
            "",
            " +---+---+---+---+---+---+---+---+",
            " | r | n | b | q | k | b | n | r | 8",
            "Fen: rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
            "Key: 8D8D2BD6D4C3F1F7",
            "Checkers: e1 h4 ponder",
        ]);
        assert_eq!(
            response.fen(),
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"
        );
        assert_eq!(response.checkers(), vec!["e1", "h4"]);
    }

    proptest! {
        #[test]
        fn latest_bestmove_line_wins(moves in prop::collection::vec("[a-h][1-8][a-h][1-8][qrbn]?", 1..6)) {
            let lines: Vec<String> = moves.iter().map(|m| format!("bestmove {} ponder a7a6", m)).collect();
            let response = ResponseBuffer::from(lines);
            prop_assert_eq!(&response.best_move(), moves.last().unwrap());
        }
    }
}
