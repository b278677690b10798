//! Commands sent from GUI to engine.

use crate::UciError;
use std::fmt;

/// Commands sent from GUI to engine.
#[derive(Debug, Clone, PartialEq)]
pub enum GuiCommand {
    /// Check if engine is ready.
    IsReady,
    /// Set an engine option, e.g. `setoption name Skill Level value 5`.
    SetOption { name: String, value: i32 },
    /// Set up position from a FEN and the moves played after it.
    Position { fen: String, moves: Vec<String> },
    /// Search for exactly this time in milliseconds.
    Go { movetime: u64 },
    /// Print the board diagram (Stockfish `d`).
    Display,
    /// Quit the engine.
    Quit,
}

impl GuiCommand {
    /// Build a `position fen ...` command from a FEN and a whitespace-separated move list.
    ///
    /// Neither part is validated; both are passed through as opaque text.
    pub fn position_fen(fen: &str, moves: &str) -> Self {
        GuiCommand::Position {
            fen: fen.trim().to_string(),
            moves: moves.split_whitespace().map(str::to_string).collect(),
        }
    }

    /// Format the command as a single protocol line (without newline).
    pub fn to_uci(&self) -> String {
        match self {
            GuiCommand::IsReady => "isready".to_string(),
            GuiCommand::SetOption { name, value } => {
                format!("setoption name {} value {}", name, value)
            }
            GuiCommand::Position { fen, moves } => {
                let mut line = format!("position fen {}", fen);
                if !moves.is_empty() {
                    line.push_str(" moves ");
                    line.push_str(&moves.join(" "));
                }
                line
            }
            GuiCommand::Go { movetime } => format!("go movetime {}", movetime),
            GuiCommand::Display => "d".to_string(),
            GuiCommand::Quit => "quit".to_string(),
        }
    }

    /// Parse a UCI command string.
    pub fn parse(input: &str) -> Result<Self, UciError> {
        let input = input.trim();
        let mut parts = input.split_whitespace();

        match parts.next().unwrap_or("") {
            "isready" => Ok(GuiCommand::IsReady),
            "d" => Ok(GuiCommand::Display),
            "quit" => Ok(GuiCommand::Quit),
            "setoption" => Self::parse_setoption(parts),
            "position" => Self::parse_position(parts),
            "go" => Self::parse_go(parts),
            _ => Err(UciError::ParseError(format!("Unsupported command '{}'", input))),
        }
    }

    fn parse_setoption<'a>(mut parts: impl Iterator<Item = &'a str>) -> Result<Self, UciError> {
        if parts.next() != Some("name") {
            return Err(UciError::ParseError(
                "Expected 'name' after 'setoption'".to_string(),
            ));
        }

        // Option names may contain spaces ("Skill Level")
        let mut name_parts = Vec::new();
        let mut saw_value = false;
        for part in parts.by_ref() {
            if part == "value" {
                saw_value = true;
                break;
            }
            name_parts.push(part);
        }

        if name_parts.is_empty() {
            return Err(UciError::ParseError("Missing option name".to_string()));
        }
        if !saw_value {
            return Err(UciError::ParseError(format!(
                "Missing value for option '{}'",
                name_parts.join(" ")
            )));
        }

        let raw = parts.next().unwrap_or("");
        let value = raw
            .parse()
            .map_err(|_| UciError::ParseError(format!("Invalid option value '{}'", raw)))?;

        Ok(GuiCommand::SetOption {
            name: name_parts.join(" "),
            value,
        })
    }

    fn parse_position<'a>(mut parts: impl Iterator<Item = &'a str>) -> Result<Self, UciError> {
        if parts.next() != Some("fen") {
            return Err(UciError::ParseError(
                "Expected 'fen' after 'position'".to_string(),
            ));
        }

        // Collect FEN parts until "moves" or end
        let mut fen_parts = Vec::new();
        for part in parts.by_ref() {
            if part == "moves" {
                break;
            }
            fen_parts.push(part);
        }
        if fen_parts.is_empty() {
            return Err(UciError::ParseError("Missing FEN".to_string()));
        }

        Ok(GuiCommand::Position {
            fen: fen_parts.join(" "),
            moves: parts.map(str::to_string).collect(),
        })
    }

    fn parse_go<'a>(mut parts: impl Iterator<Item = &'a str>) -> Result<Self, UciError> {
        match (parts.next(), parts.next()) {
            (Some("movetime"), Some(ms)) => ms
                .parse()
                .map(|movetime| GuiCommand::Go { movetime })
                .map_err(|_| UciError::ParseError(format!("Invalid movetime '{}'", ms))),
            _ => Err(UciError::ParseError(
                "Expected 'go movetime <ms>'".to_string(),
            )),
        }
    }
}

impl fmt::Display for GuiCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uci())
    }
}
