//! Engine options sent with `setoption`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uci::GuiCommand;

/// Name of the Stockfish option that controls playing strength (0-20).
pub const SKILL_LEVEL: &str = "Skill Level";

/// A named integer engine parameter, e.g. `Skill Level = 5`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOption {
    pub name: String,
    pub value: i32,
}

impl EngineOption {
    pub fn new(name: impl Into<String>, value: i32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Shorthand for the `Skill Level` option.
    pub fn skill_level(value: i32) -> Self {
        Self::new(SKILL_LEVEL, value)
    }

    /// The `setoption` command that applies this option.
    pub fn to_command(&self) -> GuiCommand {
        GuiCommand::SetOption {
            name: self.name.clone(),
            value: self.value,
        }
    }
}

impl fmt::Display for EngineOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Parses `Name=value`, e.g. `Skill Level=5`.
impl FromStr for EngineOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s
            .rsplit_once('=')
            .ok_or_else(|| format!("Expected NAME=VALUE, got '{}'", s))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("Missing option name in '{}'", s));
        }
        let value = value
            .trim()
            .parse()
            .map_err(|_| format!("Option value must be an integer in '{}'", s))?;
        Ok(Self::new(name, value))
    }
}
