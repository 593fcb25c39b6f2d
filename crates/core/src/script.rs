// SPDX-License-Identifier: MIT

//!
//! Command scripts (a recorded sequence of commands split into steps)
//!

use crate::Command;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can arise when loading a [`Script`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),
}

impl From<std::io::Error> for ScriptError {
    fn from(error: std::io::Error) -> Self {
        ScriptError::Io(error.to_string())
    }
}

impl From<serde_json::Error> for ScriptError {
    fn from(error: serde_json::Error) -> Self {
        ScriptError::Json(error.to_string())
    }
}

/// A recorded sequence of commands, split into steps at each
/// [`Command::Step`].
///
/// Deserialises from a plain JSON array of commands.  The `Step` commands are
/// consumed by the split and never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Command>", into = "Vec<Command>")]
pub struct Script {
    steps: Vec<Vec<Command>>,
}

impl Script {
    /// Parse a script from a JSON array of commands
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a script from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScriptError> {
        info!("Loading script from {}", path.as_ref().display());
        let data = fs::read_to_string(path)?;
        let script = Self::from_json(&data)?;
        info!(
            "Script loaded ({} steps, {} commands)",
            script.step_count(),
            script.command_count()
        );
        Ok(script)
    }

    /// The steps in order.  Trailing commands after the last `Step` form a
    /// final step of their own
    pub fn steps(&self) -> &[Vec<Command>] {
        &self.steps
    }

    /// The number of steps
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// The total number of commands (`Step`s excluded)
    pub fn command_count(&self) -> usize {
        self.steps.iter().map(Vec::len).sum()
    }
}

impl From<Vec<Command>> for Script {
    fn from(commands: Vec<Command>) -> Self {
        let mut steps = Vec::new();
        let mut current = Vec::new();
        for command in commands {
            if command.is_step() {
                steps.push(std::mem::take(&mut current));
            } else {
                current.push(command);
            }
        }
        if !current.is_empty() {
            steps.push(current);
        }
        debug!("split script into {} steps", steps.len());
        Script { steps }
    }
}

impl From<Script> for Vec<Command> {
    fn from(script: Script) -> Self {
        let mut commands = Vec::new();
        for step in script.steps {
            commands.extend(step);
            commands.push(Command::Step);
        }
        commands
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Handle;

    #[test]
    fn split_on_steps() {
        let json = r#"[
            { "command": "CreateCircle", "handle": 1, "label": "A", "x": 0, "y": 0 },
            { "command": "Step" },
            { "command": "Move", "handle": 1, "x": 5, "y": 5 },
            { "command": "SetHighlight", "handle": 1, "highlight": true }
        ]"#;
        let script: Script = serde_json::from_str(json).unwrap();
        assert_eq!(script.step_count(), 2);
        assert_eq!(script.command_count(), 3);
        assert_eq!(
            script.steps()[1][0],
            Command::Move {
                handle: Handle::new(1),
                x: 5.0,
                y: 5.0
            }
        );
    }

    #[test]
    fn load_errors() {
        assert!(matches!(
            Script::from_json(r#"[{ "command": "Teleport" }]"#),
            Err(ScriptError::Json(_))
        ));
        assert!(matches!(
            Script::load("/definitely/not/a/script.json"),
            Err(ScriptError::Io(_))
        ));
    }

    #[test]
    fn empty_steps_are_kept() {
        let script = Script::from(vec![Command::Step, Command::Step]);
        assert_eq!(script.step_count(), 2);
        assert_eq!(script.command_count(), 0);
        assert_eq!(Script::from(Vec::new()).step_count(), 0);
    }
}
