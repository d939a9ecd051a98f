// src/core/types.rs
use serde::{Deserialize, Serialize};

/// Per-position judgement of the active line, derived fresh on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharState {
    /// Not typed yet.
    Pending,
    /// Buffered character equals the target at this position.
    Correct,
    /// Buffered character differs from the target.
    Incorrect,
}

/// One cell of the render view: the target character plus its judgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderChar {
    pub target: char,
    pub state: CharState,
}

/// Run summary: characters-per-minute, words-per-minute, accuracy percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub cpm: f64,
    pub wpm: f64,
    pub accuracy: f64,
}
