// src/lib.rs

pub mod core;
pub mod passage;

pub use crate::core::composer::HangulComposer;
pub use crate::core::engine::TypingEngine;
pub use crate::core::types::{CharState, RenderChar, RunStats};
