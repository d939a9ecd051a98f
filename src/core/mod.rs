pub mod composer;
pub mod engine;
pub mod jamo;
pub mod types;
