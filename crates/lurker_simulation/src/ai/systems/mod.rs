//! AI systems

pub mod update;

// Re-export all systems
pub use update::*;
