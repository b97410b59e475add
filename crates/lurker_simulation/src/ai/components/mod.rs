//! AI components (pursuit state, wander planner, detection config)

pub mod config;
pub mod countdown;
pub mod pursuer;
pub mod pursuit;
pub mod wander;

#[cfg(test)]
mod wander_tests;

// Re-export all components
pub use config::*;
pub use countdown::*;
pub use pursuer::*;
pub use pursuit::*;
pub use wander::*;
