//! ECS Components, общие для нескольких доменов
//!
//! - player: player marker, PlayerState, TargetSnapshot, PlayerStateProvider
//!
//! AI компоненты живут в `crate::ai::components`, навигация: в `crate::movement`.

pub mod player;

// Re-exports для удобного импорта
pub use player::*;
