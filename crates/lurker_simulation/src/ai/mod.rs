//! AI decision-making module
//!
//! Stealth pursuer: vision probe → detection tiers → pursuit FSM → wander/patrol planner.
//! Всё в FixedUpdate для детерминизма.

use bevy::prelude::*;

pub mod components;
pub mod detection;
pub mod events;
pub mod systems;
pub mod vision;

// Re-export основных типов
pub use components::*;
pub use detection::{classify, perceive, DetectionTier, Perception};
pub use events::*;
pub use systems::*;
pub use vision::{has_line_of_sight, Pose};

use crate::spatial::SpatialQuery;

/// AI Plugin
///
/// Регистрирует pursuit events и `update_pursuers` в `SimulationSet::Pursuit`.
/// SpatialQuery по умолчанию пустой (host engine заменяет своим raycast).
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PursuitEvent>()
            .add_event::<DestinationChanged>()
            .add_event::<KillProgress>()
            .add_event::<PlayerCaught>()
            .init_resource::<SpatialQuery>()
            .register_type::<DetectionConfig>()
            .add_systems(
                FixedUpdate,
                update_pursuers.in_set(crate::SimulationSet::Pursuit),
            );
    }
}
