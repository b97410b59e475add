//! Movement domain: навигация
//!
//! Содержит:
//! - NavigationAgent (интерфейс path-following service)
//! - NavAgent (ECS компонент: destination от AI + status от host)
//! - HeadlessNavigationPlugin (прямолинейный follower без engine)

use bevy::prelude::*;

pub mod components;
pub mod systems;

pub use components::*;
pub use systems::*;

/// Headless navigation (для тестов и demo)
///
/// В engine build не добавляется: там NavAgent обслуживает NavMesh bridge.
pub struct HeadlessNavigationPlugin;

impl Plugin for HeadlessNavigationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            follow_nav_paths.in_set(crate::SimulationSet::Navigation),
        );
    }
}
