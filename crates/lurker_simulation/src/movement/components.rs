//! Navigation компоненты: NavigationAgent trait + NavAgent (ECS сторона)

use bevy::prelude::*;

/// Порог "arrived": remaining distance меньше этого значения
pub const ARRIVAL_EPSILON: f32 = 0.1;

/// Navigation / path-following service
///
/// Архитектура:
/// - AI пишет destination (high-level intent)
/// - Host (engine NavMesh или headless follower) строит путь и репортит status
/// - Никогда не блокирует, опрашивается каждый frame
pub trait NavigationAgent {
    fn set_destination(&mut self, destination: Vec2);
    fn is_path_pending(&self) -> bool;
    fn remaining_distance(&self) -> f32;
    fn velocity(&self) -> Vec2;

    fn has_arrived(&self) -> bool {
        !self.is_path_pending() && self.remaining_distance() < ARRIVAL_EPSILON
    }
}

/// Navigation agent актора
///
/// `destination` пишет AI, остальные поля: host после path step.
/// Повторный set_destination той же точки не сбрасывает path (иначе persistent chase
/// каждый frame перезапускал бы pathfinding).
#[derive(Component, Debug, Clone, PartialEq)]
pub struct NavAgent {
    pub destination: Option<Vec2>,
    pub path_pending: bool,
    pub remaining_distance: f32,
    pub velocity: Vec2,
    /// Скорость движения (units/sec), используется host'ом
    pub speed: f32,
}

impl Default for NavAgent {
    fn default() -> Self {
        Self {
            destination: None,
            path_pending: false,
            remaining_distance: 0.0,
            velocity: Vec2::ZERO,
            speed: 2.0,
        }
    }
}

impl NavAgent {
    pub fn with_speed(speed: f32) -> Self {
        Self {
            speed,
            ..Default::default()
        }
    }
}

impl NavigationAgent for NavAgent {
    fn set_destination(&mut self, destination: Vec2) {
        if self.destination != Some(destination) {
            self.destination = Some(destination);
            self.path_pending = true;
        }
    }

    fn is_path_pending(&self) -> bool {
        self.path_pending
    }

    fn remaining_distance(&self) -> f32 {
        self.remaining_distance
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }
}
