//! Player-side компоненты: locomotion mode, hidden flag, read-only snapshot для AI
//!
//! Player subsystem: единственный writer этих компонентов.
//! Pursuer'ы только читают (через `PlayerStateProvider`), никаких глобальных singleton'ов.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Режим передвижения игрока
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum LocomotionMode {
    #[default]
    Idle,
    Walking,
    Running,
    /// Crouch / slow walk: уменьшенный detection footprint
    Slow,
}

impl LocomotionMode {
    /// Slow подавляет proximity detection в primary radius (но не vision)
    pub fn is_reduced_footprint(self) -> bool {
        matches!(self, Self::Slow)
    }
}

/// Marker для player-controlled entity
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(PlayerState, Transform)]
pub struct Player;

/// Состояние игрока, которое видит AI (пишется player subsystem каждый frame)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerState {
    pub locomotion: LocomotionMode,
    /// true пока игрок внутри hiding spot
    pub hidden: bool,
}

/// Read-only view игрока на текущий frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSnapshot {
    pub position: Vec2,
    pub locomotion: LocomotionMode,
    pub hidden: bool,
}

impl TargetSnapshot {
    pub fn new(position: Vec2, locomotion: LocomotionMode) -> Self {
        Self {
            position,
            locomotion,
            hidden: false,
        }
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

/// Player-state provider (explicit доступ для каждого pursuer)
pub trait PlayerStateProvider {
    fn position(&self) -> Vec2;
    fn locomotion(&self) -> LocomotionMode;
    fn is_hidden(&self) -> bool;

    fn snapshot(&self) -> TargetSnapshot {
        TargetSnapshot {
            position: self.position(),
            locomotion: self.locomotion(),
            hidden: self.is_hidden(),
        }
    }
}

impl PlayerStateProvider for TargetSnapshot {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn locomotion(&self) -> LocomotionMode {
        self.locomotion
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }
}

/// ECS view игрока: Transform (2D plane = XY) + PlayerState
pub struct PlayerView<'a> {
    pub transform: &'a Transform,
    pub state: &'a PlayerState,
}

impl PlayerStateProvider for PlayerView<'_> {
    fn position(&self) -> Vec2 {
        self.transform.translation.truncate()
    }

    fn locomotion(&self) -> LocomotionMode {
        self.state.locomotion
    }

    fn is_hidden(&self) -> bool {
        self.state.hidden
    }
}
