//! AI Events: что pursuer'ы сообщают остальной игре
//!
//! Pursuer ничего не знает о UI / audio / game-over flow:
//! он только пишет события, подписчики решают что с ними делать.

use bevy::prelude::*;

use crate::ai::components::ChaseEndReason;

/// Terminal event: игрок пойман (ровно один раз на pursuer)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerCaught {
    pub pursuer: Entity,
    pub target: Entity,
}

/// Переходы pursuit state machine
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum PursuitEvent {
    ChaseStarted {
        pursuer: Entity,
        /// false = transient (идём к anchor)
        persistent: bool,
    },

    /// Transient → Persistent
    ChaseEscalated { pursuer: Entity },

    ChaseEnded {
        pursuer: Entity,
        reason: ChaseEndReason,
    },
}

/// Pursuer выбрал новую destination (chase target, anchor, wander или patrol точка)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DestinationChanged {
    pub pursuer: Entity,
    pub destination: Vec2,
}

/// Прогресс kill countdown (0..=1)
///
/// Пишется пока ratio > 0, плюс один раз с 0.0 при сбросе.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct KillProgress {
    pub pursuer: Entity,
    pub ratio: f32,
}
