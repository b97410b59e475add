//! Pursuit state machine (Wandering ↔ Chasing)

use bevy::prelude::*;

use crate::ai::detection::DetectionTier;

/// Как pursuer преследует цель
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum ChaseMode {
    /// Идём к live позиции игрока каждый frame
    Persistent,
    /// Идём к точке, где услышали бег
    Transient { anchor: Vec2 },
}

/// Состояние преследования
///
/// Chase timer живёт внутри `Chasing`, поэтому "таймер вне chase" невозможен по построению.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub enum PursuitState {
    /// Нет цели, работает wander/patrol planner
    #[default]
    Wandering,
    Chasing {
        mode: ChaseMode,
        /// Секунд до конца chase (refresh сбрасывает до chase_duration)
        remaining: f32,
    },
}

/// Почему chase закончился
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ChaseEndReason {
    TimedOut,
    TargetHidden,
    /// Transient chase: цель ушла за secondary radius
    OutOfRange,
}

/// Переход state machine (для events и planner hooks)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PursuitTransition {
    Started { persistent: bool },
    /// Transient → Persistent
    Escalated,
    Ended(ChaseEndReason),
}

impl PursuitState {
    pub fn is_chasing(&self) -> bool {
        matches!(self, Self::Chasing { .. })
    }

    pub fn is_persistent(&self) -> bool {
        matches!(
            self,
            Self::Chasing {
                mode: ChaseMode::Persistent,
                ..
            }
        )
    }

    pub fn chase_remaining(&self) -> Option<f32> {
        match self {
            Self::Chasing { remaining, .. } => Some(*remaining),
            Self::Wandering => None,
        }
    }

    /// Anchor transient chase'а
    pub fn anchor(&self) -> Option<Vec2> {
        match self {
            Self::Chasing {
                mode: ChaseMode::Transient { anchor },
                ..
            } => Some(*anchor),
            _ => None,
        }
    }

    /// Продвигает chase timer (не ниже 0). Выход по таймауту решает `resolve_exit`.
    pub fn advance(&mut self, delta: f32) {
        if let Self::Chasing { remaining, .. } = self {
            *remaining = (*remaining - delta).max(0.0);
        }
    }

    /// Применяет detection trigger этого frame
    ///
    /// - Persistent: старт или refresh; transient chase эскалируется в persistent.
    /// - Transient: старт из Wandering; persistent chase получает refresh (mode не меняется).
    ///   Активный transient chase повторный transient trigger игнорирует
    ///   (anchor не переставляется, таймер не обновляется).
    pub fn apply_trigger(&mut self, tier: DetectionTier, chase_duration: f32) -> Option<PursuitTransition> {
        match (tier, *self) {
            (DetectionTier::NoDetection, _) => None,

            (DetectionTier::PersistentTrigger, previous) => {
                *self = Self::Chasing {
                    mode: ChaseMode::Persistent,
                    remaining: chase_duration,
                };
                match previous {
                    Self::Wandering => Some(PursuitTransition::Started { persistent: true }),
                    Self::Chasing {
                        mode: ChaseMode::Transient { .. },
                        ..
                    } => Some(PursuitTransition::Escalated),
                    Self::Chasing {
                        mode: ChaseMode::Persistent,
                        ..
                    } => None,
                }
            }

            (DetectionTier::TransientTrigger { anchor }, Self::Wandering) => {
                *self = Self::Chasing {
                    mode: ChaseMode::Transient { anchor },
                    remaining: chase_duration,
                };
                Some(PursuitTransition::Started { persistent: false })
            }

            (
                DetectionTier::TransientTrigger { .. },
                Self::Chasing {
                    mode: ChaseMode::Persistent,
                    ..
                },
            ) => {
                *self = Self::Chasing {
                    mode: ChaseMode::Persistent,
                    remaining: chase_duration,
                };
                None
            }

            (
                DetectionTier::TransientTrigger { .. },
                Self::Chasing {
                    mode: ChaseMode::Transient { .. },
                    ..
                },
            ) => None,
        }
    }

    /// Проверка выхода из chase (после apply_trigger)
    ///
    /// `live_distance`: расстояние до цели этого frame (None если цели нет).
    /// Transient chase обрывается, если цель дальше secondary radius.
    pub fn resolve_exit(&mut self, live_distance: Option<f32>, secondary_radius: f32) -> Option<PursuitTransition> {
        let Self::Chasing { mode, remaining } = *self else {
            return None;
        };

        if let (ChaseMode::Transient { .. }, Some(distance)) = (mode, live_distance) {
            if distance > secondary_radius {
                return Some(self.exit(ChaseEndReason::OutOfRange));
            }
        }

        if remaining <= 0.0 {
            return Some(self.exit(ChaseEndReason::TimedOut));
        }

        None
    }

    /// Безусловный выход в Wandering
    pub fn exit(&mut self, reason: ChaseEndReason) -> PursuitTransition {
        *self = Self::Wandering;
        PursuitTransition::Ended(reason)
    }
}
