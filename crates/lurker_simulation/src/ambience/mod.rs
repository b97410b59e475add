//! Ambience director: общий mood сцены из состояния всех pursuer'ов
//!
//! Только решение "какой mood", без audio mixing (clip, crossfade, volume:
//! забота подписчика на `AmbientMoodChanged`).
//!
//! Правила:
//! - хоть один pursuer в chase → Chase (сразу)
//! - выход из Chase: сразу
//! - Calm ↔ Uneasy: не чаще чем раз в `min_hold` секунд

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::components::{DetectionConfig, Pursuer};
use crate::components::PlayerState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum AmbientMood {
    #[default]
    Calm,
    /// Игрок в secondary radius какого-то pursuer'а
    Uneasy,
    Chase,
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbienceConfig {
    /// Минимум секунд между Calm ↔ Uneasy
    pub min_hold: f32,
}

impl Default for AmbienceConfig {
    fn default() -> Self {
        Self { min_hold: 60.0 }
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmbientMoodChanged {
    pub from: AmbientMood,
    pub to: AmbientMood,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct AmbienceDirector {
    mood: AmbientMood,
    since_switch: f32,
}

impl Default for AmbienceDirector {
    fn default() -> Self {
        Self {
            mood: AmbientMood::Calm,
            // Первая смена mood не ждёт hold
            since_switch: f32::INFINITY,
        }
    }
}

impl AmbienceDirector {
    pub fn mood(&self) -> AmbientMood {
        self.mood
    }

    /// Возвращает (from, to) если mood сменился в этот frame
    pub fn update(
        &mut self,
        delta: f32,
        any_chasing: bool,
        any_near: bool,
        config: &AmbienceConfig,
    ) -> Option<(AmbientMood, AmbientMood)> {
        self.since_switch += delta;

        let desired = if any_chasing {
            AmbientMood::Chase
        } else if any_near {
            AmbientMood::Uneasy
        } else {
            AmbientMood::Calm
        };

        if desired == self.mood {
            return None;
        }

        let immediate = desired == AmbientMood::Chase || self.mood == AmbientMood::Chase;
        if !immediate && self.since_switch < config.min_hold {
            return None;
        }

        let from = self.mood;
        self.mood = desired;
        self.since_switch = 0.0;
        Some((from, desired))
    }
}

/// Система: читает всех pursuer'ов после их update и решает mood
pub fn update_ambient_mood(
    pursuers: Query<(&Pursuer, &DetectionConfig, &Transform)>,
    players: Query<&Transform, With<PlayerState>>,
    mut director: ResMut<AmbienceDirector>,
    config: Res<AmbienceConfig>,
    time: Res<Time<Fixed>>,
    mut mood_events: EventWriter<AmbientMoodChanged>,
) {
    let any_chasing = pursuers.iter().any(|(pursuer, _, _)| pursuer.is_chasing());
    let any_near = pursuers.iter().any(|(_, detection, transform)| {
        let position = transform.translation.truncate();
        players
            .iter()
            .any(|player| player.translation.truncate().distance(position) <= detection.secondary_radius)
    });

    if let Some((from, to)) = director.update(time.delta_secs(), any_chasing, any_near, &config) {
        crate::log(&format!("🎵 Ambient mood: {:?} → {:?}", from, to));
        mood_events.write(AmbientMoodChanged { from, to });
    }
}

/// Ambience Plugin (после pursuit в том же fixed step)
pub struct AmbiencePlugin;

impl Plugin for AmbiencePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AmbientMoodChanged>()
            .init_resource::<AmbienceConfig>()
            .init_resource::<AmbienceDirector>()
            .add_systems(
                FixedUpdate,
                update_ambient_mood.in_set(crate::SimulationSet::Ambience),
            );
    }
}
