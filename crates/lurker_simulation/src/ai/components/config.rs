//! Detection configuration (immutable per pursuer)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::spatial::OBSTRUCTION_MASK_VISION;

/// Параметры detection/pursuit для одного pursuer
///
/// Задаются при spawn и не меняются до teardown сцены.
/// Все расстояния в world units, все длительности в секундах, углы в радианах.
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct DetectionConfig {
    /// Primary radius (близко: триггер всегда, кроме Slow)
    pub primary_radius: f32,
    /// Secondary radius (далеко: триггер только на Running)
    pub secondary_radius: f32,
    /// Длительность chase с последнего refresh
    pub chase_duration: f32,
    /// Дальность зрения
    pub vision_distance: f32,
    /// Половина угла FOV (радианы)
    pub vision_half_angle: f32,
    /// Пауза между wander точками
    pub wander_delay: f32,
    /// Как часто (во время roaming) идём к patrol waypoint
    pub patrol_interval: f32,
    /// Ожидание на patrol waypoint
    pub patrol_wait_time: f32,
    /// Kill radius (sustained proximity)
    pub kill_radius: f32,
    /// Сколько держать игрока в kill radius до "caught"
    pub kill_hold_duration: f32,
    /// Forced local wander после того как игрок спрятался
    pub hide_cooldown: f32,
    /// Радиус local wander во время hide cooldown
    pub local_wander_radius: f32,
    /// Layer mask для occlusion ray
    pub obstruction_filter: u32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            primary_radius: 3.0,
            secondary_radius: 10.0,
            chase_duration: 5.0,
            vision_distance: 6.0,
            vision_half_angle: 45.0_f32.to_radians(),
            wander_delay: 2.0,
            patrol_interval: 10.0,
            patrol_wait_time: 3.0,
            kill_radius: 0.75,
            kill_hold_duration: 2.0,
            hide_cooldown: 2.0,
            local_wander_radius: 1.5,
            obstruction_filter: OBSTRUCTION_MASK_VISION,
        }
    }
}

impl DetectionConfig {
    /// Чинит несогласованный config вместо отказа
    ///
    /// - NaN / inf / отрицательные значения → 0.0
    /// - secondary_radius < primary_radius → поднимаем до primary
    /// - vision_half_angle ограничен [0, π]
    ///
    /// Каждая правка логируется warning'ом.
    pub fn sanitized(mut self) -> Self {
        let mut issues: Vec<String> = Vec::new();

        for (name, value) in [
            ("primary_radius", &mut self.primary_radius),
            ("secondary_radius", &mut self.secondary_radius),
            ("chase_duration", &mut self.chase_duration),
            ("vision_distance", &mut self.vision_distance),
            ("vision_half_angle", &mut self.vision_half_angle),
            ("wander_delay", &mut self.wander_delay),
            ("patrol_interval", &mut self.patrol_interval),
            ("patrol_wait_time", &mut self.patrol_wait_time),
            ("kill_radius", &mut self.kill_radius),
            ("kill_hold_duration", &mut self.kill_hold_duration),
            ("hide_cooldown", &mut self.hide_cooldown),
            ("local_wander_radius", &mut self.local_wander_radius),
        ] {
            if !(value.is_finite() && *value >= 0.0) {
                issues.push(format!("{}={} → 0", name, value));
                *value = 0.0;
            }
        }

        if self.secondary_radius < self.primary_radius {
            issues.push(format!(
                "secondary_radius={} < primary_radius={} → {}",
                self.secondary_radius, self.primary_radius, self.primary_radius
            ));
            self.secondary_radius = self.primary_radius;
        }

        if self.vision_half_angle > std::f32::consts::PI {
            issues.push(format!("vision_half_angle={} → π", self.vision_half_angle));
            self.vision_half_angle = std::f32::consts::PI;
        }

        if !issues.is_empty() {
            crate::log_warning(&format!("⚠️ DetectionConfig repaired: {}", issues.join(", ")));
        }

        self
    }
}
