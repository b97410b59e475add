//! Vision probe: line-of-sight проверка (distance + FOV cone + occlusion ray)
//!
//! Pure function: вызывается ровно один раз за frame на pursuer,
//! результат переиспользуется detection tier классификацией.

use bevy::prelude::*;

use crate::ai::components::DetectionConfig;
use crate::components::TargetSnapshot;
use crate::spatial::OcclusionQuery;

/// Позиция + направление взгляда наблюдателя (2D plane)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec2,
    /// Может быть не нормализован; zero → смотрим вдоль +X
    pub facing: Vec2,
}

impl Pose {
    pub fn new(position: Vec2, facing: Vec2) -> Self {
        Self { position, facing }
    }
}

/// Видит ли наблюдатель цель в этот frame
///
/// Порядок проверок:
/// 1. hidden → false
/// 2. distance > vision_distance → false
/// 3. цель в той же точке → true (угол не определён)
/// 4. угол к цели > vision_half_angle → false
/// 5. occlusion ray до цели (filter = obstruction_filter) → видно если ничего не задели
pub fn has_line_of_sight(
    pose: Pose,
    target: &TargetSnapshot,
    config: &DetectionConfig,
    occlusion: &dyn OcclusionQuery,
) -> bool {
    if target.hidden {
        return false;
    }

    let to_target = target.position - pose.position;
    let distance = to_target.length();
    if distance > config.vision_distance {
        return false;
    }

    if distance <= f32::EPSILON {
        return true;
    }

    let facing = pose.facing.try_normalize().unwrap_or(Vec2::X);
    let direction = to_target / distance;
    if angle_between(facing, direction) > config.vision_half_angle {
        return false;
    }

    occlusion
        .raycast(pose.position, direction, distance, config.obstruction_filter)
        .is_none()
}

/// Угол между двумя единичными векторами (0..=π)
fn angle_between(a: Vec2, b: Vec2) -> f32 {
    a.dot(b).clamp(-1.0, 1.0).acos()
}
