//! Detection tiers: классификация perception в trigger
//!
//! Primary radius: близко, триггер всегда (кроме Slow locomotion).
//! Secondary radius: далеко, триггер только если игрок бежит (шум).
//! Vision: триггер на любой дистанции в пределах vision probe.

use bevy::prelude::*;

use crate::ai::components::DetectionConfig;
use crate::ai::vision::{has_line_of_sight, Pose};
use crate::components::{LocomotionMode, TargetSnapshot};
use crate::spatial::OcclusionQuery;

/// Результат классификации за один frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetectionTier {
    NoDetection,
    /// Видим или слышим вблизи: chase идёт к live позиции игрока
    PersistentTrigger,
    /// Услышали бег издалека: chase идёт к anchor (позиция в момент триггера)
    TransientTrigger { anchor: Vec2 },
}

impl DetectionTier {
    pub fn is_trigger(&self) -> bool {
        !matches!(self, Self::NoDetection)
    }
}

/// Классифицирует perception (distance уже посчитан, vision уже проверен)
///
/// Приоритет: hidden > vision > primary > secondary.
pub fn classify(
    distance: f32,
    target: &TargetSnapshot,
    vision: bool,
    config: &DetectionConfig,
) -> DetectionTier {
    if target.hidden {
        return DetectionTier::NoDetection;
    }

    if vision {
        return DetectionTier::PersistentTrigger;
    }

    if distance <= config.primary_radius {
        return if target.locomotion.is_reduced_footprint() {
            DetectionTier::NoDetection
        } else {
            DetectionTier::PersistentTrigger
        };
    }

    if distance <= config.secondary_radius && target.locomotion == LocomotionMode::Running {
        return DetectionTier::TransientTrigger {
            anchor: target.position,
        };
    }

    DetectionTier::NoDetection
}

/// Всё, что pursuer узнал о цели за frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perception {
    pub distance: f32,
    pub vision: bool,
    pub tier: DetectionTier,
}

/// Vision probe + tier classification (один raycast на frame)
pub fn perceive(
    pose: Pose,
    target: &TargetSnapshot,
    config: &DetectionConfig,
    occlusion: &dyn OcclusionQuery,
) -> Perception {
    let distance = pose.position.distance(target.position);
    let vision = has_line_of_sight(pose, target, config, occlusion);

    Perception {
        distance,
        vision,
        tier: classify(distance, target, vision, config),
    }
}
