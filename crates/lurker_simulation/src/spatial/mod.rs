//! Spatial queries: occlusion raycast для vision probe
//!
//! ## Obstruction layers (битовая маска)
//! - Layer 2 (0b10 = 2): Actors (player, pursuers)
//! - Layer 3 (0b100 = 4): Walls
//! - Layer 4 (0b1000 = 8): Props (шкафы, ящики, hiding spots)
//!
//! Host engine реализует `OcclusionQuery` через свой physics raycast.
//! Headless режим: `ObstacleMap` (AABB список + slab test).

use bevy::prelude::*;

// ============================================================================
// Layer битовые маски
// ============================================================================

/// Layer 2: Actors
pub const OBSTRUCTION_LAYER_ACTORS: u32 = 0b10;

/// Layer 3: Walls (статическая геометрия уровня)
pub const OBSTRUCTION_LAYER_WALLS: u32 = 0b100;

/// Layer 4: Props (мебель, hiding spots)
pub const OBSTRUCTION_LAYER_PROPS: u32 = 0b1000;

/// Mask: что блокирует line-of-sight (actors не блокируют)
pub const OBSTRUCTION_MASK_VISION: u32 = OBSTRUCTION_LAYER_WALLS | OBSTRUCTION_LAYER_PROPS;

/// Результат raycast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec2,
    pub distance: f32,
    pub layer: u32,
}

/// Spatial query service (read-only, synchronous)
pub trait OcclusionQuery {
    /// Луч из `origin` по `direction` длиной `max_distance`.
    /// Учитываются только obstruction'ы, чей layer пересекается с `filter`.
    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32, filter: u32) -> Option<RayHit>;
}

/// Прямоугольное препятствие (axis-aligned)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub rect: Rect,
    pub layer: u32,
}

/// Headless obstruction set
#[derive(Debug, Clone, Default)]
pub struct ObstacleMap {
    obstacles: Vec<Obstacle>,
}

impl ObstacleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, rect: Rect, layer: u32) -> Self {
        self.push(rect, layer);
        self
    }

    pub fn push(&mut self, rect: Rect, layer: u32) {
        self.obstacles.push(Obstacle { rect, layer });
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }
}

impl OcclusionQuery for ObstacleMap {
    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32, filter: u32) -> Option<RayHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec2::ZERO || max_distance <= 0.0 {
            return None;
        }

        self.obstacles
            .iter()
            .filter(|obstacle| obstacle.layer & filter != 0)
            .filter_map(|obstacle| {
                ray_entry_distance(origin, direction, max_distance, obstacle.rect).map(|distance| RayHit {
                    point: origin + direction * distance,
                    distance,
                    layer: obstacle.layer,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

/// Slab test: расстояние до входа луча в rect (0.0 если origin внутри)
fn ray_entry_distance(origin: Vec2, direction: Vec2, max_distance: f32, rect: Rect) -> Option<f32> {
    let mut t_enter = 0.0_f32;
    let mut t_exit = max_distance;

    let axes = [
        (origin.x, direction.x, rect.min.x, rect.max.x),
        (origin.y, direction.y, rect.min.y, rect.max.y),
    ];

    for (o, d, lo, hi) in axes {
        if d.abs() < f32::EPSILON {
            // Луч параллелен slab: должны быть внутри
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let (near, far) = {
            let t0 = (lo - o) * inv;
            let t1 = (hi - o) * inv;
            if t0 <= t1 { (t0, t1) } else { (t1, t0) }
        };

        t_enter = t_enter.max(near);
        t_exit = t_exit.min(far);
        if t_enter > t_exit {
            return None;
        }
    }

    Some(t_enter)
}

/// ECS resource: активный spatial query service
///
/// По умолчанию пустой ObstacleMap (ничего не блокирует).
#[derive(Resource)]
pub struct SpatialQuery(pub Box<dyn OcclusionQuery + Send + Sync>);

impl SpatialQuery {
    pub fn new(query: impl OcclusionQuery + Send + Sync + 'static) -> Self {
        Self(Box::new(query))
    }
}

impl Default for SpatialQuery {
    fn default() -> Self {
        Self::new(ObstacleMap::default())
    }
}

impl OcclusionQuery for SpatialQuery {
    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32, filter: u32) -> Option<RayHit> {
        self.0.raycast(origin, direction, max_distance, filter)
    }
}
