//! Wander / patrol planner: куда идти, пока pursuer никого не преследует
//!
//! Phases:
//! - Roaming: первая точка сразу, дальше случайная точка в bounds после wander_delay
//! - Patrol cadence: каждые patrol_interval (идёт и во время chase); visit только из Roaming
//! - Patrolling → PatrolWait: дошли до waypoint, ждём patrol_wait_time
//! - Cooldown: после того как игрок спрятался, local wander вокруг текущей позиции
//! - Returning: возврат к wander origin, потом снова Roaming

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use super::config::DetectionConfig;
use super::countdown::Countdown;
use crate::movement::NavigationAgent;

/// Patrol waypoint считается достигнутым в этом радиусе
pub const PATROL_ARRIVAL_DISTANCE: f32 = 0.5;

/// Сторона fallback квадрата, если bounds не заданы
pub const DEFAULT_WANDER_EXTENT: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WanderPhase {
    Roaming,
    Patrolling { waypoint: Vec2 },
    PatrolWait { timer: Countdown },
    /// Forced local wander после hide
    Cooldown { timer: Countdown },
    /// Идём обратно к wander origin
    Returning,
}

/// Planner одного pursuer'а (владеет своими countdown'ами)
#[derive(Debug, Clone, PartialEq)]
pub struct WanderPlanner {
    bounds: Rect,
    route: Vec<Vec2>,
    origin: Vec2,
    phase: WanderPhase,
    wander_delay: Countdown,
    patrol_cadence: Countdown,
    /// Ещё ни одной destination не выбрано (первый roaming tick выдаёт точку сразу)
    awaiting_first_point: bool,
}

impl WanderPlanner {
    pub fn new(spawn: Vec2, bounds: Option<Rect>, route: Vec<Vec2>) -> Self {
        if route.is_empty() {
            crate::log(&format!("🚶 Patrol route empty at {:?}: wander only", spawn));
        }

        Self {
            bounds: resolve_bounds(spawn, bounds),
            route,
            origin: spawn,
            phase: WanderPhase::Roaming,
            wander_delay: Countdown::Idle,
            patrol_cadence: Countdown::Idle,
            awaiting_first_point: true,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn route(&self) -> &[Vec2] {
        &self.route
    }

    /// Точка, куда pursuer вернётся после hide cooldown
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn phase(&self) -> WanderPhase {
        self.phase
    }

    pub fn in_cooldown(&self) -> bool {
        matches!(self.phase, WanderPhase::Cooldown { .. })
    }

    pub fn wander_delay_pending(&self) -> bool {
        self.wander_delay.is_running()
    }

    pub fn patrol_cadence_remaining(&self) -> Option<f32> {
        self.patrol_cadence.remaining()
    }

    /// Chase начался: гасим pending wander delay
    ///
    /// Patrol cadence не трогаем, она продолжает отсчёт через chase.
    /// Origin фиксируется только из обычного roaming (patrol leg уже записал свой).
    pub fn suspend(&mut self, position: Vec2) {
        if self.phase == WanderPhase::Roaming {
            self.origin = position;
        }
        self.wander_delay.cancel();
        self.awaiting_first_point = false;
        self.phase = WanderPhase::Roaming;
    }

    /// Patrol cadence вне Roaming (chase, cooldown, returning)
    ///
    /// Сработавший в это время visit пропускается, следующий цикл стартует в roaming.
    pub fn advance_cadence(&mut self, delta: f32) {
        if self.patrol_cadence.tick(delta) {
            crate::log("🚶 Patrol visit skipped: pursuer busy");
        }
    }

    /// Chase закончился (timeout / out of range): сразу новая wander точка
    pub fn resume<R: Rng>(&mut self, rng: &mut R) -> Vec2 {
        self.phase = WanderPhase::Roaming;
        self.wander_delay.cancel();
        self.awaiting_first_point = false;
        random_point(self.bounds, rng)
    }

    /// Игрок спрятался: local wander на hide_cooldown секунд
    pub fn begin_cooldown<R: Rng>(&mut self, position: Vec2, config: &DetectionConfig, rng: &mut R) -> Vec2 {
        self.wander_delay.cancel();
        self.awaiting_first_point = false;
        self.phase = WanderPhase::Cooldown {
            timer: Countdown::start(config.hide_cooldown),
        };

        let offset = Vec2::from_angle(rng.gen_range(0.0..std::f32::consts::TAU))
            * rng.gen_range(0.0..=config.local_wander_radius.max(0.0));
        (position + offset).clamp(self.bounds.min, self.bounds.max)
    }

    /// Один frame roaming/patrol логики (только пока Wandering)
    ///
    /// Возвращает новую destination, если planner её выбрал в этот frame.
    pub fn tick<R: Rng>(
        &mut self,
        delta: f32,
        position: Vec2,
        nav: &impl NavigationAgent,
        config: &DetectionConfig,
        rng: &mut R,
    ) -> Option<Vec2> {
        match self.phase {
            WanderPhase::Roaming => self.tick_roaming(delta, position, nav, config, rng),

            WanderPhase::Patrolling { waypoint } => {
                if position.distance(waypoint) <= PATROL_ARRIVAL_DISTANCE {
                    self.phase = WanderPhase::PatrolWait {
                        timer: Countdown::start(config.patrol_wait_time),
                    };
                }
                None
            }

            WanderPhase::PatrolWait { mut timer } => {
                if timer.tick(delta) {
                    self.phase = WanderPhase::Roaming;
                    return Some(random_point(self.bounds, rng));
                }
                self.phase = WanderPhase::PatrolWait { timer };
                None
            }

            WanderPhase::Cooldown { mut timer } => {
                self.advance_cadence(delta);
                if timer.tick(delta) {
                    self.phase = WanderPhase::Returning;
                    return Some(self.origin);
                }
                self.phase = WanderPhase::Cooldown { timer };
                None
            }

            WanderPhase::Returning => {
                self.advance_cadence(delta);
                if position.distance(self.origin) <= PATROL_ARRIVAL_DISTANCE || nav.has_arrived() {
                    self.phase = WanderPhase::Roaming;
                }
                None
            }
        }
    }

    fn tick_roaming<R: Rng>(
        &mut self,
        delta: f32,
        position: Vec2,
        nav: &impl NavigationAgent,
        config: &DetectionConfig,
        rng: &mut R,
    ) -> Option<Vec2> {
        // Patrol cadence (пустой route → пропускаем)
        if !self.route.is_empty() {
            if !self.patrol_cadence.is_running() {
                self.patrol_cadence = Countdown::start(config.patrol_interval);
            }

            if self.patrol_cadence.tick(delta) {
                if let Some(&waypoint) = self.route.choose(rng) {
                    self.origin = position;
                    self.wander_delay.cancel();
                    self.awaiting_first_point = false;
                    self.phase = WanderPhase::Patrolling { waypoint };
                    return Some(waypoint);
                }
            }
        }

        if self.awaiting_first_point {
            self.awaiting_first_point = false;
            return Some(random_point(self.bounds, rng));
        }

        if self.wander_delay.is_running() {
            if self.wander_delay.tick(delta) {
                return Some(random_point(self.bounds, rng));
            }
        } else if nav.has_arrived() {
            self.wander_delay = Countdown::start(config.wander_delay);
        }

        None
    }
}

/// Uniform random точка в rect
pub fn random_point<R: Rng>(bounds: Rect, rng: &mut R) -> Vec2 {
    Vec2::new(
        rng.gen_range(bounds.min.x..=bounds.max.x),
        rng.gen_range(bounds.min.y..=bounds.max.y),
    )
}

/// Bounds из scene setup, либо квадрат DEFAULT_WANDER_EXTENT вокруг spawn
pub fn resolve_bounds(spawn: Vec2, bounds: Option<Rect>) -> Rect {
    match bounds {
        Some(rect)
            if rect.width() > 0.0
                && rect.height() > 0.0
                && rect.min.is_finite()
                && rect.max.is_finite()
                && rect.size().is_finite() =>
        {
            rect
        }
        other => {
            crate::log_warning(&format!(
                "⚠️ Wander bounds {:?} unusable, falling back to {}x{} square around {:?}",
                other, DEFAULT_WANDER_EXTENT, DEFAULT_WANDER_EXTENT, spawn
            ));
            Rect::from_center_size(spawn, Vec2::splat(DEFAULT_WANDER_EXTENT))
        }
    }
}
