//! Pursuer: per-frame arbitration всех сигналов в одно решение
//!
//! Порядок внутри frame (фиксированный):
//! 1. sense (vision probe + tier, один раз)
//! 2. chase timer
//! 3. transitions (hidden exit → trigger/refresh → transient range loss → expiry)
//! 4. destination (chase target / anchor / wander planner)
//! 5. facing (из navigation velocity)
//! 6. kill check

use bevy::prelude::*;
use rand::Rng;

use super::config::DetectionConfig;
use super::pursuit::{ChaseEndReason, ChaseMode, PursuitState, PursuitTransition};
use super::wander::WanderPlanner;
use crate::ai::detection::{perceive, DetectionTier, Perception};
use crate::ai::vision::Pose;
use crate::components::TargetSnapshot;
use crate::movement::{NavAgent, NavigationAgent};
use crate::spatial::OcclusionQuery;

/// Facing обновляется только если агент реально движется
pub const FACING_VELOCITY_THRESHOLD: f32 = 0.1;

/// Sustained proximity таймер
///
/// Копится только пока цель внутри kill_radius, жёсткий reset при выходе.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct KillHold {
    pub elapsed: f32,
}

impl KillHold {
    /// true когда удерживали kill_hold_duration
    pub fn update(&mut self, distance: f32, delta: f32, config: &DetectionConfig) -> bool {
        if distance <= config.kill_radius {
            self.elapsed += delta;
            self.elapsed >= config.kill_hold_duration
        } else {
            self.elapsed = 0.0;
            false
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// 0..=1 (для UI/audio)
    pub fn progress(&self, hold_duration: f32) -> f32 {
        if hold_duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / hold_duration).min(1.0)
    }
}

/// Кого преследует pursuer (None = цели нет на сцене)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct PursuitTarget(pub Option<Entity>);

/// Pursuer AI state (единственный writer: его собственный update)
#[derive(Component, Debug, Clone)]
#[require(NavAgent, PursuitTarget, DetectionConfig, Transform)]
pub struct Pursuer {
    state: PursuitState,
    planner: WanderPlanner,
    kill_hold: KillHold,
    facing: Vec2,
    destination: Option<Vec2>,
    spawn: Vec2,
    terminated: bool,
    missing_target_warned: bool,
}

/// Вход одного frame
pub struct FrameInput<'a> {
    pub delta: f32,
    pub position: Vec2,
    /// None: цели нет (detection no-op)
    pub target: Option<TargetSnapshot>,
    pub occlusion: &'a dyn OcclusionQuery,
}

/// Что произошло за frame (для events)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameReport {
    pub transition: Option<PursuitTransition>,
    /// Новая destination (только если изменилась)
    pub destination: Option<Vec2>,
    pub kill_progress: Option<f32>,
    pub caught: bool,
    pub perception: Option<Perception>,
}

impl Pursuer {
    pub fn new(spawn: Vec2, bounds: Option<Rect>, route: Vec<Vec2>) -> Self {
        Self {
            state: PursuitState::Wandering,
            planner: WanderPlanner::new(spawn, bounds, route),
            kill_hold: KillHold::default(),
            facing: Vec2::X,
            destination: None,
            spawn,
            terminated: false,
            missing_target_warned: false,
        }
    }

    pub fn tick<R: Rng>(
        &mut self,
        config: &DetectionConfig,
        input: FrameInput<'_>,
        nav: &mut impl NavigationAgent,
        rng: &mut R,
    ) -> FrameReport {
        let mut report = FrameReport::default();
        if self.terminated {
            return report;
        }

        // 1. Sense
        let perception = input
            .target
            .as_ref()
            .map(|target| perceive(Pose::new(input.position, self.facing), target, config, input.occlusion));

        match input.target {
            None if !self.missing_target_warned => {
                crate::log_warning("⚠️ Pursuer has no target, staying in wander mode");
                self.missing_target_warned = true;
            }
            Some(_) => self.missing_target_warned = false,
            None => {}
        }

        // Hide cooldown глушит все триггеры
        let suppressed = self.planner.in_cooldown();

        // 2. Chase timer
        self.state.advance(input.delta);

        // 3. Transitions
        let hidden = input.target.is_some_and(|target| target.hidden);
        let transition = if hidden && self.state.is_chasing() {
            Some(self.state.exit(ChaseEndReason::TargetHidden))
        } else {
            let tier = match perception {
                Some(perception) if !suppressed => perception.tier,
                _ => DetectionTier::NoDetection,
            };
            self.state
                .apply_trigger(tier, config.chase_duration)
                .or_else(|| {
                    self.state
                        .resolve_exit(perception.map(|p| p.distance), config.secondary_radius)
                })
        };

        let mut planned = None;
        match transition {
            Some(PursuitTransition::Started { persistent }) => {
                self.planner.suspend(input.position);
                crate::log(&format!(
                    "👁️ Chase started ({})",
                    if persistent { "persistent" } else { "transient" }
                ));
            }
            Some(PursuitTransition::Escalated) => {
                crate::log("👁️ Chase escalated to persistent");
            }
            Some(PursuitTransition::Ended(ChaseEndReason::TargetHidden)) => {
                planned = Some(self.planner.begin_cooldown(input.position, config, rng));
                crate::log("🙈 Target hidden, chase ended");
            }
            Some(PursuitTransition::Ended(reason)) => {
                planned = Some(self.planner.resume(rng));
                crate::log(&format!("🚶 Chase ended: {:?}", reason));
            }
            None => {}
        }

        // 4. Destination
        if self.state.is_chasing() {
            self.planner.advance_cadence(input.delta);
        }

        let destination = match self.state {
            PursuitState::Chasing {
                mode: ChaseMode::Persistent,
                ..
            } => input.target.map(|target| target.position),
            PursuitState::Chasing {
                mode: ChaseMode::Transient { anchor },
                ..
            } => Some(anchor),
            PursuitState::Wandering => match planned {
                Some(point) => Some(point),
                None => self
                    .planner
                    .tick(input.delta, input.position, &*nav, config, rng),
            },
        };

        if let Some(destination) = destination {
            nav.set_destination(destination);
            if self.destination != Some(destination) {
                report.destination = Some(destination);
            }
            self.destination = Some(destination);
        }

        // 5. Facing
        let velocity = nav.velocity();
        if velocity.length() > FACING_VELOCITY_THRESHOLD {
            self.facing = velocity.normalize();
        }

        // 6. Kill check (спрятавшегося игрока не достать)
        match perception {
            Some(perception) if !hidden => {
                if self.kill_hold.update(perception.distance, input.delta, config) {
                    self.terminated = true;
                    report.caught = true;
                    crate::log_info("💀 Player caught");
                }
                report.kill_progress = Some(self.kill_hold.progress(config.kill_hold_duration));
            }
            _ => self.kill_hold.reset(),
        }

        report.transition = transition;
        report.perception = perception;
        report
    }

    pub fn state(&self) -> PursuitState {
        self.state
    }

    pub fn is_chasing(&self) -> bool {
        self.state.is_chasing()
    }

    pub fn is_persistent_chase(&self) -> bool {
        self.state.is_persistent()
    }

    pub fn facing(&self) -> Vec2 {
        self.facing
    }

    pub fn destination(&self) -> Option<Vec2> {
        self.destination
    }

    /// Секунд внутри kill radius
    pub fn kill_timer(&self) -> f32 {
        self.kill_hold.elapsed
    }

    pub fn kill_progress(&self, config: &DetectionConfig) -> f32 {
        self.kill_hold.progress(config.kill_hold_duration)
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn planner(&self) -> &WanderPlanner {
        &self.planner
    }

    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    pub fn wander_origin(&self) -> Vec2 {
        self.planner.origin()
    }
}

/// Builder для spawn pursuer entity
///
/// Config проходит через `sanitized()`: несогласованные значения чинятся с warning.
#[derive(Debug, Clone, Default)]
pub struct PursuerSpawn {
    position: Vec2,
    config: DetectionConfig,
    bounds: Option<Rect>,
    route: Vec<Vec2>,
    target: Option<Entity>,
    speed: Option<f32>,
}

impl PursuerSpawn {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_config(mut self, config: DetectionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_route(mut self, route: Vec<Vec2>) -> Self {
        self.route = route;
        self
    }

    pub fn targeting(mut self, target: Entity) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn bundle(self) -> (Pursuer, DetectionConfig, PursuitTarget, NavAgent, Transform) {
        let nav = match self.speed {
            Some(speed) => NavAgent::with_speed(speed),
            None => NavAgent::default(),
        };

        (
            Pursuer::new(self.position, self.bounds, self.route),
            self.config.sanitized(),
            PursuitTarget(self.target),
            nav,
            Transform::from_translation(self.position.extend(0.0)),
        )
    }
}
