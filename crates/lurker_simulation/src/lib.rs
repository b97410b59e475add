//! Lurker Simulation Core
//!
//! Stealth pursuer AI на Bevy 0.16 (headless ECS):
//! vision probe → detection tiers → pursuit FSM → wander/patrol → kill check.
//!
//! Engine (rendering, NavMesh, physics raycast) подключается снаружи через
//! `NavigationAgent` / `OcclusionQuery`. Headless режим использует
//! `HeadlessNavigationPlugin` + `ObstacleMap`.

use std::time::Duration;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod ambience;
pub mod components;
pub mod logger;
pub mod movement;
pub mod spatial;

// Re-export базовых типов для удобства
pub use ai::{
    AIPlugin, ChaseEndReason, DestinationChanged, DetectionConfig, DetectionTier, KillProgress, PlayerCaught,
    Pursuer, PursuerSpawn, PursuitEvent, PursuitState, PursuitTarget,
};
pub use ambience::{AmbienceConfig, AmbienceDirector, AmbiencePlugin, AmbientMood, AmbientMoodChanged};
pub use components::*;
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, log_with_level, set_log_level, set_logger,
    set_logger_if_needed, LogLevel, LogPrinter,
};
pub use movement::{HeadlessNavigationPlugin, NavAgent, NavigationAgent};
pub use spatial::{ObstacleMap, OcclusionQuery, SpatialQuery};

/// Fixed timestep симуляции (Hz)
pub const SIMULATION_HZ: f64 = 60.0;

/// Порядок внутри fixed step: AI решает → navigation двигает → ambience читает итог
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Pursuit,
    Navigation,
    Ambience,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Детерминистичный RNG (seed по умолчанию, если host не вставил свой)
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            .configure_sets(
                FixedUpdate,
                (SimulationSet::Pursuit, SimulationSet::Navigation, SimulationSet::Ambience).chain(),
            )
            .add_plugins((AIPlugin, AmbiencePlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт Bevy App для headless симуляции (без engine)
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins((SimulationPlugin, HeadlessNavigationPlugin));

    app
}

/// Один fixed step с явным delta (тесты и demo, без wall clock)
pub fn step_fixed(app: &mut App, delta: f32) {
    let world = app.world_mut();
    world
        .resource_mut::<Time<Fixed>>()
        .advance_by(Duration::from_secs_f32(delta));
    world.run_schedule(FixedUpdate);
}

/// Snapshot компонентов для сравнения детерминизма
///
/// Entities сортируются по index, компонент сериализуется через Debug.
pub fn world_snapshot<T>(world: &mut World) -> Vec<String>
where
    T: Component + std::fmt::Debug,
{
    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();
    entities.sort_by_key(|(entity, _)| entity.index());

    entities
        .into_iter()
        .map(|(entity, component)| format!("{}: {:?}", entity.index(), component))
        .collect()
}
