//! Headless симуляция Lurker
//!
//! Один pursuer, один игрок со скриптованным поведением:
//! стоит далеко → бежит → прячется → вылезает → подходит вплотную.

use bevy::ecs::event::Events;
use bevy::prelude::*;

use lurker_simulation::{
    create_headless_app, step_fixed, AmbientMoodChanged, DestinationChanged, LocomotionMode, ObstacleMap,
    PlayerCaught, PlayerState, Player, PursuerSpawn, PursuitEvent, SpatialQuery, SIMULATION_HZ,
};
use lurker_simulation::spatial::OBSTRUCTION_LAYER_WALLS;

/// Скрипт игрока: (с какой секунды, позиция, режим, hidden)
const SCRIPT: &[(f32, Vec2, LocomotionMode, bool)] = &[
    (0.0, Vec2::new(-7.0, 7.0), LocomotionMode::Idle, false),
    (4.0, Vec2::new(-6.0, 6.0), LocomotionMode::Running, false),
    (7.0, Vec2::new(-6.0, 6.0), LocomotionMode::Idle, true),
    (12.0, Vec2::new(-5.0, 5.0), LocomotionMode::Walking, false),
];

/// С этой секунды игрок стоит вплотную к pursuer'у
const APPROACH_AT: f32 = 20.0;

fn main() {
    let seed = 42;
    println!("Starting Lurker headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);

    // Стена посреди комнаты
    app.insert_resource(SpatialQuery::new(
        ObstacleMap::new().with(Rect::new(-1.0, -3.0, 1.0, 3.0), OBSTRUCTION_LAYER_WALLS),
    ));

    let player = app
        .world_mut()
        .spawn((Player, Transform::from_xyz(-7.0, 7.0, 0.0)))
        .id();

    let pursuer = app
        .world_mut()
        .spawn(
            PursuerSpawn::at(Vec2::new(4.0, -4.0))
                .with_bounds(Rect::new(-8.0, -8.0, 8.0, 8.0))
                .with_route(vec![Vec2::new(6.0, 6.0), Vec2::new(-6.0, -6.0), Vec2::new(6.0, -6.0)])
                .targeting(player)
                .bundle(),
        )
        .id();

    let delta = (1.0 / SIMULATION_HZ) as f32;
    let total_ticks = 60 * 40;

    for tick in 0..total_ticks {
        let seconds = tick as f32 * delta;

        // После скрипта игрок идёт прямо на pursuer'а
        let (position, locomotion, hidden) = if seconds >= APPROACH_AT {
            let pursuer_position = app
                .world()
                .get::<Transform>(pursuer)
                .map(|transform| transform.translation.truncate())
                .unwrap_or_default();
            (pursuer_position, LocomotionMode::Walking, false)
        } else {
            SCRIPT
                .iter()
                .rev()
                .find(|step| seconds >= step.0)
                .map(|&(_, position, locomotion, hidden)| (position, locomotion, hidden))
                .unwrap_or((Vec2::ZERO, LocomotionMode::Idle, false))
        };

        if let Some(mut transform) = app.world_mut().get_mut::<Transform>(player) {
            transform.translation = position.extend(0.0);
        }
        if let Some(mut state) = app.world_mut().get_mut::<PlayerState>(player) {
            state.locomotion = locomotion;
            state.hidden = hidden;
        }

        step_fixed(&mut app, delta);

        let world = app.world_mut();
        for event in world.resource_mut::<Events<PursuitEvent>>().drain() {
            println!("[{:6.2}s] {:?}", seconds, event);
        }
        for event in world.resource_mut::<Events<DestinationChanged>>().drain() {
            println!("[{:6.2}s] → {:?}", seconds, event.destination);
        }
        for event in world.resource_mut::<Events<AmbientMoodChanged>>().drain() {
            println!("[{:6.2}s] mood {:?} → {:?}", seconds, event.from, event.to);
        }

        let caught: Vec<_> = world.resource_mut::<Events<PlayerCaught>>().drain().collect();
        if let Some(event) = caught.first() {
            println!("[{:6.2}s] CAUGHT: {:?}", seconds, event);
            break;
        }
    }

    println!("Simulation complete!");
}
