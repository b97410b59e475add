//! Тесты детерминизма
//!
//! Одинаковый seed → идентичные wander/patrol траектории.

use bevy::prelude::*;
use lurker_simulation::{create_headless_app, step_fixed, world_snapshot, DetectionConfig, Pursuer, PursuerSpawn};

const DT: f32 = 0.25;

/// Запускает pursuer'ов без цели и возвращает их позиции по тикам
fn run_simulation(seed: u64, tick_count: usize) -> (Vec<Vec<Vec2>>, Vec<String>) {
    let mut app = create_headless_app(seed);

    let config = DetectionConfig {
        wander_delay: 0.5,
        patrol_interval: 4.0,
        patrol_wait_time: 1.0,
        ..Default::default()
    };

    for i in 0..3 {
        let spawn = Vec2::new(i as f32 * 3.0 - 3.0, 0.0);
        app.world_mut().spawn(
            PursuerSpawn::at(spawn)
                .with_config(config.clone())
                .with_bounds(Rect::new(-8.0, -8.0, 8.0, 8.0))
                .with_route(vec![Vec2::new(6.0, 6.0), Vec2::new(-6.0, 6.0), Vec2::new(0.0, -6.0)])
                .bundle(),
        );
    }

    let mut trajectory = Vec::with_capacity(tick_count);
    for _ in 0..tick_count {
        step_fixed(&mut app, DT);

        let world = app.world_mut();
        let mut query = world.query_filtered::<(Entity, &Transform), With<Pursuer>>();
        let mut positions: Vec<_> = query
            .iter(world)
            .map(|(entity, transform)| (entity.index(), transform.translation.truncate()))
            .collect();
        positions.sort_by_key(|(index, _)| *index);
        trajectory.push(positions.into_iter().map(|(_, position)| position).collect());
    }

    let snapshot = world_snapshot::<Pursuer>(app.world_mut());
    (trajectory, snapshot)
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;

    let first = run_simulation(SEED, 400);
    let second = run_simulation(SEED, 400);

    assert_eq!(
        first, second,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_different_seed_different_trajectory() {
    let (first, _) = run_simulation(1, 200);
    let (second, _) = run_simulation(2, 200);

    assert_ne!(first, second);
}

#[test]
fn test_pursuers_stay_inside_bounds() {
    let (trajectory, _) = run_simulation(42, 400);
    let bounds = Rect::new(-8.0, -8.0, 8.0, 8.0);

    for (tick, positions) in trajectory.iter().enumerate() {
        for position in positions {
            assert!(bounds.contains(*position), "tick {}: {:?} out of bounds", tick, position);
        }
    }
}
