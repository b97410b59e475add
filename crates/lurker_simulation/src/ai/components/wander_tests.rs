//! Tests for WanderPlanner.

#[cfg(test)]
mod tests {
    use super::super::config::DetectionConfig;
    use super::super::wander::{resolve_bounds, WanderPhase, WanderPlanner, DEFAULT_WANDER_EXTENT};
    use crate::movement::NavAgent;
    use bevy::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn bounds() -> Rect {
        Rect::new(-5.0, -5.0, 5.0, 5.0)
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn test_missing_bounds_fall_back_to_square() {
        let rect = resolve_bounds(Vec2::new(10.0, 2.0), None);
        assert_eq!(rect.center(), Vec2::new(10.0, 2.0));
        assert_eq!(rect.size(), Vec2::splat(DEFAULT_WANDER_EXTENT));
    }

    #[test]
    fn test_zero_size_bounds_fall_back_to_square() {
        let rect = resolve_bounds(Vec2::ZERO, Some(Rect::new(1.0, 1.0, 1.0, 4.0)));
        assert_eq!(rect.size(), Vec2::splat(DEFAULT_WANDER_EXTENT));
        assert_eq!(resolve_bounds(Vec2::ZERO, Some(bounds())), bounds());
    }

    #[test]
    fn test_overflowing_bounds_fall_back_to_square() {
        let huge = Rect::new(-f32::MAX, -1.0, f32::MAX, 1.0);
        assert!(huge.min.is_finite() && huge.max.is_finite());

        let rect = resolve_bounds(Vec2::ZERO, Some(huge));
        assert_eq!(rect.size(), Vec2::splat(DEFAULT_WANDER_EXTENT));
    }

    #[test]
    fn test_wander_delay_then_random_point() {
        let config = DetectionConfig::default();
        let mut planner = WanderPlanner::new(Vec2::ZERO, Some(bounds()), Vec::new());
        let nav = NavAgent::default();
        let mut rng = rng();

        let first = planner
            .tick(0.5, Vec2::ZERO, &nav, &config, &mut rng)
            .expect("first roaming tick should pick a point right away");
        assert!(bounds().contains(first));
        assert!(!planner.wander_delay_pending());

        // Arrived → delay стартует, точки пока нет
        assert_eq!(planner.tick(0.5, Vec2::ZERO, &nav, &config, &mut rng), None);
        assert!(planner.wander_delay_pending());

        for _ in 0..3 {
            assert_eq!(planner.tick(0.5, Vec2::ZERO, &nav, &config, &mut rng), None);
        }

        let point = planner
            .tick(0.5, Vec2::ZERO, &nav, &config, &mut rng)
            .expect("delay elapsed, planner should pick a point");
        assert!(bounds().contains(point));
        assert!(!planner.wander_delay_pending());
    }

    #[test]
    fn test_no_delay_while_path_in_progress() {
        let config = DetectionConfig::default();
        let mut planner = WanderPlanner::new(Vec2::ZERO, Some(bounds()), Vec::new());
        let mut nav = NavAgent::default();
        nav.remaining_distance = 3.0;
        assert!(planner.tick(0.5, Vec2::ZERO, &nav, &config, &mut rng()).is_some());

        for _ in 0..20 {
            assert_eq!(planner.tick(0.5, Vec2::ZERO, &nav, &config, &mut rng()), None);
        }
        assert!(!planner.wander_delay_pending());
    }

    #[test]
    fn test_patrol_cadence_visits_waypoint_and_waits() {
        let config = DetectionConfig {
            patrol_interval: 1.0,
            patrol_wait_time: 3.0,
            wander_delay: 100.0,
            ..Default::default()
        };
        let waypoint = Vec2::new(3.0, 3.0);
        let mut planner = WanderPlanner::new(Vec2::ZERO, Some(bounds()), vec![waypoint]);
        let nav = NavAgent::default();
        let mut rng = rng();

        // Начальная wander точка, cadence ещё не истекла
        assert!(planner.tick(0.5, Vec2::new(1.0, 0.0), &nav, &config, &mut rng).is_some());
        assert_eq!(planner.tick(0.5, Vec2::new(1.0, 0.0), &nav, &config, &mut rng), Some(waypoint));
        assert_eq!(planner.phase(), WanderPhase::Patrolling { waypoint });
        assert_eq!(planner.origin(), Vec2::new(1.0, 0.0));

        // Ещё не дошли
        assert_eq!(planner.tick(0.5, Vec2::new(2.0, 2.0), &nav, &config, &mut rng), None);
        assert!(matches!(planner.phase(), WanderPhase::Patrolling { .. }));

        // Дошли (в пределах 0.5)
        assert_eq!(planner.tick(0.5, Vec2::new(3.25, 3.0), &nav, &config, &mut rng), None);
        assert!(matches!(planner.phase(), WanderPhase::PatrolWait { .. }));

        for _ in 0..5 {
            assert_eq!(planner.tick(0.5, waypoint, &nav, &config, &mut rng), None);
        }
        let next = planner.tick(0.5, waypoint, &nav, &config, &mut rng);
        assert!(next.is_some_and(|point| bounds().contains(point)));
        assert_eq!(planner.phase(), WanderPhase::Roaming);
    }

    #[test]
    fn test_empty_route_never_patrols() {
        let config = DetectionConfig {
            patrol_interval: 0.5,
            ..Default::default()
        };
        let mut planner = WanderPlanner::new(Vec2::ZERO, Some(bounds()), Vec::new());
        let mut nav = NavAgent::default();
        nav.remaining_distance = 2.0;
        let mut rng = rng();

        for _ in 0..40 {
            planner.tick(0.5, Vec2::ZERO, &nav, &config, &mut rng);
            assert_eq!(planner.phase(), WanderPhase::Roaming);
        }
    }

    #[test]
    fn test_suspend_cancels_pending_delay() {
        let config = DetectionConfig::default();
        let mut planner = WanderPlanner::new(Vec2::ZERO, Some(bounds()), Vec::new());
        let nav = NavAgent::default();
        let mut rng = rng();

        planner.tick(0.5, Vec2::ZERO, &nav, &config, &mut rng);
        planner.tick(0.5, Vec2::ZERO, &nav, &config, &mut rng);
        assert!(planner.wander_delay_pending());

        planner.suspend(Vec2::new(2.0, -1.0));
        assert!(!planner.wander_delay_pending());
        assert_eq!(planner.origin(), Vec2::new(2.0, -1.0));
    }

    #[test]
    fn test_suspend_during_patrol_keeps_patrol_origin() {
        let config = DetectionConfig {
            patrol_interval: 0.5,
            ..Default::default()
        };
        let mut planner = WanderPlanner::new(Vec2::ZERO, Some(bounds()), vec![Vec2::new(4.0, 4.0)]);
        let nav = NavAgent::default();
        let mut rng = rng();

        assert!(planner.tick(0.5, Vec2::new(-1.0, 0.0), &nav, &config, &mut rng).is_some());
        planner.suspend(Vec2::new(2.0, 2.0));

        assert_eq!(planner.origin(), Vec2::new(-1.0, 0.0));
        assert_eq!(planner.phase(), WanderPhase::Roaming);
    }

    #[test]
    fn test_hide_cooldown_then_return_to_origin() {
        let config = DetectionConfig::default();
        let mut planner = WanderPlanner::new(Vec2::ZERO, Some(bounds()), Vec::new());
        let nav = NavAgent::default();
        let mut rng = rng();

        planner.suspend(Vec2::new(1.0, 1.0));
        let local = planner.begin_cooldown(Vec2::new(3.0, 0.0), &config, &mut rng);

        assert!(planner.in_cooldown());
        assert!(local.distance(Vec2::new(3.0, 0.0)) <= config.local_wander_radius + 1e-4);
        assert!(bounds().contains(local));

        // hide_cooldown = 2.0 → 4 тика по 0.5
        for _ in 0..3 {
            assert_eq!(planner.tick(0.5, local, &nav, &config, &mut rng), None);
        }
        assert_eq!(planner.tick(0.5, local, &nav, &config, &mut rng), Some(Vec2::new(1.0, 1.0)));
        assert_eq!(planner.phase(), WanderPhase::Returning);

        let mut moving = NavAgent::default();
        moving.remaining_distance = 2.0;
        assert_eq!(planner.tick(0.5, Vec2::new(2.5, 1.0), &moving, &config, &mut rng), None);
        assert_eq!(planner.phase(), WanderPhase::Returning);

        planner.tick(0.5, Vec2::new(1.25, 1.0), &moving, &config, &mut rng);
        assert_eq!(planner.phase(), WanderPhase::Roaming);
    }

    #[test]
    fn test_cooldown_point_clamped_to_bounds() {
        let config = DetectionConfig {
            local_wander_radius: 3.0,
            ..Default::default()
        };
        let mut planner = WanderPlanner::new(Vec2::ZERO, Some(bounds()), Vec::new());
        let mut rng = rng();

        for _ in 0..16 {
            let point = planner.begin_cooldown(Vec2::new(5.0, 5.0), &config, &mut rng);
            assert!(bounds().contains(point));
        }
    }

    #[test]
    fn test_same_seed_same_points() {
        let config = DetectionConfig {
            wander_delay: 0.0,
            ..Default::default()
        };
        let nav = NavAgent::default();

        let run = || {
            let mut planner = WanderPlanner::new(Vec2::ZERO, Some(bounds()), Vec::new());
            let mut rng = rng();
            (0..10)
                .filter_map(|_| planner.tick(0.5, Vec2::ZERO, &nav, &config, &mut rng))
                .collect::<Vec<_>>()
        };

        let first = run();
        assert!(!first.is_empty());
        assert_eq!(first, run());
    }

    #[test]
    fn test_patrol_cadence_keeps_counting_through_chase() {
        let config = DetectionConfig {
            patrol_interval: 2.0,
            wander_delay: 100.0,
            ..Default::default()
        };
        let waypoint = Vec2::new(3.0, -3.0);
        let mut planner = WanderPlanner::new(Vec2::ZERO, Some(bounds()), vec![waypoint]);
        let nav = NavAgent::default();
        let mut rng = rng();

        assert!(planner.tick(0.5, Vec2::ZERO, &nav, &config, &mut rng).is_some());
        assert_eq!(planner.patrol_cadence_remaining(), Some(1.5));

        // Chase: cadence не сбрасывается
        planner.suspend(Vec2::ZERO);
        assert_eq!(planner.patrol_cadence_remaining(), Some(1.5));
        planner.advance_cadence(1.0);
        assert_eq!(planner.patrol_cadence_remaining(), Some(0.5));

        planner.resume(&mut rng);
        assert_eq!(planner.tick(0.5, Vec2::ZERO, &nav, &config, &mut rng), Some(waypoint));
    }

    #[test]
    fn test_patrol_visit_skipped_when_cadence_fires_during_chase() {
        let config = DetectionConfig {
            patrol_interval: 2.0,
            wander_delay: 100.0,
            ..Default::default()
        };
        let mut planner = WanderPlanner::new(Vec2::ZERO, Some(bounds()), vec![Vec2::new(3.0, -3.0)]);
        let nav = NavAgent::default();
        let mut rng = rng();

        planner.tick(0.5, Vec2::ZERO, &nav, &config, &mut rng);
        planner.suspend(Vec2::ZERO);
        planner.advance_cadence(2.0);
        assert_eq!(planner.patrol_cadence_remaining(), None);

        // Новый цикл стартует уже в roaming
        planner.resume(&mut rng);
        assert_eq!(planner.tick(0.5, Vec2::ZERO, &nav, &config, &mut rng), None);
        assert_eq!(planner.patrol_cadence_remaining(), Some(1.5));
        assert_eq!(planner.phase(), WanderPhase::Roaming);
    }
}
