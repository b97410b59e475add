//! Headless path follower
//!
//! Замена engine NavMesh в headless режиме (тесты, demo binary):
//! движение по прямой к destination со скоростью `NavAgent::speed`.

use bevy::prelude::*;

use super::components::NavAgent;

/// Система: продвигает каждый NavAgent к его destination и обновляет status
///
/// Работает после AI решений в том же fixed step, поэтому AI видит status прошлого step.
pub fn follow_nav_paths(mut agents: Query<(&mut Transform, &mut NavAgent)>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for (mut transform, mut agent) in agents.iter_mut() {
        agent.path_pending = false;

        let Some(destination) = agent.destination else {
            agent.velocity = Vec2::ZERO;
            agent.remaining_distance = 0.0;
            continue;
        };

        let position = transform.translation.truncate();
        let to_destination = destination - position;
        let distance = to_destination.length();
        let step = agent.speed * delta;

        if distance <= step {
            // Дошли за этот step
            transform.translation.x = destination.x;
            transform.translation.y = destination.y;
            agent.velocity = if delta > 0.0 {
                to_destination / delta
            } else {
                Vec2::ZERO
            };
            agent.remaining_distance = 0.0;
        } else {
            let moved = to_destination / distance * step;
            transform.translation += moved.extend(0.0);
            agent.velocity = moved / delta;
            agent.remaining_distance = distance - step;
        }
    }
}
