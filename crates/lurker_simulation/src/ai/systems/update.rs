//! Pursuit system: один tick каждого pursuer'а за fixed step.

use bevy::prelude::*;

use crate::ai::components::{DetectionConfig, FrameInput, PursuitTarget, PursuitTransition, Pursuer};
use crate::ai::events::{DestinationChanged, KillProgress, PlayerCaught, PursuitEvent};
use crate::components::{PlayerState, PlayerStateProvider, PlayerView};
use crate::movement::NavAgent;
use crate::spatial::SpatialQuery;
use crate::DeterministicRng;

/// Система: sense → decide → act для всех pursuer'ов
///
/// Каждый pursuer мутирует только свой state. Player state читается read-only.
/// Rotation пишется из facing (вокруг Z, plane = XY).
pub fn update_pursuers(
    mut pursuers: Query<
        (
            Entity,
            &mut Pursuer,
            &DetectionConfig,
            &PursuitTarget,
            &mut NavAgent,
            &mut Transform,
        ),
        Without<PlayerState>,
    >,
    players: Query<(&Transform, &PlayerState)>,
    spatial: Res<SpatialQuery>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
    mut pursuit_events: EventWriter<PursuitEvent>,
    mut destination_events: EventWriter<DestinationChanged>,
    mut kill_events: EventWriter<KillProgress>,
    mut caught_events: EventWriter<PlayerCaught>,
) {
    let delta = time.delta_secs();

    for (entity, mut pursuer, config, target, mut nav, mut transform) in pursuers.iter_mut() {
        if pursuer.is_terminated() {
            continue;
        }

        let snapshot = target.0.and_then(|player| {
            players
                .get(player)
                .ok()
                .map(|(transform, state)| PlayerView { transform, state }.snapshot())
        });

        let progress_before = pursuer.kill_progress(config);
        let input = FrameInput {
            delta,
            position: transform.translation.truncate(),
            target: snapshot,
            occlusion: &*spatial,
        };
        let report = pursuer.tick(config, input, &mut *nav, &mut rng.rng);

        match report.transition {
            Some(PursuitTransition::Started { persistent }) => {
                pursuit_events.write(PursuitEvent::ChaseStarted {
                    pursuer: entity,
                    persistent,
                });
            }
            Some(PursuitTransition::Escalated) => {
                pursuit_events.write(PursuitEvent::ChaseEscalated { pursuer: entity });
            }
            Some(PursuitTransition::Ended(reason)) => {
                pursuit_events.write(PursuitEvent::ChaseEnded {
                    pursuer: entity,
                    reason,
                });
            }
            None => {}
        }

        if let Some(destination) = report.destination {
            destination_events.write(DestinationChanged {
                pursuer: entity,
                destination,
            });
        }

        let ratio = report.kill_progress.unwrap_or(0.0);
        if ratio > 0.0 || progress_before > 0.0 {
            kill_events.write(KillProgress {
                pursuer: entity,
                ratio,
            });
        }

        if report.caught {
            if let Some(player) = target.0 {
                caught_events.write(PlayerCaught {
                    pursuer: entity,
                    target: player,
                });
                crate::log(&format!("💀 PlayerCaught: {:?} caught {:?}", entity, player));
            }
        }

        let facing = pursuer.facing();
        transform.rotation = Quat::from_rotation_z(facing.y.atan2(facing.x));
    }
}
