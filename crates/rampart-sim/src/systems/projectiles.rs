//! Projectile flight and impact resolution.
//!
//! Projectiles home on their target's current position while it stays in
//! play, then keep flying at the last known position. They never re-target.
//! Each projectile ends exactly once, by impact or by running out of lifetime.

use glam::Vec3;
use hecs::{Entity, World};
use tracing::trace;

use rampart_core::components::{Position, Projectile, ProjectileFate};
use rampart_core::events::SimEvent;
use rampart_core::types::{move_towards, EnemyId, ProjectileId};

use crate::config::Tuning;
use crate::economy::GameState;
use crate::registry::EnemyRegistry;
use crate::systems::damage;

/// Result of one tick of flight.
enum Flight {
    Cruising,
    Expired,
    Impact {
        position: Vec3,
        target: EnemyId,
        damage: f32,
        splash_radius: f32,
    },
}

/// Advance every projectile in flight, in firing order.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    registry: &mut EnemyRegistry,
    tuning: &Tuning,
    dt: f32,
    state: &mut GameState,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    let mut in_flight: Vec<(ProjectileId, Entity)> = world
        .query::<&Projectile>()
        .iter()
        .filter(|(_, projectile)| projectile.fate.is_none())
        .map(|(entity, projectile)| (projectile.id, entity))
        .collect();
    in_flight.sort_by_key(|(id, _)| *id);

    for (id, entity) in in_flight {
        let Ok(target) = world.get::<&Projectile>(entity).map(|p| p.target) else {
            continue;
        };
        let target_position = registry
            .entity(target)
            .and_then(|enemy| world.get::<&Position>(enemy).ok().map(|p| p.0));

        let flight = match world.query_one_mut::<(&mut Projectile, &mut Position)>(entity) {
            Ok((projectile, position)) => fly(projectile, position, target_position, tuning, dt),
            Err(_) => continue,
        };

        match flight {
            Flight::Cruising => {}
            Flight::Expired => {
                despawn_buffer.push(entity);
                trace!(projectile = id.0, "projectile expired");
                events.push(SimEvent::ProjectileExpired { projectile: id });
            }
            Flight::Impact {
                position,
                target,
                damage,
                splash_radius,
            } => {
                let hits = resolve_impact(
                    world,
                    position,
                    target,
                    damage,
                    splash_radius,
                    tuning,
                    registry,
                    state,
                    events,
                    despawn_buffer,
                );
                despawn_buffer.push(entity);
                trace!(projectile = id.0, hits, "projectile impact");
                events.push(SimEvent::ProjectileImpact {
                    projectile: id,
                    position,
                    hits,
                });
            }
        }
    }
}

/// Move one projectile. Sets its fate when it expires or impacts.
fn fly(
    projectile: &mut Projectile,
    position: &mut Position,
    target_position: Option<Vec3>,
    tuning: &Tuning,
    dt: f32,
) -> Flight {
    if projectile.fate.is_some() {
        return Flight::Cruising;
    }

    projectile.lifetime_secs -= dt;
    if projectile.lifetime_secs <= 0.0 {
        projectile.fate = Some(ProjectileFate::Expired);
        return Flight::Expired;
    }

    if let Some(current) = target_position {
        projectile.last_known_target = current;
    }
    let destination = projectile.last_known_target + Vec3::Y * tuning.projectile_aim_offset;
    position.0 = move_towards(position.0, destination, projectile.speed * dt);

    if position.0.distance(destination) < tuning.impact_epsilon {
        projectile.fate = Some(ProjectileFate::Impact);
        return Flight::Impact {
            position: position.0,
            target: projectile.target,
            damage: projectile.damage,
            splash_radius: projectile.splash_radius,
        };
    }
    Flight::Cruising
}

/// Full damage to the original target if it is still in play, plus reduced
/// splash damage to every other enemy within the radius. Returns the number
/// of enemies hit.
#[allow(clippy::too_many_arguments)]
pub fn resolve_impact(
    world: &World,
    impact_position: Vec3,
    target: EnemyId,
    amount: f32,
    splash_radius: f32,
    tuning: &Tuning,
    registry: &mut EnemyRegistry,
    state: &mut GameState,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
) -> u32 {
    let mut hits = 0;

    if let Some(entity) = registry.entity(target) {
        if damage::apply_damage(
            world,
            entity,
            amount,
            tuning,
            registry,
            state,
            events,
            despawn_buffer,
        ) {
            hits += 1;
        }
    }

    if splash_radius <= tuning.min_splash_radius {
        return hits;
    }

    let splash_damage = amount * tuning.splash_damage_factor;
    for (enemy_id, entity) in registry.snapshot() {
        if enemy_id == target {
            continue;
        }
        let Ok(position) = world.get::<&Position>(entity).map(|p| p.0) else {
            continue;
        };
        if position.distance(impact_position) > splash_radius {
            continue;
        }
        if damage::apply_damage(
            world,
            entity,
            splash_damage,
            tuning,
            registry,
            state,
            events,
            despawn_buffer,
        ) {
            hits += 1;
        }
    }
    hits
}
