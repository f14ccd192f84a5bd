//! Enemy movement along the path.
//!
//! Each live enemy steps straight toward its current waypoint at
//! `speed * dt`, never overshooting it. Arriving within the waypoint epsilon
//! advances to the next waypoint; arriving at the last one breaches the base.

use hecs::{Entity, World};

use rampart_core::components::{Enemy, EnemyFate, Position};
use rampart_core::events::SimEvent;
use rampart_core::map::Path;
use rampart_core::types::move_towards;

use crate::config::Tuning;
use crate::economy::GameState;
use crate::registry::EnemyRegistry;
use crate::systems::damage;

/// Move every registered enemy one tick along the path.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    registry: &mut EnemyRegistry,
    path: &Path,
    tuning: &Tuning,
    dt: f32,
    state: &mut GameState,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    for (_id, entity) in registry.snapshot() {
        let breached = match world.query_one_mut::<(&mut Enemy, &mut Position)>(entity) {
            Ok((enemy, position)) => step_enemy(enemy, position, path, tuning, dt),
            Err(_) => false,
        };

        if breached {
            damage::retire_enemy(
                world,
                entity,
                EnemyFate::BreachedBase,
                registry,
                state,
                events,
                despawn_buffer,
            );
        }
    }
}

/// Advance one enemy. Returns true if it just walked past the final waypoint.
pub fn step_enemy(
    enemy: &mut Enemy,
    position: &mut Position,
    path: &Path,
    tuning: &Tuning,
    dt: f32,
) -> bool {
    if !enemy.is_alive() || enemy.health <= 0.0 {
        return false;
    }
    let Some(mut target) = path.waypoint(enemy.path_index) else {
        return false;
    };
    // Enemies keep their own ride height.
    target.y = position.0.y;

    position.0 = move_towards(position.0, target, enemy.archetype.speed * dt);
    if position.0.distance(target) < tuning.waypoint_epsilon {
        enemy.path_index += 1;
        return enemy.path_index >= path.len();
    }
    false
}
