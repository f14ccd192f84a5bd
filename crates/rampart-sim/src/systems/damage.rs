//! Damage resolution and enemy retirement.
//!
//! Every enemy leaves play through [`retire_enemy`], which sets its fate,
//! deregisters it and queues it for despawn exactly once. World despawn is
//! deferred to the cleanup system at the end of the tick.

use hecs::{Entity, World};
use tracing::debug;

use rampart_core::components::{Enemy, EnemyFate};
use rampart_core::events::SimEvent;
use rampart_core::types::Tint;

use crate::config::Tuning;
use crate::economy::GameState;
use crate::registry::EnemyRegistry;

/// Apply a hit to an enemy. Returns true if the hit landed on a live enemy.
#[allow(clippy::too_many_arguments)]
pub fn apply_damage(
    world: &World,
    entity: Entity,
    amount: f32,
    tuning: &Tuning,
    registry: &mut EnemyRegistry,
    state: &mut GameState,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
) -> bool {
    let killed = {
        let Ok(mut enemy) = world.get::<&mut Enemy>(entity) else {
            return false;
        };
        if !enemy.is_alive() {
            return false;
        }
        let dealt = enemy.archetype.effective_damage(amount);
        enemy.health -= dealt;
        enemy.tint = enemy.tint.lerp(Tint::WHITE, tuning.hit_tint_blend);
        enemy.health <= 0.0
    };

    if killed {
        retire_enemy(
            world,
            entity,
            EnemyFate::Killed,
            registry,
            state,
            events,
            despawn_buffer,
        );
    }
    true
}

/// Take an enemy out of play. Returns false (and does nothing) if the enemy
/// was already retired.
pub fn retire_enemy(
    world: &World,
    entity: Entity,
    fate: EnemyFate,
    registry: &mut EnemyRegistry,
    state: &mut GameState,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
) -> bool {
    let (id, reward, base_damage) = {
        let Ok(mut enemy) = world.get::<&mut Enemy>(entity) else {
            return false;
        };
        if enemy.fate.is_some() {
            return false;
        }
        enemy.fate = Some(fate);
        (enemy.id, enemy.archetype.reward, enemy.archetype.base_damage)
    };

    registry.deregister(id);
    despawn_buffer.push(entity);

    match fate {
        EnemyFate::Killed => {
            state.enemy_killed(reward);
            debug!(enemy = id.0, reward, currency = state.currency(), "enemy killed");
            events.push(SimEvent::EnemyKilled { enemy: id, reward });
        }
        EnemyFate::BreachedBase => {
            let destroyed = state.enemy_reached_base(base_damage);
            debug!(
                enemy = id.0,
                damage = base_damage,
                base_health = state.base_health(),
                "base breached"
            );
            events.push(SimEvent::BaseBreached {
                enemy: id,
                damage: base_damage,
                base_health: state.base_health(),
            });
            if destroyed {
                tracing::info!("base destroyed");
                events.push(SimEvent::GameOver);
            }
        }
    }
    true
}
