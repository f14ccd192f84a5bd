//! Entity spawn factories and id allocation.

use std::sync::Arc;

use glam::Vec3;
use hecs::{Entity, World};

use rampart_core::catalog::{EnemyArchetype, TowerTier};
use rampart_core::components::*;
use rampart_core::map::Path;
use rampart_core::types::{EnemyId, ProjectileId, SpotId, TowerId};

use crate::config::Tuning;
use crate::registry::EnemyRegistry;

/// Hands out session-unique ids. Ids are never reused.
#[derive(Debug, Clone, Default)]
pub struct EntityIds {
    next_enemy: u32,
    next_tower: u32,
    next_projectile: u32,
}

impl EntityIds {
    pub fn next_enemy(&mut self) -> EnemyId {
        let id = EnemyId(self.next_enemy);
        self.next_enemy += 1;
        id
    }

    pub fn next_tower(&mut self) -> TowerId {
        let id = TowerId(self.next_tower);
        self.next_tower += 1;
        id
    }

    pub fn next_projectile(&mut self) -> ProjectileId {
        let id = ProjectileId(self.next_projectile);
        self.next_projectile += 1;
        id
    }
}

/// Spawn an enemy at the start of the path and register it.
pub fn spawn_enemy(
    world: &mut World,
    registry: &mut EnemyRegistry,
    ids: &mut EntityIds,
    archetype: Arc<EnemyArchetype>,
    path: &Path,
    tuning: &Tuning,
) -> EnemyId {
    let start = path.start().unwrap_or(Vec3::ZERO) + Vec3::Y * tuning.enemy_ride_height;
    spawn_enemy_at(world, registry, ids, archetype, start, path.first_target_index())
}

/// Spawn an enemy at an arbitrary point, walking toward `path_index`.
pub fn spawn_enemy_at(
    world: &mut World,
    registry: &mut EnemyRegistry,
    ids: &mut EntityIds,
    archetype: Arc<EnemyArchetype>,
    position: Vec3,
    path_index: usize,
) -> EnemyId {
    let id = ids.next_enemy();
    let enemy = Enemy {
        id,
        health: archetype.health,
        tint: archetype.color,
        archetype,
        path_index,
        fate: None,
    };
    let entity = world.spawn((enemy, Position(position)));
    registry.register(id, entity);
    id
}

/// Spawn a freshly built tower at tier 0.
pub fn spawn_tower(
    world: &mut World,
    id: TowerId,
    design: usize,
    spot: SpotId,
    position: Vec3,
) -> Entity {
    world.spawn((
        Tower {
            id,
            design,
            tier: 0,
            cooldown: 0.0,
            spot,
            heading: 0.0,
        },
        Position(position),
    ))
}

/// Spawn a projectile carrying the firing tier's payload.
#[allow(clippy::too_many_arguments)]
pub fn spawn_projectile(
    world: &mut World,
    id: ProjectileId,
    source: TowerId,
    origin: Vec3,
    target: EnemyId,
    target_position: Vec3,
    tier: &TowerTier,
    tuning: &Tuning,
) -> Entity {
    world.spawn((
        Projectile {
            id,
            source,
            target,
            damage: tier.damage,
            splash_radius: tier.splash_radius,
            speed: tier.projectile_speed,
            lifetime_secs: tuning.projectile_lifetime_secs,
            last_known_target: target_position,
            tint: tier.color,
            fate: None,
        },
        Position(origin),
    ))
}
