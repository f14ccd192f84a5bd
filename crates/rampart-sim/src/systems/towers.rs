//! Tower targeting, firing and in-place upgrades.

use glam::Vec3;
use hecs::{Entity, World};
use tracing::trace;

use rampart_core::catalog::TowerDesign;
use rampart_core::components::{Position, Tower};
use rampart_core::constants::{MUZZLE_HEIGHT, MUZZLE_REACH};
use rampart_core::events::SimEvent;
use rampart_core::types::{
    heading_forward, planar_distance_squared, planar_heading, EnemyId, TowerId,
};

use crate::config::Tuning;
use crate::registry::EnemyRegistry;
use crate::world_setup::{self, EntityIds};

/// A shot decided during the scan, spawned once the tower borrow is released.
struct ShotRequest {
    design: usize,
    tier: usize,
    origin: Vec3,
    target: EnemyId,
    target_position: Vec3,
}

/// Scan, aim and fire every tower, in build order.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    towers: &[(TowerId, Entity)],
    registry: &EnemyRegistry,
    catalog: &[TowerDesign],
    tuning: &Tuning,
    dt: f32,
    ids: &mut EntityIds,
    events: &mut Vec<SimEvent>,
) {
    if registry.is_empty() {
        return;
    }

    // Enemies do not move or die while towers scan, so one pass suffices.
    let candidates: Vec<(EnemyId, Vec3)> = registry
        .iter()
        .filter_map(|(id, entity)| world.get::<&Position>(entity).ok().map(|p| (id, p.0)))
        .collect();

    for &(tower_id, entity) in towers {
        let shot = match world.query_one_mut::<(&mut Tower, &Position)>(entity) {
            Ok((tower, position)) => aim_and_reload(tower, position.0, catalog, &candidates, dt),
            Err(_) => None,
        };
        let Some(shot) = shot else {
            continue;
        };

        let tier = catalog[shot.design].tier(shot.tier);
        let projectile_id = ids.next_projectile();
        world_setup::spawn_projectile(
            world,
            projectile_id,
            tower_id,
            shot.origin,
            shot.target,
            shot.target_position,
            tier,
            tuning,
        );
        trace!(tower = tower_id.0, projectile = projectile_id.0, target = shot.target.0, "fired");
        events.push(SimEvent::ProjectileFired {
            projectile: projectile_id,
            tower: tower_id,
            target: shot.target,
        });
    }
}

/// Target, aim and tick the cooldown of one tower. Returns a shot if it fires.
fn aim_and_reload(
    tower: &mut Tower,
    position: Vec3,
    catalog: &[TowerDesign],
    candidates: &[(EnemyId, Vec3)],
    dt: f32,
) -> Option<ShotRequest> {
    let tier = catalog[tower.design].tier(tower.tier);
    let (target, target_position) = find_target(position, tier.range, candidates)?;

    tower.heading = planar_heading(position, target_position);
    if tower.cooldown > 0.0 {
        tower.cooldown -= dt;
        return None;
    }
    tower.cooldown = tier.reload_secs();

    Some(ShotRequest {
        design: tower.design,
        tier: tower.tier,
        origin: muzzle_position(position, tower.heading),
        target,
        target_position,
    })
}

/// Nearest candidate within `range` on the ground plane. On equal distance the
/// earlier candidate wins.
pub fn find_target(
    origin: Vec3,
    range: f32,
    candidates: &[(EnemyId, Vec3)],
) -> Option<(EnemyId, Vec3)> {
    let range_sq = range * range;
    let mut best: Option<(EnemyId, Vec3, f32)> = None;
    for &(id, position) in candidates {
        let distance_sq = planar_distance_squared(origin, position);
        if distance_sq > range_sq {
            continue;
        }
        if best.map_or(true, |(_, _, best_sq)| distance_sq < best_sq) {
            best = Some((id, position, distance_sq));
        }
    }
    best.map(|(id, position, _)| (id, position))
}

/// Where shots leave the turret for a given heading.
pub fn muzzle_position(tower_position: Vec3, heading: f32) -> Vec3 {
    tower_position + Vec3::Y * MUZZLE_HEIGHT + heading_forward(heading) * MUZZLE_REACH
}

/// Raise the tower one tier. No-op at the final tier. Returns true if it upgraded.
pub fn upgrade(tower: &mut Tower, design: &TowerDesign) -> bool {
    if !design.has_next_tier(tower.tier) {
        return false;
    }
    tower.tier += 1;
    true
}
