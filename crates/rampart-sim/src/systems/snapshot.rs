//! Snapshot system: reads the world and builds a complete GameStateSnapshot.
//!
//! Read-only. Runs before cleanup, so entities retired this tick still show
//! up once with `alive = false`.

use hecs::World;

use rampart_core::catalog::TowerDesign;
use rampart_core::components::*;
use rampart_core::constants::{BOSS_SCALE, ENEMY_SCALE, TOWER_SCALE_PER_TIER};
use rampart_core::events::SimEvent;
use rampart_core::map::BuildSpot;
use rampart_core::state::*;
use rampart_core::types::SimTime;

use crate::economy::{summarize_design, GameState};
use crate::registry::EnemyRegistry;
use crate::systems::wave_scheduler::WaveScheduler;

/// Build a complete GameStateSnapshot from the current world state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    state: &GameState,
    scheduler: &WaveScheduler,
    registry: &EnemyRegistry,
    spots: &[BuildSpot],
    catalog: &[TowerDesign],
    events: Vec<SimEvent>,
) -> GameStateSnapshot {
    let now = time.elapsed_secs;
    let selected = state.selected_design();

    GameStateSnapshot {
        time: *time,
        currency: state.currency(),
        base_health: state.base_health(),
        wave_label: wave_label(scheduler.wave_index()),
        wave_index: scheduler.wave_index(),
        wave_name: scheduler.wave_name().map(str::to_string),
        wave_status: scheduler.status(),
        wave_in_progress: scheduler.wave_in_progress(),
        can_start_wave: scheduler
            .check_start(now, state.is_base_destroyed())
            .is_ok(),
        rest_remaining_secs: scheduler.rest_remaining(now),
        enemy_count: registry.len(),
        selected_design: catalog
            .get(selected)
            .map(|design| summarize_design(selected, design))
            .unwrap_or_default(),
        status_message: state.status().to_string(),
        game_over: state.is_base_destroyed(),
        enemies: build_enemies(world),
        towers: build_towers(world, catalog),
        projectiles: build_projectiles(world),
        build_spots: build_spots(spots),
        events,
    }
}

/// "Ready" before the first wave, otherwise the 1-based wave number.
pub fn wave_label(wave_index: Option<u32>) -> String {
    match wave_index {
        Some(index) => (index + 1).to_string(),
        None => "Ready".to_string(),
    }
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &Position)>()
        .iter()
        .map(|(_, (enemy, pos))| EnemyView {
            id: enemy.id,
            label: enemy.archetype.label.clone(),
            position: pos.0,
            tint: enemy.tint,
            scale: if enemy.archetype.is_boss {
                BOSS_SCALE
            } else {
                ENEMY_SCALE
            },
            health: enemy.health.max(0.0),
            max_health: enemy.archetype.health,
            is_boss: enemy.archetype.is_boss,
            alive: enemy.is_alive(),
        })
        .collect();
    enemies.sort_by_key(|view| view.id);
    enemies
}

fn build_towers(world: &World, catalog: &[TowerDesign]) -> Vec<TowerView> {
    let mut towers: Vec<TowerView> = world
        .query::<(&Tower, &Position)>()
        .iter()
        .filter_map(|(_, (tower, pos))| {
            let design = catalog.get(tower.design)?;
            let tier = design.tier(tower.tier);
            Some(TowerView {
                id: tower.id,
                spot: tower.spot,
                design: tower.design,
                name: design.tower_name(tower.tier),
                tier: tower.tier,
                position: pos.0,
                heading: tower.heading,
                range: tier.range,
                tint: tier.color,
                scale: 1.0 + tower.tier as f32 * TOWER_SCALE_PER_TIER,
                upgrade_cost: design.next_tier_cost(tower.tier),
                alive: true,
            })
        })
        .collect();
    towers.sort_by_key(|view| view.id);
    towers
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .map(|(_, (projectile, pos))| ProjectileView {
            id: projectile.id,
            position: pos.0,
            tint: projectile.tint,
            alive: projectile.fate.is_none(),
        })
        .collect();
    projectiles.sort_by_key(|view| view.id);
    projectiles
}

fn build_spots(spots: &[BuildSpot]) -> Vec<BuildSpotView> {
    spots
        .iter()
        .map(|spot| BuildSpotView {
            id: spot.id,
            position: spot.position,
            tower: spot.tower(),
        })
        .collect()
}
