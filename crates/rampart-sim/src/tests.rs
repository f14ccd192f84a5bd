//! Tests for the simulation engine, combat systems, wave scheduler and economy.

use glam::Vec3;

use rampart_core::catalog::{default_wave_catalog, EnemyArchetype, WaveDefinition};
use rampart_core::commands::PlayerCommand;
use rampart_core::components::{Enemy, EnemyFate, Position, Tower};
use rampart_core::errors::{ActionRejected, ConfigError};
use rampart_core::events::SimEvent;
use rampart_core::map::Path;
use rampart_core::state::WaveStatus;
use rampart_core::types::{EnemyId, SpotId, Tint, TowerId};

use crate::config::{SimConfig, Tuning};
use crate::engine::SimulationEngine;
use crate::systems::movement;
use crate::systems::towers;
use crate::systems::wave_scheduler::{SchedulerPhase, WaveScheduler};

fn dummy(health: f32) -> EnemyArchetype {
    EnemyArchetype::new("Dummy", health, 0.0, 10, 1, 0.0, Tint::WHITE, false)
}

fn engine() -> SimulationEngine {
    SimulationEngine::new(SimConfig::default()).unwrap()
}

fn health_of(engine: &SimulationEngine, id: EnemyId) -> f32 {
    engine.enemy(id).map(|enemy| enemy.health).unwrap()
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

// ---- Damage and retirement ----

#[test]
fn test_two_hits_kill_and_reward_once() {
    let mut engine = engine();
    let id = engine.spawn_stationary_enemy(dummy(100.0), Vec3::new(0.0, 0.5, 0.0));
    let currency = engine.currency();

    assert!(engine.damage_enemy(id, 60.0));
    assert!(approx(health_of(&engine, id), 40.0));
    assert_eq!(engine.enemy_count(), 1);

    assert!(engine.damage_enemy(id, 60.0));
    assert_eq!(engine.enemy(id).unwrap().fate, Some(EnemyFate::Killed));
    assert_eq!(engine.enemy_count(), 0, "killed enemy must leave the registry");
    assert_eq!(engine.currency(), currency + 10);

    // Further hits on a dead enemy do nothing.
    assert!(!engine.damage_enemy(id, 60.0));
    assert_eq!(engine.currency(), currency + 10);

    let kills = engine
        .take_events()
        .iter()
        .filter(|event| **event == SimEvent::EnemyKilled { enemy: id, reward: 10 })
        .count();
    assert_eq!(kills, 1, "exactly one kill event");
}

#[test]
fn test_armor_never_blocks_all_damage() {
    let mut engine = engine();
    let mut archetype = dummy(10.0);
    archetype.armor = 50.0;
    let id = engine.spawn_stationary_enemy(archetype, Vec3::ZERO);

    engine.damage_enemy(id, 5.0);
    assert!(approx(health_of(&engine, id), 9.0));
}

#[test]
fn test_retirement_is_idempotent() {
    let mut engine = engine();
    let id = engine.spawn_stationary_enemy(dummy(100.0), Vec3::ZERO);
    let entity = engine.enemy_entity(id).unwrap();
    let currency = engine.currency();

    assert!(engine.retire_enemy(entity));
    assert!(!engine.retire_enemy(entity), "second retirement must be a no-op");
    assert_eq!(engine.currency(), currency + 10);
    assert_eq!(engine.enemy_count(), 0);
    assert!(!engine.damage_enemy(id, 10.0));
}

#[test]
fn test_hit_blends_tint_toward_white() {
    let mut engine = engine();
    let mut archetype = dummy(100.0);
    archetype.color = Tint::new(0.0, 0.0, 0.0);
    let id = engine.spawn_stationary_enemy(archetype, Vec3::ZERO);

    engine.damage_enemy(id, 10.0);
    let tint = engine.enemy(id).unwrap().tint;
    assert!(approx(tint.r, 0.1) && approx(tint.g, 0.1) && approx(tint.b, 0.1));
}

#[test]
fn test_killed_enemy_shown_once_as_dead() {
    let mut engine = engine();
    let id = engine.spawn_stationary_enemy(dummy(10.0), Vec3::ZERO);
    engine.damage_enemy(id, 100.0);

    let snap = engine.tick(0.1);
    let view = snap.enemies.iter().find(|view| view.id == id).unwrap();
    assert!(!view.alive);

    let snap = engine.tick(0.1);
    assert!(snap.enemies.iter().all(|view| view.id != id), "despawned after one tick");
}

// ---- Movement ----

#[test]
fn test_enemy_walks_path_at_own_height_and_breaches() {
    let path = Path::new(vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)]);
    let tuning = Tuning::default();
    let mut archetype = dummy(100.0);
    archetype.speed = 2.0;
    let mut enemy = Enemy {
        id: EnemyId(0),
        health: 100.0,
        tint: Tint::WHITE,
        archetype: std::sync::Arc::new(archetype),
        path_index: 1,
        fate: None,
    };
    let mut position = Position(Vec3::new(0.0, 0.5, 0.0));

    assert!(!movement::step_enemy(&mut enemy, &mut position, &path, &tuning, 1.0));
    assert!(approx(position.0.x, 2.0));
    assert!(approx(position.0.y, 0.5), "enemy keeps its ride height");

    let mut breached = false;
    for _ in 0..4 {
        breached = movement::step_enemy(&mut enemy, &mut position, &path, &tuning, 1.0);
    }
    assert!(breached, "reaching the last waypoint breaches the base");
    assert!(approx(position.0.x, 10.0), "never overshoots the waypoint");
}

// ---- Towers ----

#[test]
fn test_targeting_prefers_nearest_and_first_seen_on_ties() {
    let candidates = [
        (EnemyId(3), Vec3::new(1.0, 0.0, 0.0)),
        (EnemyId(1), Vec3::new(-1.0, 0.0, 0.0)),
        (EnemyId(2), Vec3::new(3.0, 0.0, 0.0)),
    ];
    let (id, _) = towers::find_target(Vec3::ZERO, 5.0, &candidates).unwrap();
    assert_eq!(id, EnemyId(3), "earlier candidate wins an exact tie");

    assert!(towers::find_target(Vec3::ZERO, 0.5, &candidates).is_none());
}

#[test]
fn test_targeting_range_is_planar_and_inclusive() {
    let candidates = [(EnemyId(0), Vec3::new(2.0, 10.0, 0.0))];
    assert!(towers::find_target(Vec3::ZERO, 2.0, &candidates).is_some());
}

#[test]
fn test_upgrade_stops_at_final_tier() {
    let engine = engine();
    let design = &engine.tower_catalog()[0];
    let mut tower = Tower {
        id: TowerId(0),
        design: 0,
        tier: 0,
        cooldown: 0.0,
        spot: SpotId(0),
        heading: 0.0,
    };
    assert_eq!(design.next_tier_cost(0), design.tiers[1].cost);

    assert!(towers::upgrade(&mut tower, design));
    assert_eq!(tower.tier, 1);
    assert!(!towers::upgrade(&mut tower, design));
    assert_eq!(tower.tier, 1);
}

#[test]
fn test_tower_cooldown_gates_shots_and_pauses_without_target() {
    let mut engine = engine();
    engine.set_currency(1000);
    let tower = engine.build_tower(SpotId(0), Some(0)).unwrap();
    let reload = engine.tower_catalog()[0].tiers[0].reload_secs();
    assert!(approx(reload, 1.0 / 1.1));
    let near = engine.spawn_stationary_enemy(dummy(100_000.0), Vec3::new(-12.0, 0.5, -4.0));

    // 1/1.1 s of reload at 0.1 s per tick takes ten countdown ticks.
    let mut fired_at = Vec::new();
    for tick in 0..34 {
        let snap = engine.tick(0.1);
        if snap
            .events
            .iter()
            .any(|event| matches!(event, SimEvent::ProjectileFired { .. }))
        {
            fired_at.push(tick);
        }
    }
    assert_eq!(fired_at, vec![0, 11, 22, 33]);
    assert!(approx(engine.tower_cooldown(tower).unwrap(), reload));

    // Only an out-of-range enemy left: no target, so the cooldown holds.
    engine.damage_enemy(near, 1_000_000.0);
    engine.spawn_stationary_enemy(dummy(100.0), Vec3::new(20.0, 0.5, 20.0));
    for _ in 0..20 {
        engine.tick(0.1);
    }
    assert!(approx(engine.tower_cooldown(tower).unwrap(), reload));

    engine.spawn_stationary_enemy(dummy(100.0), Vec3::new(-12.0, 0.5, -4.0));
    let snap = engine.tick(0.1);
    assert!(!snap
        .events
        .iter()
        .any(|event| matches!(event, SimEvent::ProjectileFired { .. })));
    assert!(approx(engine.tower_cooldown(tower).unwrap(), reload - 0.1));
}

#[test]
fn test_tower_aims_fires_and_kills() {
    let mut engine = engine();
    engine.set_currency(1000);
    let tower = engine.build_tower(SpotId(0), Some(0)).unwrap();
    // Spot 0 is at (-16, 0, -4); the enemy sits 4 units east of it.
    let enemy = engine.spawn_stationary_enemy(dummy(100.0), Vec3::new(-12.0, 0.5, -4.0));

    let snap = engine.tick(1.0 / 30.0);
    let view = snap.towers.iter().find(|view| view.id == tower).unwrap();
    assert!(approx(view.heading, std::f32::consts::FRAC_PI_2));
    assert!(snap
        .events
        .iter()
        .any(|event| matches!(event, SimEvent::ProjectileFired { tower: t, .. } if *t == tower)));

    let mut fired = 1;
    for _ in 0..300 {
        let snap = engine.tick(1.0 / 30.0);
        fired += snap
            .events
            .iter()
            .filter(|event| matches!(event, SimEvent::ProjectileFired { .. }))
            .count();
    }
    assert!(engine.enemy(enemy).is_none(), "enemy should be dead and despawned");
    assert!(fired >= 7, "100 hp at 16 per shot needs 7 shots, fired {fired}");
    assert_eq!(engine.currency(), 1000 - 125 + 10);
}

// ---- Projectiles ----

#[test]
fn test_splash_damages_nearby_bystanders_only() {
    let mut engine = engine();
    let primary = engine.spawn_stationary_enemy(dummy(100.0), Vec3::new(0.0, 0.5, 0.0));
    let near = engine.spawn_stationary_enemy(dummy(100.0), Vec3::new(2.0, 0.5, 0.0));
    let far = engine.spawn_stationary_enemy(dummy(100.0), Vec3::new(5.0, 0.5, 0.0));

    engine.fire_test_projectile(Vec3::new(0.0, 0.7, -1.0), primary, 40.0, 3.0, 100.0);
    let snap = engine.tick(0.1);

    assert!(approx(health_of(&engine, primary), 60.0));
    assert!(approx(health_of(&engine, near), 74.0), "bystander takes 65%");
    assert!(approx(health_of(&engine, far), 100.0), "outside the radius");
    assert!(snap
        .events
        .iter()
        .any(|event| matches!(event, SimEvent::ProjectileImpact { hits: 2, .. })));
}

#[test]
fn test_projectile_expires_without_effect() {
    let mut engine = engine();
    let target = engine.spawn_stationary_enemy(dummy(100.0), Vec3::new(0.0, 0.5, 0.0));
    let projectile =
        engine.fire_test_projectile(Vec3::new(0.0, 0.7, -100.0), target, 40.0, 0.0, 1.0);

    for _ in 0..4 {
        let snap = engine.tick(1.0);
        assert!(snap.projectiles.iter().any(|view| view.id == projectile && view.alive));
    }
    let snap = engine.tick(1.0);
    assert!(snap
        .events
        .contains(&SimEvent::ProjectileExpired { projectile }));
    assert!(snap.projectiles.iter().any(|view| view.id == projectile && !view.alive));

    let snap = engine.tick(1.0);
    assert!(snap.projectiles.is_empty());
    assert!(approx(health_of(&engine, target), 100.0));
}

#[test]
fn test_projectile_flies_on_to_last_known_position() {
    let mut engine = engine();
    let target = engine.spawn_stationary_enemy(dummy(100.0), Vec3::new(0.0, 0.5, 0.0));
    let other = engine.spawn_stationary_enemy(dummy(100.0), Vec3::new(0.0, 0.5, 5.0));
    let projectile =
        engine.fire_test_projectile(Vec3::new(0.0, 0.7, -10.0), target, 40.0, 0.0, 5.0);

    engine.tick(0.5);
    engine.damage_enemy(target, 1000.0);

    let mut impact = None;
    for _ in 0..10 {
        let snap = engine.tick(0.5);
        for event in snap.events {
            if let SimEvent::ProjectileImpact {
                projectile: id,
                position,
                hits,
            } = event
            {
                assert_eq!(id, projectile);
                impact = Some((position, hits));
            }
        }
    }
    let (position, hits) = impact.expect("projectile should still impact");
    assert_eq!(hits, 0);
    assert!(position.distance(Vec3::new(0.0, 0.7, 0.0)) < 0.15);
    assert!(approx(health_of(&engine, other), 100.0), "no re-targeting");
}

// ---- Wave scheduler ----

fn small_wave() -> WaveDefinition {
    WaveDefinition::new("Probe", dummy(10.0), 2, 0.5)
}

#[test]
fn test_scheduler_spawns_on_interval_then_waits_for_clear() {
    let mut scheduler = WaveScheduler::new(vec![small_wave()], 6.0, true, 0.35);
    let started = scheduler.start_next_wave(0.0, false).unwrap();
    assert_eq!(started.index, 0);
    assert_eq!(started.count, 2);

    let first = scheduler.advance(0.1, 0.1);
    assert_eq!(first.spawn_count, 1, "first enemy spawns immediately");

    let mut spawned = first.spawn_count;
    let mut now = 0.1;
    for _ in 0..20 {
        now += 0.1;
        spawned += scheduler.advance(0.1, now).spawn_count;
    }
    assert_eq!(spawned, 2);
    assert_eq!(scheduler.phase(), SchedulerPhase::WaitingForClear);
    assert!(scheduler.wave_in_progress());

    assert_eq!(scheduler.check_cleared(now, 1), None, "enemies still alive");
    assert_eq!(scheduler.check_cleared(now, 0), Some(0));
    assert_eq!(scheduler.status(), WaveStatus::Resting);
}

#[test]
fn test_scheduler_rest_gates_next_wave() {
    let mut scheduler = WaveScheduler::new(vec![small_wave()], 6.0, true, 0.35);
    scheduler.start_next_wave(0.0, false).unwrap();
    for step in 1..=20 {
        scheduler.advance(0.1, f64::from(step) * 0.1);
    }
    let cleared_at = 10.0;
    scheduler.check_cleared(cleared_at, 0).unwrap();

    match scheduler.start_next_wave(cleared_at + 2.0, false) {
        Err(ActionRejected::Resting { remaining_secs }) => {
            assert!((remaining_secs - 4.0).abs() < 1e-9)
        }
        other => panic!("expected a rest rejection, got {other:?}"),
    }
    assert!(scheduler.advance(0.0, cleared_at + 5.99).started.is_none());

    let tick = scheduler.advance(0.0, cleared_at + 6.0);
    let started = tick.started.expect("auto-start once the rest is over");
    assert_eq!(started.index, 1);
    assert_eq!(started.name, "Endless 2");
    assert_eq!(tick.spawn_count, 1);
}

#[test]
fn test_manual_start_rejected_while_wave_runs() {
    let mut scheduler = WaveScheduler::new(vec![small_wave()], 6.0, false, 0.35);
    scheduler.start_next_wave(0.0, false).unwrap();
    assert_eq!(
        scheduler.start_next_wave(0.0, false),
        Err(ActionRejected::WaveInProgress)
    );
    assert_eq!(
        scheduler.start_next_wave(0.0, true),
        Err(ActionRejected::BaseDestroyed)
    );
}

#[test]
fn test_endless_waves_escalate_from_last_entry() {
    let scheduler = WaveScheduler::new(default_wave_catalog(), 6.0, true, 0.35);
    let catalog = default_wave_catalog();

    assert_eq!(scheduler.wave_for_index(0).unwrap(), catalog[0]);
    assert_eq!(scheduler.wave_for_index(4).unwrap(), catalog[4]);

    let first_endless = scheduler.wave_for_index(5).unwrap();
    assert_eq!(first_endless.name, "Endless 6");
    assert!(approx(first_endless.archetype.health, 380.0 * 1.35));
    assert_eq!(first_endless.count, 8);

    let second_endless = scheduler.wave_for_index(6).unwrap();
    assert!(second_endless.archetype.health > first_endless.archetype.health);
    assert!(second_endless.count >= first_endless.count);
    assert!(second_endless.spawn_interval <= first_endless.spawn_interval);
}

#[test]
fn test_start_wave_spawns_at_path_start() {
    let mut engine = engine();
    let started = engine.start_next_wave().unwrap();
    assert_eq!(started.name, "Recon Patrol");
    assert_eq!(engine.status_message(), "Wave 1: Recon Patrol (Light scouts)");

    let snap = engine.tick(0.1);
    assert_eq!(snap.wave_label, "1");
    assert_eq!(snap.wave_status, WaveStatus::Spawning);
    assert_eq!(snap.enemy_count, 1);
    assert!(snap
        .events
        .iter()
        .any(|event| matches!(event, SimEvent::WaveStarted { index: 0, .. })));
    let enemy = &snap.enemies[0];
    assert!(enemy.position.y > 0.4, "enemies ride above the path");
    assert!(!snap.can_start_wave);
    assert_eq!(engine.start_next_wave(), Err(ActionRejected::WaveInProgress));
}

// ---- Economy ----

#[test]
fn test_build_rejected_without_funds() {
    let mut engine = engine();
    engine.set_currency(50);

    let result = engine.build_tower(SpotId(0), Some(0));
    assert_eq!(
        result,
        Err(ActionRejected::CannotAffordBuild {
            cost: 125,
            available: 50
        })
    );
    assert_eq!(engine.currency(), 50);
    assert_eq!(engine.tower_ids().count(), 0);
    assert_eq!(
        engine.status_message(),
        "Not enough currency to deploy that turret."
    );
}

#[test]
fn test_build_and_upgrade_spend_currency() {
    let mut engine = engine();
    engine.set_currency(1000);

    let tower = engine.build_tower(SpotId(0), Some(0)).unwrap();
    assert_eq!(engine.currency(), 875);
    assert_eq!(engine.status_message(), "Infantry turret T1 deployed.");
    assert_eq!(engine.build_tower(SpotId(0), None), Err(ActionRejected::SpotOccupied));

    assert_eq!(engine.upgrade_tower(tower), Ok(1));
    assert_eq!(engine.currency(), 700);
    assert_eq!(engine.status_message(), "Infantry turret T2 upgraded.");

    assert_eq!(engine.upgrade_tower(tower), Err(ActionRejected::TowerMaxed));
    assert_eq!(engine.currency(), 700);
}

#[test]
fn test_unknown_targets_are_rejected() {
    let mut engine = engine();
    assert_eq!(
        engine.build_tower(SpotId(99), None),
        Err(ActionRejected::UnknownSpot { spot: SpotId(99) })
    );
    assert_eq!(
        engine.build_tower(SpotId(0), Some(7)),
        Err(ActionRejected::UnknownDesign { index: 7 })
    );
    assert_eq!(
        engine.upgrade_tower(TowerId(3)),
        Err(ActionRejected::UnknownTower { tower: TowerId(3) })
    );
    assert_eq!(engine.currency(), 260);
}

#[test]
fn test_design_selection_clamps_and_cycles() {
    let mut engine = engine();
    assert_eq!(engine.select_tower_design(9).index, 1);
    let summary = engine.cycle_tower_design();
    assert_eq!(summary.index, 0);
    assert_eq!(
        summary.to_string(),
        "Selected: Infantry turret | Cost 125 | Upgrade 175 | Range 8"
    );
}

#[test]
fn test_queued_commands_apply_at_tick_boundary() {
    let mut engine = engine();
    engine.queue_command(PlayerCommand::BuildTower {
        spot: SpotId(2),
        design: Some(1),
    });
    assert_eq!(engine.currency(), 260);

    let snap = engine.tick(0.016);
    assert_eq!(snap.currency, 100);
    assert_eq!(snap.towers.len(), 1);
    assert_eq!(snap.towers[0].name, "Artillery drone T1");
    assert_eq!(snap.build_spots[2].tower, Some(snap.towers[0].id));
    assert!(snap
        .events
        .iter()
        .any(|event| matches!(event, SimEvent::TowerBuilt { design: 1, .. })));

    engine.queue_command(PlayerCommand::BuildTower {
        spot: SpotId(2),
        design: None,
    });
    let snap = engine.tick(0.016);
    assert_eq!(snap.status_message, "That spot already has a tower.");
}

// ---- Game over ----

#[test]
fn test_base_destroyed_blocks_further_play() {
    let config = SimConfig {
        base_health: 1,
        path: vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)],
        ..Default::default()
    };
    let mut engine = SimulationEngine::new(config).unwrap();
    let mut runner = dummy(100.0);
    runner.speed = 10.0;
    engine.spawn_walking_enemy(runner, Vec3::new(0.0, 0.5, 0.0), 1);

    let snap = engine.tick(0.5);
    assert!(snap.game_over);
    assert_eq!(snap.base_health, 0);
    assert_eq!(snap.wave_status, WaveStatus::GameOver);
    assert_eq!(snap.status_message, "Base destroyed.");
    assert!(snap.events.contains(&SimEvent::GameOver));
    assert!(snap
        .events
        .iter()
        .any(|event| matches!(event, SimEvent::BaseBreached { base_health: 0, .. })));

    let currency = engine.currency();
    assert_eq!(engine.build_tower(SpotId(0), None), Err(ActionRejected::BaseDestroyed));
    assert_eq!(engine.start_next_wave(), Err(ActionRejected::BaseDestroyed));
    assert_eq!(engine.upgrade_tower(TowerId(0)), Err(ActionRejected::BaseDestroyed));
    assert_eq!(engine.currency(), currency);
    assert!(!engine.tick(0.5).can_start_wave);
}

#[test]
fn test_projectiles_resolve_after_base_destroyed() {
    let config = SimConfig {
        base_health: 1,
        path: vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)],
        ..Default::default()
    };
    let mut engine = SimulationEngine::new(config).unwrap();
    // The tower at spot 0 has the target in range but must never fire.
    engine.build_tower(SpotId(0), Some(0)).unwrap();
    let target = engine.spawn_stationary_enemy(dummy(10.0), Vec3::new(-12.0, 0.5, -4.0));
    let mut runner = dummy(100.0);
    runner.speed = 10.0;
    engine.spawn_walking_enemy(runner, Vec3::new(0.0, 0.5, 0.0), 1);
    engine.start_next_wave().unwrap();
    engine.fire_test_projectile(Vec3::new(-12.0, 0.7, -14.0), target, 40.0, 0.0, 5.0);
    let currency = engine.currency();

    let snap = engine.tick(0.5);
    assert!(snap.game_over);
    assert!(!snap
        .events
        .iter()
        .any(|event| matches!(event, SimEvent::ProjectileFired { .. })));

    let mut events = Vec::new();
    for _ in 0..10 {
        events.extend(engine.tick(0.5).events);
    }
    assert!(events
        .iter()
        .any(|event| matches!(event, SimEvent::ProjectileImpact { hits: 1, .. })));
    assert!(events.contains(&SimEvent::EnemyKilled {
        enemy: target,
        reward: 10
    }));
    assert!(!events.iter().any(|event| matches!(
        event,
        SimEvent::ProjectileFired { .. } | SimEvent::EnemySpawned { .. }
    )));
    assert_eq!(engine.currency(), currency + 10, "late kills still pay out");
    assert_eq!(engine.wave_status(), WaveStatus::GameOver);
}

// ---- Time and determinism ----

#[test]
fn test_invalid_dt_counts_as_zero() {
    let mut engine = engine();
    engine.tick(f32::NAN);
    engine.tick(-1.0);
    engine.tick(f32::INFINITY);
    assert_eq!(engine.time().tick, 3);
    assert_eq!(engine.time().elapsed_secs, 0.0);
}

#[test]
fn test_determinism_same_inputs() {
    let commands = [
        PlayerCommand::BuildTower {
            spot: SpotId(2),
            design: Some(0),
        },
        PlayerCommand::BuildTower {
            spot: SpotId(4),
            design: None,
        },
        PlayerCommand::StartNextWave,
    ];
    let mut engine_a = engine();
    let mut engine_b = engine();
    engine_a.queue_commands(commands.clone());
    engine_b.queue_commands(commands);

    for _ in 0..1200 {
        let json_a = serde_json::to_string(&engine_a.tick(1.0 / 60.0)).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick(1.0 / 60.0)).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with identical inputs");
    }
}

// ---- Config ----

#[test]
fn test_config_json_fills_in_stock_values() {
    let config = SimConfig::from_json_str(r#"{"starting_currency": 500}"#).unwrap();
    assert_eq!(config.starting_currency, 500);
    assert_eq!(config.path.len(), 6);
    assert_eq!(config.build_spots.len(), 7);
    assert_eq!(config.tuning, Tuning::default());
}

#[test]
fn test_config_rejects_invalid_values() {
    assert!(matches!(
        SimConfig::from_json_str(r#"{"path": []}"#),
        Err(ConfigError::EmptyPath)
    ));
    assert!(matches!(
        SimConfig::from_json_str(r#"{"wave_rest_secs": -1.0}"#),
        Err(ConfigError::InvalidNumber { .. })
    ));
    assert!(matches!(
        SimConfig::from_json_str("not json"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_config_rejects_zero_thresholds() {
    for field in ["waypoint_epsilon", "impact_epsilon", "projectile_lifetime_secs"] {
        let json = format!(r#"{{"tuning": {{"{field}": 0.0}}}}"#);
        match SimConfig::from_json_str(&json) {
            Err(ConfigError::InvalidNumber { field: reported }) => assert_eq!(reported, field),
            other => panic!("zero {field} should be rejected, got {other:?}"),
        }
    }
    let json = r#"{"tuning": {"impact_epsilon": -0.1}}"#;
    assert!(matches!(
        SimConfig::from_json_str(json),
        Err(ConfigError::InvalidNumber { .. })
    ));
}
