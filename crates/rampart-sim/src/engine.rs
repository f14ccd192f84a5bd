//! Simulation engine.
//!
//! `SimulationEngine` owns the hecs world and all session state, applies
//! player intents, runs the systems in a fixed order and produces a
//! `GameStateSnapshot` per tick. Fully headless, so whole sessions can be
//! driven from tests.

use std::collections::VecDeque;

use hecs::{Entity, World};
use tracing::debug;

use rampart_core::catalog::TowerDesign;
use rampart_core::commands::PlayerCommand;
use rampart_core::errors::{ActionRejected, ConfigError};
use rampart_core::events::SimEvent;
use rampart_core::map::{BuildSpot, Path};
use rampart_core::state::{DesignSummary, GameStateSnapshot, WaveStatus};
use rampart_core::types::{SimTime, SpotId, TowerId};

use crate::config::{SimConfig, Tuning};
use crate::economy::{self, GameState};
use crate::registry::EnemyRegistry;
use crate::systems;
use crate::systems::wave_scheduler::{StartedWave, WaveScheduler};
use crate::world_setup::EntityIds;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    path: Path,
    spots: Vec<BuildSpot>,
    tower_catalog: Vec<TowerDesign>,
    tuning: Tuning,
    state: GameState,
    scheduler: WaveScheduler,
    registry: EnemyRegistry,
    /// Towers in build order.
    towers: Vec<(TowerId, Entity)>,
    ids: EntityIds,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Start a new session. Fails only if the config is invalid.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let spots = config
            .build_spots
            .iter()
            .enumerate()
            .map(|(index, position)| BuildSpot::new(SpotId(index), *position))
            .collect();

        Ok(Self {
            world: World::new(),
            time: SimTime::default(),
            path: Path::new(config.path.clone()),
            spots,
            scheduler: WaveScheduler::from_config(&config),
            state: GameState::new(config.starting_currency, config.base_health),
            tower_catalog: config.tower_catalog,
            tuning: config.tuning,
            registry: EnemyRegistry::default(),
            towers: Vec::new(),
            ids: EntityIds::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    ///
    /// Non-finite or negative `dt` counts as zero.
    pub fn tick(&mut self, dt: f32) -> GameStateSnapshot {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        self.process_commands();
        self.time.advance(dt);
        self.run_systems(dt);

        let events = std::mem::take(&mut self.events);
        let snapshot = systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            &self.state,
            &self.scheduler,
            &self.registry,
            &self.spots,
            &self.tower_catalog,
            events,
        );
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        snapshot
    }

    /// Apply a command immediately. Rejections only update the status line.
    pub fn apply_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::BuildTower { spot, design } => {
                let _ = self.build_tower(spot, design);
            }
            PlayerCommand::UpgradeTower { tower } => {
                let _ = self.upgrade_tower(tower);
            }
            PlayerCommand::SelectTowerDesign { index } => {
                self.select_tower_design(index);
            }
            PlayerCommand::CycleTowerDesign => {
                self.cycle_tower_design();
            }
            PlayerCommand::StartNextWave => {
                let _ = self.start_next_wave();
            }
        }
    }

    /// Build a tower on `spot`. `design: Some(index)` selects that design first;
    /// `None` builds the current selection.
    pub fn build_tower(
        &mut self,
        spot: SpotId,
        design: Option<usize>,
    ) -> Result<TowerId, ActionRejected> {
        if let Some(index) = design {
            if index >= self.tower_catalog.len() {
                return self.rejected(ActionRejected::UnknownDesign { index });
            }
            self.state.select_design(index, self.tower_catalog.len());
        }
        let result = economy::try_build_tower(
            &mut self.state,
            &mut self.world,
            &mut self.spots,
            &mut self.towers,
            &self.tower_catalog,
            &self.tuning,
            &mut self.ids,
            &mut self.events,
            spot,
        );
        self.note(result)
    }

    /// Build the currently selected design on `spot`.
    pub fn build_selected_tower(&mut self, spot: SpotId) -> Result<TowerId, ActionRejected> {
        self.build_tower(spot, None)
    }

    /// Buy the next tier of `tower`. Returns the new tier index.
    pub fn upgrade_tower(&mut self, tower: TowerId) -> Result<usize, ActionRejected> {
        let result = economy::try_upgrade_tower(
            &mut self.state,
            &mut self.world,
            &self.towers,
            &self.tower_catalog,
            &mut self.events,
            tower,
        );
        self.note(result)
    }

    /// Start the next wave now. Enemies begin spawning on the next tick.
    pub fn start_next_wave(&mut self) -> Result<StartedWave, ActionRejected> {
        let result = self
            .scheduler
            .start_next_wave(self.time.elapsed_secs, self.state.is_base_destroyed());
        if let Ok(started) = &result {
            systems::wave_scheduler::announce_start(started, &mut self.state, &mut self.events);
        }
        self.note(result)
    }

    /// Select a tower design, clamped into the catalog.
    pub fn select_tower_design(&mut self, index: usize) -> DesignSummary {
        let selected = self.state.select_design(index, self.tower_catalog.len());
        self.design_summary(selected)
    }

    /// Select the next tower design, wrapping around.
    pub fn cycle_tower_design(&mut self) -> DesignSummary {
        let selected = self.state.cycle_design(self.tower_catalog.len());
        self.design_summary(selected)
    }

    /// Current state without advancing time. Carries any events raised by
    /// immediate calls since the last tick.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            &self.state,
            &self.scheduler,
            &self.registry,
            &self.spots,
            &self.tower_catalog,
            self.events.clone(),
        )
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn currency(&self) -> u32 {
        self.state.currency()
    }

    pub fn base_health(&self) -> u32 {
        self.state.base_health()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_base_destroyed()
    }

    pub fn status_message(&self) -> &str {
        self.state.status()
    }

    pub fn wave_status(&self) -> WaveStatus {
        self.scheduler.status()
    }

    /// Enemies currently in play.
    pub fn enemy_count(&self) -> usize {
        self.registry.len()
    }

    pub fn tower_catalog(&self) -> &[TowerDesign] {
        &self.tower_catalog
    }

    pub fn build_spots(&self) -> &[BuildSpot] {
        &self.spots
    }

    /// Tower ids in build order.
    pub fn tower_ids(&self) -> impl Iterator<Item = TowerId> + '_ {
        self.towers.iter().map(|(id, _)| *id)
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    fn design_summary(&self, index: usize) -> DesignSummary {
        self.tower_catalog
            .get(index)
            .map(|design| economy::summarize_design(index, design))
            .unwrap_or_default()
    }

    fn note<T>(&mut self, result: Result<T, ActionRejected>) -> Result<T, ActionRejected> {
        match result {
            Ok(value) => Ok(value),
            Err(rejection) => self.rejected(rejection),
        }
    }

    fn rejected<T>(&mut self, rejection: ActionRejected) -> Result<T, ActionRejected> {
        debug!(%rejection, "intent rejected");
        self.state.set_status(rejection.to_string());
        Err(rejection)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.apply_command(command);
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        let now = self.time.elapsed_secs;

        if !self.state.is_base_destroyed() {
            // 1. Wave scheduling and spawns
            systems::wave_scheduler::run(
                &mut self.world,
                &mut self.scheduler,
                &mut self.registry,
                &mut self.ids,
                &self.path,
                &self.tuning,
                dt,
                now,
                &mut self.state,
                &mut self.events,
            );
            // 2. Enemy movement and breaches
            systems::movement::run(
                &mut self.world,
                &mut self.registry,
                &self.path,
                &self.tuning,
                dt,
                &mut self.state,
                &mut self.events,
                &mut self.despawn_buffer,
            );
        }

        if self.state.is_base_destroyed() {
            self.scheduler.enter_game_over();
        } else {
            // 3. Towers scan, aim and fire
            systems::towers::run(
                &mut self.world,
                &self.towers,
                &self.registry,
                &self.tower_catalog,
                &self.tuning,
                dt,
                &mut self.ids,
                &mut self.events,
            );
        }

        // 4. Projectiles keep resolving after game over
        systems::projectiles::run(
            &mut self.world,
            &mut self.registry,
            &self.tuning,
            dt,
            &mut self.state,
            &mut self.events,
            &mut self.despawn_buffer,
        );
    }
}

#[cfg(test)]
mod test_support {
    use std::sync::Arc;

    use glam::Vec3;

    use rampart_core::catalog::{EnemyArchetype, TowerTier};
    use rampart_core::components::{Enemy, EnemyFate, Position, Tower};
    use rampart_core::types::{EnemyId, ProjectileId, Tint};

    use super::*;
    use crate::systems::damage;
    use crate::world_setup;

    impl SimulationEngine {
        /// Place an enemy that does not walk (its path index is past the end).
        pub(crate) fn spawn_stationary_enemy(
            &mut self,
            archetype: EnemyArchetype,
            position: Vec3,
        ) -> EnemyId {
            world_setup::spawn_enemy_at(
                &mut self.world,
                &mut self.registry,
                &mut self.ids,
                Arc::new(archetype),
                position,
                self.path.len(),
            )
        }

        /// Place an enemy walking toward waypoint `path_index`.
        pub(crate) fn spawn_walking_enemy(
            &mut self,
            archetype: EnemyArchetype,
            position: Vec3,
            path_index: usize,
        ) -> EnemyId {
            world_setup::spawn_enemy_at(
                &mut self.world,
                &mut self.registry,
                &mut self.ids,
                Arc::new(archetype),
                position,
                path_index,
            )
        }

        /// Launch a projectile at `target` without a tower.
        pub(crate) fn fire_test_projectile(
            &mut self,
            origin: Vec3,
            target: EnemyId,
            damage: f32,
            splash_radius: f32,
            speed: f32,
        ) -> ProjectileId {
            let target_position = self.enemy_position(target).unwrap_or(origin);
            let tier = TowerTier::new(0, 0.0, 1.0, damage, splash_radius, speed, Tint::WHITE);
            let id = self.ids.next_projectile();
            world_setup::spawn_projectile(
                &mut self.world,
                id,
                TowerId(u32::MAX),
                origin,
                target,
                target_position,
                &tier,
                &self.tuning,
            );
            id
        }

        /// Hit an enemy directly, as a projectile impact would.
        pub(crate) fn damage_enemy(&mut self, target: EnemyId, amount: f32) -> bool {
            let Some(entity) = self.registry.entity(target) else {
                return false;
            };
            damage::apply_damage(
                &self.world,
                entity,
                amount,
                &self.tuning,
                &mut self.registry,
                &mut self.state,
                &mut self.events,
                &mut self.despawn_buffer,
            )
        }

        /// Retire an enemy as killed, going through the normal teardown path.
        pub(crate) fn retire_enemy(&mut self, entity: Entity) -> bool {
            damage::retire_enemy(
                &self.world,
                entity,
                EnemyFate::Killed,
                &mut self.registry,
                &mut self.state,
                &mut self.events,
                &mut self.despawn_buffer,
            )
        }

        pub(crate) fn enemy_entity(&self, id: EnemyId) -> Option<Entity> {
            self.registry.entity(id)
        }

        /// Enemy component by id, whether or not it is still registered.
        pub(crate) fn enemy(&self, id: EnemyId) -> Option<Enemy> {
            self.world
                .query::<&Enemy>()
                .iter()
                .find(|(_, enemy)| enemy.id == id)
                .map(|(_, enemy)| enemy.clone())
        }

        pub(crate) fn enemy_position(&self, id: EnemyId) -> Option<Vec3> {
            let entity = self.registry.entity(id)?;
            self.world
                .get::<&Position>(entity)
                .ok()
                .map(|pos| pos.0)
        }

        pub(crate) fn tower_cooldown(&self, id: TowerId) -> Option<f32> {
            let (_, entity) = self.towers.iter().find(|(tower, _)| *tower == id)?;
            self.world.get::<&Tower>(*entity).ok().map(|tower| tower.cooldown)
        }

        pub(crate) fn set_currency(&mut self, currency: u32) {
            self.state.set_currency(currency);
        }

        pub(crate) fn take_events(&mut self) -> Vec<SimEvent> {
            std::mem::take(&mut self.events)
        }
    }
}
