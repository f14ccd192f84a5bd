//! Wave scheduler: paces spawns and rest periods as a per-tick state machine.
//!
//! `Idle -> Spawning -> WaitingForClear -> Resting -> Spawning ...`, with
//! `GameOver` terminal once the base is destroyed. Spawn delays and the rest
//! period are elapsed-time gates checked once per tick.

use std::sync::Arc;

use hecs::World;
use tracing::info;

use rampart_core::catalog::{endless_factor, EnemyArchetype, WaveDefinition};
use rampart_core::errors::ActionRejected;
use rampart_core::events::SimEvent;
use rampart_core::map::Path;
use rampart_core::state::WaveStatus;

use crate::config::{SimConfig, Tuning};
use crate::economy::GameState;
use crate::registry::EnemyRegistry;
use crate::world_setup::{self, EntityIds};

/// Internal scheduler phase, carrying the timers each phase needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchedulerPhase {
    Idle,
    Spawning { spawned: u32, next_spawn_in: f32 },
    WaitingForClear,
    Resting { cleared_at: f64 },
    GameOver,
}

/// A wave that has just been started.
#[derive(Debug, Clone, PartialEq)]
pub struct StartedWave {
    pub index: u32,
    pub name: String,
    pub archetype: String,
    pub count: u32,
}

/// What one tick of scheduling asks the world to do.
#[derive(Debug, Default)]
pub struct WaveTick {
    pub started: Option<StartedWave>,
    pub spawn_count: u32,
}

#[derive(Debug, Clone)]
struct ActiveWave {
    definition: WaveDefinition,
    archetype: Arc<EnemyArchetype>,
}

#[derive(Debug, Clone)]
pub struct WaveScheduler {
    catalog: Vec<WaveDefinition>,
    rest_secs: f64,
    auto_advance: bool,
    endless_step: f32,
    phase: SchedulerPhase,
    /// Zero-based index of the current (or most recent) wave.
    wave_index: Option<u32>,
    active: Option<ActiveWave>,
}

impl WaveScheduler {
    pub fn new(
        catalog: Vec<WaveDefinition>,
        rest_secs: f64,
        auto_advance: bool,
        endless_step: f32,
    ) -> Self {
        Self {
            catalog,
            rest_secs,
            auto_advance,
            endless_step,
            phase: SchedulerPhase::Idle,
            wave_index: None,
            active: None,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(
            config.wave_catalog.clone(),
            config.wave_rest_secs,
            config.auto_advance_waves,
            config.tuning.endless_factor_step,
        )
    }

    /// The wave played at `index`: the catalog entry verbatim, or an endless
    /// wave scaled up from the last catalog entry.
    pub fn wave_for_index(&self, index: u32) -> Option<WaveDefinition> {
        if let Some(wave) = self.catalog.get(index as usize) {
            return Some(wave.clone());
        }
        let last = self.catalog.last()?;
        let factor = endless_factor(index, self.catalog.len(), self.endless_step);
        Some(last.create_scaled(format!("Endless {}", index + 1), factor))
    }

    pub fn phase(&self) -> SchedulerPhase {
        self.phase
    }

    pub fn status(&self) -> WaveStatus {
        match self.phase {
            SchedulerPhase::Idle => WaveStatus::Idle,
            SchedulerPhase::Spawning { .. } => WaveStatus::Spawning,
            SchedulerPhase::WaitingForClear => WaveStatus::WaitingForClear,
            SchedulerPhase::Resting { .. } => WaveStatus::Resting,
            SchedulerPhase::GameOver => WaveStatus::GameOver,
        }
    }

    pub fn wave_index(&self) -> Option<u32> {
        self.wave_index
    }

    pub fn wave_name(&self) -> Option<&str> {
        self.active.as_ref().map(|wave| wave.definition.name.as_str())
    }

    pub fn wave_in_progress(&self) -> bool {
        matches!(
            self.phase,
            SchedulerPhase::Spawning { .. } | SchedulerPhase::WaitingForClear
        )
    }

    /// Seconds of rest left at `now`, 0 outside of the rest period.
    pub fn rest_remaining(&self, now: f64) -> f64 {
        match self.phase {
            SchedulerPhase::Resting { cleared_at } => {
                (self.rest_secs - (now - cleared_at)).max(0.0)
            }
            _ => 0.0,
        }
    }

    /// Whether a start request at `now` would be accepted.
    pub fn check_start(&self, now: f64, base_destroyed: bool) -> Result<(), ActionRejected> {
        if base_destroyed {
            return Err(ActionRejected::BaseDestroyed);
        }
        match self.phase {
            SchedulerPhase::GameOver => Err(ActionRejected::BaseDestroyed),
            SchedulerPhase::Spawning { .. } | SchedulerPhase::WaitingForClear => {
                Err(ActionRejected::WaveInProgress)
            }
            SchedulerPhase::Resting { .. } => {
                let remaining_secs = self.rest_remaining(now);
                if remaining_secs > 0.0 {
                    Err(ActionRejected::Resting { remaining_secs })
                } else {
                    Ok(())
                }
            }
            SchedulerPhase::Idle => Ok(()),
        }
    }

    /// Start the next wave if allowed. Spawning begins on the next scheduler run.
    pub fn start_next_wave(
        &mut self,
        now: f64,
        base_destroyed: bool,
    ) -> Result<StartedWave, ActionRejected> {
        self.check_start(now, base_destroyed)?;
        self.begin_next_wave().ok_or(ActionRejected::NoWaves)
    }

    fn begin_next_wave(&mut self) -> Option<StartedWave> {
        let index = self.wave_index.map_or(0, |index| index + 1);
        let definition = self.wave_for_index(index)?;
        let started = StartedWave {
            index,
            name: definition.name.clone(),
            archetype: definition.archetype.label.clone(),
            count: definition.count,
        };
        self.wave_index = Some(index);
        self.active = Some(ActiveWave {
            archetype: Arc::new(definition.archetype.clone()),
            definition,
        });
        self.phase = SchedulerPhase::Spawning {
            spawned: 0,
            next_spawn_in: 0.0,
        };
        Some(started)
    }

    /// Base destroyed. No further waves start or spawn.
    pub fn enter_game_over(&mut self) {
        self.phase = SchedulerPhase::GameOver;
    }

    /// Advance timers by `dt`. Returns the wave started this tick, if any, and
    /// how many enemies are due.
    pub fn advance(&mut self, dt: f32, now: f64) -> WaveTick {
        let mut tick = WaveTick::default();

        if let SchedulerPhase::Resting { cleared_at } = self.phase {
            if self.auto_advance && now - cleared_at >= self.rest_secs {
                tick.started = self.begin_next_wave();
            }
        }

        let Some(active) = &self.active else {
            return tick;
        };
        let count = active.definition.count;
        let interval = active.definition.spawn_interval;

        if let SchedulerPhase::Spawning {
            spawned,
            next_spawn_in,
        } = &mut self.phase
        {
            while *spawned < count && *next_spawn_in <= 0.0 {
                *spawned += 1;
                *next_spawn_in += interval;
                tick.spawn_count += 1;
            }
            *next_spawn_in -= dt;
            if *spawned >= count && *next_spawn_in <= 0.0 {
                self.phase = SchedulerPhase::WaitingForClear;
            }
        }
        tick
    }

    /// Finish the wave once the field is empty. Returns the cleared wave index.
    pub fn check_cleared(&mut self, now: f64, live_enemies: usize) -> Option<u32> {
        if self.phase != SchedulerPhase::WaitingForClear || live_enemies > 0 {
            return None;
        }
        self.phase = SchedulerPhase::Resting { cleared_at: now };
        self.wave_index
    }

    /// Archetype shared by every enemy of the current wave.
    pub fn active_archetype(&self) -> Option<Arc<EnemyArchetype>> {
        self.active.as_ref().map(|wave| Arc::clone(&wave.archetype))
    }
}

/// Record a wave start in the status line and event stream.
pub fn announce_start(started: &StartedWave, state: &mut GameState, events: &mut Vec<SimEvent>) {
    info!(
        wave = started.index + 1,
        name = %started.name,
        archetype = %started.archetype,
        count = started.count,
        "wave started"
    );
    state.set_status(format!(
        "Wave {}: {} ({})",
        started.index + 1,
        started.name,
        started.archetype
    ));
    events.push(SimEvent::WaveStarted {
        index: started.index,
        name: started.name.clone(),
        archetype: started.archetype.clone(),
        count: started.count,
    });
}

/// Run the scheduler for one tick: auto-start, spawn due enemies, detect clears.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    scheduler: &mut WaveScheduler,
    registry: &mut EnemyRegistry,
    ids: &mut EntityIds,
    path: &Path,
    tuning: &Tuning,
    dt: f32,
    now: f64,
    state: &mut GameState,
    events: &mut Vec<SimEvent>,
) {
    if state.is_base_destroyed() {
        scheduler.enter_game_over();
        return;
    }

    let tick = scheduler.advance(dt, now);
    if let Some(started) = &tick.started {
        announce_start(started, state, events);
    }

    if tick.spawn_count > 0 {
        if let Some(archetype) = scheduler.active_archetype() {
            for _ in 0..tick.spawn_count {
                let enemy = world_setup::spawn_enemy(
                    world,
                    registry,
                    ids,
                    Arc::clone(&archetype),
                    path,
                    tuning,
                );
                events.push(SimEvent::EnemySpawned { enemy });
            }
        }
    }

    if let Some(index) = scheduler.check_cleared(now, registry.len()) {
        info!(wave = index + 1, "wave cleared");
        state.set_status("Wave cleared. Build or upgrade before the next attack.");
        events.push(SimEvent::WaveCleared { index });
    }
}
