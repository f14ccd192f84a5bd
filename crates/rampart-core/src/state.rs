//! Game state snapshot: the complete visible state handed to the host each tick.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::events::SimEvent;
use crate::types::{EnemyId, ProjectileId, SimTime, SpotId, Tint, TowerId};

/// Wave scheduler phase as seen by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaveStatus {
    /// No wave has been started yet.
    #[default]
    Idle,
    /// Enemies of the current wave are still being released.
    Spawning,
    /// All enemies are out; waiting for the field to clear.
    WaitingForClear,
    /// Wave cleared; counting down the rest period.
    Resting,
    /// Base destroyed. Terminal.
    GameOver,
}

/// Complete game state broadcast to the host after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub currency: u32,
    pub base_health: u32,
    /// "Ready" before the first wave, otherwise the 1-based wave number.
    pub wave_label: String,
    /// Zero-based index of the current (or last) wave.
    pub wave_index: Option<u32>,
    pub wave_name: Option<String>,
    pub wave_status: WaveStatus,
    pub wave_in_progress: bool,
    /// Whether a start-wave request would be accepted right now.
    pub can_start_wave: bool,
    /// Seconds left in the rest period, 0 outside of it.
    pub rest_remaining_secs: f64,
    /// Enemies still registered (alive and on the path).
    pub enemy_count: usize,
    pub selected_design: DesignSummary,
    pub status_message: String,
    pub game_over: bool,
    pub enemies: Vec<EnemyView>,
    pub towers: Vec<TowerView>,
    pub projectiles: Vec<ProjectileView>,
    pub build_spots: Vec<BuildSpotView>,
    pub events: Vec<SimEvent>,
}

/// Summary of the tower design the player will build next.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignSummary {
    pub index: usize,
    pub key: String,
    pub display_name: String,
    pub cost: u32,
    pub upgrade_cost: u32,
    pub range: f32,
    pub flavor: String,
}

impl fmt::Display for DesignSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Selected: {} | Cost {} | Upgrade {} | Range {}",
            self.display_name, self.cost, self.upgrade_cost, self.range
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EnemyId,
    pub label: String,
    pub position: Vec3,
    pub tint: Tint,
    pub scale: f32,
    pub health: f32,
    pub max_health: f32,
    pub is_boss: bool,
    /// False on the single tick an enemy is killed or breaches the base.
    pub alive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub id: TowerId,
    pub spot: SpotId,
    pub design: usize,
    /// e.g. "Artillery drone T2".
    pub name: String,
    pub tier: usize,
    pub position: Vec3,
    /// Turret yaw in radians.
    pub heading: f32,
    pub range: f32,
    pub tint: Tint,
    pub scale: f32,
    pub upgrade_cost: u32,
    pub alive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: ProjectileId,
    pub position: Vec3,
    pub tint: Tint,
    /// False on the single tick a projectile impacts or expires.
    pub alive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSpotView {
    pub id: SpotId,
    pub position: Vec3,
    pub tower: Option<TowerId>,
}
