//! Events emitted by the simulation for UI and audio feedback.
//!
//! Each snapshot carries the events raised during the tick that produced it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::{EnemyId, ProjectileId, SpotId, TowerId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A wave began spawning. `index` is zero-based.
    WaveStarted {
        index: u32,
        name: String,
        archetype: String,
        count: u32,
    },
    /// The last enemy of a wave left play; the rest period begins.
    WaveCleared { index: u32 },
    EnemySpawned { enemy: EnemyId },
    EnemyKilled { enemy: EnemyId, reward: u32 },
    BaseBreached {
        enemy: EnemyId,
        damage: u32,
        base_health: u32,
    },
    TowerBuilt {
        tower: TowerId,
        spot: SpotId,
        design: usize,
    },
    TowerUpgraded { tower: TowerId, tier: usize },
    ProjectileFired {
        projectile: ProjectileId,
        tower: TowerId,
        target: EnemyId,
    },
    /// A projectile reached its aim point. `hits` counts every enemy damaged.
    ProjectileImpact {
        projectile: ProjectileId,
        position: Vec3,
        hits: u32,
    },
    /// A projectile ran out of lifetime without hitting anything.
    ProjectileExpired { projectile: ProjectileId },
    /// Base health reached zero.
    GameOver,
}
