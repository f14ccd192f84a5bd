//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in the simulation
//! systems, not here. Entities refer to each other by stable id and resolve
//! the id through a registry lookup each tick.

use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::catalog::EnemyArchetype;
use crate::types::{EnemyId, ProjectileId, SpotId, Tint, TowerId};

/// World-space position of any entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(pub Vec3);

/// How an enemy left play. Set exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyFate {
    Killed,
    BreachedBase,
}

/// An enemy walking the path.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EnemyId,
    /// Shared by every enemy of the same wave.
    pub archetype: Arc<EnemyArchetype>,
    pub health: f32,
    /// Index of the waypoint currently being walked toward.
    pub path_index: usize,
    pub tint: Tint,
    /// `Some` once the enemy has been killed or has breached the base.
    pub fate: Option<EnemyFate>,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.fate.is_none()
    }
}

/// A player-built tower.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tower {
    pub id: TowerId,
    /// Index into the tower catalog.
    pub design: usize,
    /// Current tier. Never decreases.
    pub tier: usize,
    /// Seconds until the next shot is allowed.
    pub cooldown: f32,
    pub spot: SpotId,
    /// Turret yaw in radians.
    pub heading: f32,
}

/// How a projectile left play. Set exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileFate {
    Impact,
    Expired,
}

/// A shot in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub source: TowerId,
    /// The enemy this shot was fired at. May leave play before impact.
    pub target: EnemyId,
    pub damage: f32,
    pub splash_radius: f32,
    pub speed: f32,
    pub lifetime_secs: f32,
    /// Target position as of the last tick the target was still in play.
    pub last_known_target: Vec3,
    pub tint: Tint,
    pub fate: Option<ProjectileFate>,
}
