//! Error types.
//!
//! `ActionRejected` is not a failure of the engine: it reports a player
//! intent that the rules refused. Its display text doubles as the status
//! line shown to the player.

use serde::Serialize;
use thiserror::Error;

use crate::types::{SpotId, TowerId};

#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(tag = "reason")]
pub enum ActionRejected {
    #[error("Base destroyed.")]
    BaseDestroyed,
    #[error("No build spot {}.", spot.0)]
    UnknownSpot { spot: SpotId },
    #[error("No tower {}.", tower.0)]
    UnknownTower { tower: TowerId },
    #[error("No tower design {index}.")]
    UnknownDesign { index: usize },
    #[error("That spot already has a tower.")]
    SpotOccupied,
    #[error("Not enough currency to deploy that turret.")]
    CannotAffordBuild { cost: u32, available: u32 },
    #[error("Need more currency for the upgrade.")]
    CannotAffordUpgrade { cost: u32, available: u32 },
    #[error("Tower is maxed.")]
    TowerMaxed,
    #[error("A wave is already in progress.")]
    WaveInProgress,
    #[error("Next wave available in {remaining_secs:.1}s.")]
    Resting { remaining_secs: f64 },
    #[error("No waves configured.")]
    NoWaves,
}

/// Invalid session configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("path needs at least one waypoint")]
    EmptyPath,
    #[error("at least one build spot is required")]
    NoBuildSpots,
    #[error("tower catalog is empty")]
    EmptyTowerCatalog,
    #[error("wave catalog is empty")]
    EmptyWaveCatalog,
    #[error("tower design `{0}` has no tiers")]
    DesignWithoutTiers(String),
    #[error("`{field}` is not a finite number in its allowed range")]
    InvalidNumber { field: String },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
