//! Player intents sent from the host to the simulation.
//!
//! Queued commands are applied at the next tick boundary, before any
//! system runs.

use serde::{Deserialize, Serialize};

use crate::types::{SpotId, TowerId};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Build on a spot. `design: None` builds the currently selected design.
    BuildTower {
        spot: SpotId,
        #[serde(default)]
        design: Option<usize>,
    },
    /// Buy the next tier of a tower.
    UpgradeTower { tower: TowerId },
    /// Select a tower design (clamped to the catalog).
    SelectTowerDesign { index: usize },
    /// Select the next tower design, wrapping around.
    CycleTowerDesign,
    /// Start the next wave now.
    StartNextWave,
}
