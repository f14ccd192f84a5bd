//! Game and economy state: currency, base health, tower selection and the
//! build/upgrade transactions that spend currency.

use hecs::{Entity, World};
use tracing::debug;

use rampart_core::catalog::TowerDesign;
use rampart_core::components::Tower;
use rampart_core::errors::ActionRejected;
use rampart_core::events::SimEvent;
use rampart_core::map::BuildSpot;
use rampart_core::state::DesignSummary;
use rampart_core::types::{SpotId, TowerId};

use crate::config::Tuning;
use crate::systems::towers;
use crate::world_setup::{self, EntityIds};

/// Session-wide mutable state. Created once per session.
#[derive(Debug, Clone)]
pub struct GameState {
    currency: u32,
    base_health: u32,
    selected_design: usize,
    status: String,
}

impl GameState {
    pub fn new(currency: u32, base_health: u32) -> Self {
        Self {
            currency,
            base_health,
            selected_design: 0,
            status: "Place towers, then start the first wave.".to_string(),
        }
    }

    pub fn currency(&self) -> u32 {
        self.currency
    }

    pub fn base_health(&self) -> u32 {
        self.base_health
    }

    /// Base health has reached zero. One-way.
    pub fn is_base_destroyed(&self) -> bool {
        self.base_health == 0
    }

    pub fn selected_design(&self) -> usize {
        self.selected_design
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
    }

    /// Deduct `cost` if affordable. Leaves currency untouched otherwise.
    pub fn try_spend(&mut self, cost: u32) -> bool {
        match self.currency.checked_sub(cost) {
            Some(remaining) => {
                self.currency = remaining;
                true
            }
            None => false,
        }
    }

    pub fn enemy_killed(&mut self, reward: u32) {
        self.currency = self.currency.saturating_add(reward);
    }

    /// Apply breach damage, floored at zero. Returns true if this breach
    /// destroyed the base.
    pub fn enemy_reached_base(&mut self, damage: u32) -> bool {
        if self.is_base_destroyed() {
            return false;
        }
        self.base_health = self.base_health.saturating_sub(damage);
        if self.is_base_destroyed() {
            self.status = "Base destroyed.".to_string();
            true
        } else {
            self.status = format!("Base under attack! {} HP remaining.", self.base_health);
            false
        }
    }

    /// Select a design, clamped into the catalog. Returns the selected index.
    pub fn select_design(&mut self, index: usize, catalog_len: usize) -> usize {
        self.selected_design = index.min(catalog_len.saturating_sub(1));
        self.selected_design
    }

    /// Select the next design, wrapping around.
    pub fn cycle_design(&mut self, catalog_len: usize) -> usize {
        let next = (self.selected_design + 1) % catalog_len.max(1);
        self.select_design(next, catalog_len)
    }

    #[cfg(test)]
    pub(crate) fn set_currency(&mut self, currency: u32) {
        self.currency = currency;
    }
}

/// Summary of a design for the selection panel.
pub fn summarize_design(index: usize, design: &TowerDesign) -> DesignSummary {
    DesignSummary {
        index,
        key: design.key.clone(),
        display_name: design.display_name.clone(),
        cost: design.build_cost(),
        upgrade_cost: design.next_tier_cost(0),
        range: design.tier(0).range,
        flavor: design.flavor.clone(),
    }
}

/// Build the selected design on `spot_id`.
#[allow(clippy::too_many_arguments)]
pub fn try_build_tower(
    state: &mut GameState,
    world: &mut World,
    spots: &mut [BuildSpot],
    towers: &mut Vec<(TowerId, Entity)>,
    catalog: &[TowerDesign],
    tuning: &Tuning,
    ids: &mut EntityIds,
    events: &mut Vec<SimEvent>,
    spot_id: SpotId,
) -> Result<TowerId, ActionRejected> {
    if state.is_base_destroyed() {
        return Err(ActionRejected::BaseDestroyed);
    }
    let spot = spots
        .get_mut(spot_id.0)
        .ok_or(ActionRejected::UnknownSpot { spot: spot_id })?;
    if spot.has_tower() {
        return Err(ActionRejected::SpotOccupied);
    }

    let design_index = state.selected_design;
    let design = &catalog[design_index];
    let cost = design.build_cost();
    if !state.try_spend(cost) {
        return Err(ActionRejected::CannotAffordBuild {
            cost,
            available: state.currency,
        });
    }

    let tower_id = ids.next_tower();
    let position = spot.position + glam::Vec3::Y * tuning.tower_mount_height;
    let entity = world_setup::spawn_tower(world, tower_id, design_index, spot_id, position);
    spot.attach_tower(tower_id);
    towers.push((tower_id, entity));

    let name = design.tower_name(0);
    debug!(tower = tower_id.0, spot = spot_id.0, %name, cost, "tower built");
    state.set_status(format!("{name} deployed."));
    events.push(SimEvent::TowerBuilt {
        tower: tower_id,
        spot: spot_id,
        design: design_index,
    });
    Ok(tower_id)
}

/// Buy the next tier of `tower_id`. Returns the new tier index.
pub fn try_upgrade_tower(
    state: &mut GameState,
    world: &mut World,
    towers: &[(TowerId, Entity)],
    catalog: &[TowerDesign],
    events: &mut Vec<SimEvent>,
    tower_id: TowerId,
) -> Result<usize, ActionRejected> {
    if state.is_base_destroyed() {
        return Err(ActionRejected::BaseDestroyed);
    }
    let entity = towers
        .iter()
        .find(|(id, _)| *id == tower_id)
        .map(|(_, entity)| *entity)
        .ok_or(ActionRejected::UnknownTower { tower: tower_id })?;
    let mut tower = world
        .get::<&mut Tower>(entity)
        .map_err(|_| ActionRejected::UnknownTower { tower: tower_id })?;

    let design = &catalog[tower.design];
    if !design.has_next_tier(tower.tier) {
        return Err(ActionRejected::TowerMaxed);
    }
    let cost = design.next_tier_cost(tower.tier);
    if !state.try_spend(cost) {
        return Err(ActionRejected::CannotAffordUpgrade {
            cost,
            available: state.currency,
        });
    }

    towers::upgrade(&mut tower, design);
    let name = design.tower_name(tower.tier);
    debug!(tower = tower_id.0, tier = tower.tier, %name, cost, "tower upgraded");
    state.set_status(format!("{name} upgraded."));
    events.push(SimEvent::TowerUpgraded {
        tower: tower_id,
        tier: tower.tier,
    });
    Ok(tower.tier)
}
