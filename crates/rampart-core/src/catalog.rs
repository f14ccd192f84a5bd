//! Static design catalog: enemy archetypes, tower designs and wave templates.
//!
//! Catalog values are immutable once built. Scaling produces new values and
//! never mutates the template it was derived from.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::{lerp, Tint};

/// Template defining an enemy's stats before difficulty scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyArchetype {
    pub label: String,
    pub health: f32,
    /// Travel speed in world units per second.
    pub speed: f32,
    /// Currency credited when killed.
    pub reward: u32,
    /// Base health removed when it reaches the end of the path.
    pub base_damage: u32,
    /// Flat reduction applied to every incoming hit.
    pub armor: f32,
    pub color: Tint,
    #[serde(default)]
    pub is_boss: bool,
}

impl EnemyArchetype {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        label: impl Into<String>,
        health: f32,
        speed: f32,
        reward: u32,
        base_damage: u32,
        armor: f32,
        color: Tint,
        is_boss: bool,
    ) -> Self {
        Self {
            label: label.into(),
            health,
            speed,
            reward,
            base_damage,
            armor,
            color,
            is_boss,
        }
    }

    /// Derive a harder (or easier) variant of this archetype.
    ///
    /// `scaled(1.0)` returns an identical archetype.
    pub fn scaled(&self, factor: f32) -> EnemyArchetype {
        let speed_blend = (factor - 1.0).clamp(0.0, 1.0);
        EnemyArchetype {
            label: self.label.clone(),
            health: self.health * factor,
            speed: self.speed * lerp(1.0, 1.0 + SCALED_SPEED_BONUS, speed_blend),
            reward: round_to_count(self.reward as f32 * factor),
            base_damage: round_to_count(
                self.base_damage as f32 * lerp(1.0, factor, SCALED_BASE_DAMAGE_BLEND),
            ),
            armor: self.armor + (factor - 1.0) * SCALED_ARMOR_PER_FACTOR,
            color: self.color,
            is_boss: self.is_boss,
        }
    }

    /// Damage actually removed from health by a hit of `amount`.
    pub fn effective_damage(&self, amount: f32) -> f32 {
        effective_damage(amount, self.armor)
    }
}

/// Armor-adjusted damage. Never below [`MIN_EFFECTIVE_DAMAGE`], so no enemy
/// can become unkillable.
pub fn effective_damage(amount: f32, armor: f32) -> f32 {
    (amount - armor).max(MIN_EFFECTIVE_DAMAGE)
}

/// Round half-to-even and clamp into an unsigned count.
fn round_to_count(value: f32) -> u32 {
    value.round_ties_even().max(0.0) as u32
}

/// One upgrade level of a tower design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerTier {
    pub cost: u32,
    pub range: f32,
    /// Shots per second.
    pub fire_rate: f32,
    pub damage: f32,
    /// Zero for single-target towers.
    pub splash_radius: f32,
    pub projectile_speed: f32,
    pub color: Tint,
}

impl TowerTier {
    pub fn new(
        cost: u32,
        range: f32,
        fire_rate: f32,
        damage: f32,
        splash_radius: f32,
        projectile_speed: f32,
        color: Tint,
    ) -> Self {
        Self {
            cost,
            range,
            fire_rate,
            damage,
            splash_radius,
            projectile_speed,
            color,
        }
    }

    /// Seconds between shots.
    pub fn reload_secs(&self) -> f32 {
        1.0 / self.fire_rate.max(MIN_FIRE_RATE)
    }
}

/// A buildable tower type. Tier 0 is the built form; later tiers are paid upgrades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerDesign {
    pub key: String,
    pub display_name: String,
    pub tiers: Vec<TowerTier>,
    #[serde(default)]
    pub flavor: String,
}

impl TowerDesign {
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        tiers: Vec<TowerTier>,
        flavor: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            tiers,
            flavor: flavor.into(),
        }
    }

    /// Index of the final tier.
    pub fn max_tier(&self) -> usize {
        self.tiers.len().saturating_sub(1)
    }

    pub fn has_next_tier(&self, current_tier: usize) -> bool {
        current_tier + 1 < self.tiers.len()
    }

    /// Cost of the tier after `current_tier`, or 0 when already at the top.
    pub fn next_tier_cost(&self, current_tier: usize) -> u32 {
        self.tiers
            .get(current_tier + 1)
            .map(|tier| tier.cost)
            .unwrap_or(0)
    }

    /// Cost to build tier 0.
    pub fn build_cost(&self) -> u32 {
        self.tiers.first().map(|tier| tier.cost).unwrap_or(0)
    }

    /// The requested tier, clamped to the top tier.
    pub fn tier(&self, index: usize) -> &TowerTier {
        &self.tiers[index.min(self.max_tier())]
    }

    /// Name shown for a tower of this design at `tier`, e.g. "Infantry turret T2".
    pub fn tower_name(&self, tier: usize) -> String {
        format!("{} T{}", self.display_name, tier + 1)
    }
}

/// A timed batch of enemies of one archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveDefinition {
    pub name: String,
    pub archetype: EnemyArchetype,
    pub count: u32,
    /// Seconds between consecutive spawns.
    pub spawn_interval: f32,
}

impl WaveDefinition {
    pub fn new(
        name: impl Into<String>,
        archetype: EnemyArchetype,
        count: u32,
        spawn_interval: f32,
    ) -> Self {
        Self {
            name: name.into(),
            archetype,
            count,
            spawn_interval,
        }
    }

    /// Derive a bigger, faster-spawning wave of a scaled archetype.
    pub fn create_scaled(&self, name: impl Into<String>, factor: f32) -> WaveDefinition {
        let count = (self.count as f32 * lerp(1.0, factor, WAVE_COUNT_SCALE_BLEND)).ceil();
        let interval =
            self.spawn_interval * lerp(1.0, 1.0 / factor, WAVE_INTERVAL_SCALE_BLEND);
        WaveDefinition {
            name: name.into(),
            archetype: self.archetype.scaled(factor),
            count: count.max(0.0) as u32,
            spawn_interval: interval.max(MIN_SPAWN_INTERVAL_SECS),
        }
    }
}

/// Scaling factor of the endless wave at `index` once a catalog of
/// `catalog_len` waves is exhausted.
pub fn endless_factor(index: u32, catalog_len: usize, step: f32) -> f32 {
    let additional = i64::from(index) - catalog_len as i64 + 1;
    1.0 + additional as f32 * step
}

/// The stock tower lineup.
pub fn default_tower_catalog() -> Vec<TowerDesign> {
    vec![
        TowerDesign::new(
            "INF",
            "Infantry turret",
            vec![
                TowerTier::new(125, 8.0, 1.1, 16.0, 0.0, 28.0, Tint::new(0.2, 0.75, 0.9)),
                TowerTier::new(175, 9.5, 1.25, 22.0, 0.0, 32.0, Tint::new(0.15, 0.9, 0.65)),
            ],
            "Balanced fire rate and solid early-game coverage.",
        ),
        TowerDesign::new(
            "ART",
            "Artillery drone",
            vec![
                TowerTier::new(160, 10.0, 0.55, 36.0, 2.5, 20.0, Tint::new(0.95, 0.55, 0.25)),
                TowerTier::new(220, 11.5, 0.7, 48.0, 3.5, 24.0, Tint::new(1.0, 0.75, 0.3)),
            ],
            "Long-range splash that excels versus clustered or armored targets.",
        ),
    ]
}

/// The stock wave progression. Waves past the end are derived from the last entry.
pub fn default_wave_catalog() -> Vec<WaveDefinition> {
    vec![
        WaveDefinition::new(
            "Recon Patrol",
            EnemyArchetype::new(
                "Light scouts",
                60.0,
                3.2,
                6,
                1,
                0.75,
                Tint::new(0.85, 0.95, 1.0),
                false,
            ),
            10,
            0.85,
        ),
        WaveDefinition::new(
            "Skirmishers",
            EnemyArchetype::new(
                "Fast bikes",
                50.0,
                4.2,
                7,
                1,
                0.4,
                Tint::new(0.95, 0.65, 0.3),
                false,
            ),
            14,
            0.7,
        ),
        WaveDefinition::new(
            "Armored Push",
            EnemyArchetype::new("APC", 160.0, 2.6, 14, 2, 3.5, Tint::new(0.4, 0.7, 0.35), false),
            12,
            1.0,
        ),
        WaveDefinition::new(
            "Mixed Assault",
            EnemyArchetype::new(
                "Combined arms",
                120.0,
                3.2,
                12,
                2,
                2.2,
                Tint::new(0.8, 0.7, 0.95),
                false,
            ),
            16,
            0.8,
        ),
        WaveDefinition::new(
            "Boss Convoy",
            EnemyArchetype::new(
                "Siege tank",
                380.0,
                2.35,
                35,
                4,
                4.0,
                Tint::new(0.85, 0.15, 0.15),
                true,
            ),
            6,
            1.2,
        ),
    ]
}
