//! Session configuration.
//!
//! `SimConfig::default()` is the stock game. A host may instead load a JSON
//! document; any field it omits falls back to the stock value.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use rampart_core::catalog::{
    default_tower_catalog, default_wave_catalog, TowerDesign, WaveDefinition,
};
use rampart_core::constants::*;
use rampart_core::errors::ConfigError;

use crate::scenario;

/// Thresholds and multipliers a rebalance may touch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub waypoint_epsilon: f32,
    pub impact_epsilon: f32,
    pub splash_damage_factor: f32,
    pub min_splash_radius: f32,
    pub projectile_lifetime_secs: f32,
    pub projectile_aim_offset: f32,
    pub endless_factor_step: f32,
    pub enemy_ride_height: f32,
    pub tower_mount_height: f32,
    pub hit_tint_blend: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            waypoint_epsilon: WAYPOINT_ARRIVAL_EPSILON,
            impact_epsilon: PROJECTILE_IMPACT_EPSILON,
            splash_damage_factor: SPLASH_DAMAGE_FACTOR,
            min_splash_radius: MIN_SPLASH_RADIUS,
            projectile_lifetime_secs: PROJECTILE_LIFETIME_SECS,
            projectile_aim_offset: PROJECTILE_AIM_OFFSET,
            endless_factor_step: ENDLESS_FACTOR_STEP,
            enemy_ride_height: ENEMY_RIDE_HEIGHT,
            tower_mount_height: TOWER_MOUNT_HEIGHT,
            hit_tint_blend: HIT_TINT_BLEND,
        }
    }
}

/// Configuration for starting a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub starting_currency: u32,
    pub base_health: u32,
    /// Seconds between a wave clearing and the next one being allowed to start.
    pub wave_rest_secs: f64,
    /// Start the next wave automatically once the rest period is over.
    pub auto_advance_waves: bool,
    pub path: Vec<Vec3>,
    pub build_spots: Vec<Vec3>,
    pub tower_catalog: Vec<TowerDesign>,
    pub wave_catalog: Vec<WaveDefinition>,
    pub tuning: Tuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            starting_currency: STARTING_CURRENCY,
            base_health: STARTING_BASE_HEALTH,
            wave_rest_secs: WAVE_REST_SECS,
            auto_advance_waves: true,
            path: scenario::stock_path(),
            build_spots: scenario::stock_build_spots(),
            tower_catalog: default_tower_catalog(),
            wave_catalog: default_wave_catalog(),
            tuning: Tuning::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check everything the engine relies on without re-checking every tick.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path.is_empty() {
            return Err(ConfigError::EmptyPath);
        }
        if self.build_spots.is_empty() {
            return Err(ConfigError::NoBuildSpots);
        }
        if self.tower_catalog.is_empty() {
            return Err(ConfigError::EmptyTowerCatalog);
        }
        if self.wave_catalog.is_empty() {
            return Err(ConfigError::EmptyWaveCatalog);
        }

        check_number("wave_rest_secs", self.wave_rest_secs)?;
        if !self
            .path
            .iter()
            .chain(self.build_spots.iter())
            .all(|point| point.is_finite())
        {
            return Err(ConfigError::InvalidNumber {
                field: "path/build_spots".into(),
            });
        }

        for design in &self.tower_catalog {
            if design.tiers.is_empty() {
                return Err(ConfigError::DesignWithoutTiers(design.key.clone()));
            }
            for tier in &design.tiers {
                check_number(&format!("{}.range", design.key), tier.range.into())?;
                check_number(&format!("{}.fire_rate", design.key), tier.fire_rate.into())?;
                check_number(&format!("{}.damage", design.key), tier.damage.into())?;
                check_number(&format!("{}.splash_radius", design.key), tier.splash_radius.into())?;
                check_number(
                    &format!("{}.projectile_speed", design.key),
                    tier.projectile_speed.into(),
                )?;
            }
        }

        for wave in &self.wave_catalog {
            check_number(&format!("{}.spawn_interval", wave.name), wave.spawn_interval.into())?;
            check_number(&format!("{}.health", wave.name), wave.archetype.health.into())?;
            check_number(&format!("{}.speed", wave.name), wave.archetype.speed.into())?;
            check_number(&format!("{}.armor", wave.name), wave.archetype.armor.into())?;
        }

        let tuning = &self.tuning;
        // Arrival checks are strict, so a zero epsilon would never trigger.
        for (field, value) in [
            ("waypoint_epsilon", tuning.waypoint_epsilon),
            ("impact_epsilon", tuning.impact_epsilon),
            ("projectile_lifetime_secs", tuning.projectile_lifetime_secs),
        ] {
            check_positive(field, value.into())?;
        }
        for (field, value) in [
            ("splash_damage_factor", tuning.splash_damage_factor),
            ("min_splash_radius", tuning.min_splash_radius),
            ("projectile_aim_offset", tuning.projectile_aim_offset),
            ("endless_factor_step", tuning.endless_factor_step),
            ("enemy_ride_height", tuning.enemy_ride_height),
            ("tower_mount_height", tuning.tower_mount_height),
            ("hit_tint_blend", tuning.hit_tint_blend),
        ] {
            check_number(field, value.into())?;
        }

        Ok(())
    }
}

fn check_positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidNumber {
            field: field.to_string(),
        })
    }
}

fn check_number(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidNumber {
            field: field.to_string(),
        })
    }
}
