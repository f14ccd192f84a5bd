//! Simulation constants and tuning parameters.
//!
//! These are the stock values. Thresholds that a rebalance might touch are
//! copied into the session's tuning block at startup, so the engine reads
//! them from config rather than from here.

// --- Economy ---

/// Currency available at session start.
pub const STARTING_CURRENCY: u32 = 260;

/// Base health at session start. Reaching zero ends the session.
pub const STARTING_BASE_HEALTH: u32 = 20;

// --- Waves ---

/// Seconds that must pass after a wave clears before the next may start.
pub const WAVE_REST_SECS: f64 = 6.0;

/// Endless waves grow by this much scaling factor per wave past the catalog.
pub const ENDLESS_FACTOR_STEP: f32 = 0.35;

/// Scaled waves never spawn faster than this (seconds between enemies).
pub const MIN_SPAWN_INTERVAL_SECS: f32 = 0.35;

/// Share of the scaling factor applied to wave enemy counts.
pub const WAVE_COUNT_SCALE_BLEND: f32 = 0.75;

/// Share of the inverse scaling factor applied to spawn intervals.
pub const WAVE_INTERVAL_SCALE_BLEND: f32 = 0.35;

// --- Archetype scaling ---

/// Maximum speed bonus reached once the scaling factor is 2 or more.
pub const SCALED_SPEED_BONUS: f32 = 0.15;

/// Share of the scaling factor applied to base damage.
pub const SCALED_BASE_DAMAGE_BLEND: f32 = 0.6;

/// Armor gained per unit of scaling factor above 1.
pub const SCALED_ARMOR_PER_FACTOR: f32 = 0.5;

// --- Enemies ---

/// Distance at which an enemy counts as having reached its waypoint.
pub const WAYPOINT_ARRIVAL_EPSILON: f32 = 0.05;

/// Height above the path at which enemies travel.
pub const ENEMY_RIDE_HEIGHT: f32 = 0.5;

/// Armor can never reduce a hit below this.
pub const MIN_EFFECTIVE_DAMAGE: f32 = 1.0;

/// How far an enemy's tint blends toward white on every hit.
pub const HIT_TINT_BLEND: f32 = 0.1;

/// Display scale of boss enemies.
pub const BOSS_SCALE: f32 = 1.25;

/// Display scale of regular enemies.
pub const ENEMY_SCALE: f32 = 0.8;

// --- Towers ---

/// Height of a tower body above its build spot.
pub const TOWER_MOUNT_HEIGHT: f32 = 0.4;

/// Height of the muzzle above the tower body.
pub const MUZZLE_HEIGHT: f32 = 0.9;

/// Distance of the muzzle ahead of the turret pivot.
pub const MUZZLE_REACH: f32 = 0.5;

/// Fire rates are clamped to at least this many shots per second.
pub const MIN_FIRE_RATE: f32 = 0.01;

/// Display scale gained per tier.
pub const TOWER_SCALE_PER_TIER: f32 = 0.05;

// --- Projectiles ---

/// Seconds a projectile may fly before it silently expires.
pub const PROJECTILE_LIFETIME_SECS: f32 = 5.0;

/// Distance to the aim point at which a projectile impacts.
pub const PROJECTILE_IMPACT_EPSILON: f32 = 0.15;

/// Height above the target's position that projectiles aim for.
pub const PROJECTILE_AIM_OFFSET: f32 = 0.2;

/// Fraction of a projectile's damage dealt to bystanders in the splash.
pub const SPLASH_DAMAGE_FACTOR: f32 = 0.65;

/// Splash radii at or below this are treated as single-target.
pub const MIN_SPLASH_RADIUS: f32 = 0.01;
