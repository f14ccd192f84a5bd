//! Fundamental identifiers, geometry helpers and simulation time.
//!
//! The world is Y-up. "Planar" always means the X/Z ground plane.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Stable identifier of an enemy, unique for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnemyId(pub u32);

/// Stable identifier of a tower, unique for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TowerId(pub u32);

/// Stable identifier of a projectile, unique for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectileId(pub u32);

/// Index of a build spot in the session's spot list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpotId(pub usize);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks processed so far.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += f64::from(dt);
    }
}

/// Linear RGB display color in the 0..1 range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Tint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Tint {
    pub const WHITE: Tint = Tint::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Blend toward `other` by `t` (clamped to 0..1).
    pub fn lerp(self, other: Tint, t: f32) -> Tint {
        let t = t.clamp(0.0, 1.0);
        Tint {
            r: lerp(self.r, other.r, t),
            g: lerp(self.g, other.g, t),
            b: lerp(self.b, other.b, t),
        }
    }

    /// Multiply every channel by `factor`.
    pub fn scaled(self, factor: f32) -> Tint {
        Tint {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
        }
    }
}

/// Unclamped linear interpolation.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Squared distance on the X/Z plane, ignoring height.
pub fn planar_distance_squared(a: Vec3, b: Vec3) -> f32 {
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    dx * dx + dz * dz
}

/// Yaw (radians) that faces from `from` toward `to` on the X/Z plane.
/// Zero faces +Z, positive turns toward +X.
pub fn planar_heading(from: Vec3, to: Vec3) -> f32 {
    (to.x - from.x).atan2(to.z - from.z)
}

/// Unit forward vector for a planar heading.
pub fn heading_forward(heading: f32) -> Vec3 {
    Vec3::new(heading.sin(), 0.0, heading.cos())
}

/// Step from `current` toward `target` by at most `max_step`,
/// landing exactly on `target` instead of overshooting it.
pub fn move_towards(current: Vec3, target: Vec3, max_step: f32) -> Vec3 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_step || distance == 0.0 {
        return target;
    }
    current + delta / distance * max_step
}
