//! Per-tick systems that operate on the simulation world.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only
//! work). Within a tick they run in a fixed order: wave scheduler, enemy
//! movement, towers, projectiles, then snapshot and cleanup.

pub mod cleanup;
pub mod damage;
pub mod movement;
pub mod projectiles;
pub mod snapshot;
pub mod towers;
pub mod wave_scheduler;
