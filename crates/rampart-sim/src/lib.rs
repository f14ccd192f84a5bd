//! Simulation engine for RAMPART.
//!
//! Owns the hecs ECS world, runs the per-tick systems in a fixed order and
//! produces GameStateSnapshots for the host.

pub mod config;
pub mod economy;
pub mod engine;
pub mod registry;
pub mod scenario;
pub mod systems;
pub mod world_setup;

pub use config::{SimConfig, Tuning};
pub use engine::SimulationEngine;
pub use rampart_core as core;

#[cfg(test)]
mod tests;
