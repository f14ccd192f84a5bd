//! Core types and definitions for the RAMPART tower-defense simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! ids, components, the static catalog, commands, events, errors,
//! state snapshots and tuning constants. It has no dependency on the
//! ECS or on any presentation framework.

pub mod catalog;
pub mod commands;
pub mod components;
pub mod constants;
pub mod errors;
pub mod events;
pub mod map;
pub mod state;
pub mod types;

pub use glam::Vec3;
