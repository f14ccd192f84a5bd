//! Fixed map model: the enemy path and the build spots beside it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::{SpotId, TowerId};

/// Ordered polyline that every enemy follows from spawn to base.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    waypoints: Vec<Vec3>,
}

impl Path {
    pub fn new(waypoints: Vec<Vec3>) -> Self {
        Self { waypoints }
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn waypoint(&self, index: usize) -> Option<Vec3> {
        self.waypoints.get(index).copied()
    }

    /// Where enemies enter the map.
    pub fn start(&self) -> Option<Vec3> {
        self.waypoints.first().copied()
    }

    /// The defended base at the end of the path.
    pub fn end(&self) -> Option<Vec3> {
        self.waypoints.last().copied()
    }

    /// Waypoint index a freshly spawned enemy heads for.
    pub fn first_target_index(&self) -> usize {
        1.min(self.waypoints.len().saturating_sub(1))
    }
}

/// A fixed placement slot that holds at most one tower, never replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildSpot {
    pub id: SpotId,
    pub position: Vec3,
    tower: Option<TowerId>,
}

impl BuildSpot {
    pub fn new(id: SpotId, position: Vec3) -> Self {
        Self {
            id,
            position,
            tower: None,
        }
    }

    pub fn has_tower(&self) -> bool {
        self.tower.is_some()
    }

    pub fn tower(&self) -> Option<TowerId> {
        self.tower
    }

    /// Claim this spot for `tower`. Returns false if the spot is already taken.
    pub fn attach_tower(&mut self, tower: TowerId) -> bool {
        if self.tower.is_some() {
            return false;
        }
        self.tower = Some(tower);
        true
    }
}
