//! Ordered registry of enemies currently in play.
//!
//! Registration order is the iteration order, which decides targeting ties.
//! Systems that may retire enemies while walking the registry iterate over
//! a copy taken with [`EnemyRegistry::snapshot`].

use hecs::Entity;

use rampart_core::types::EnemyId;

#[derive(Debug, Clone, Default)]
pub struct EnemyRegistry {
    entries: Vec<(EnemyId, Entity)>,
}

impl EnemyRegistry {
    pub fn register(&mut self, id: EnemyId, entity: Entity) {
        debug_assert!(!self.contains(id), "enemy {id:?} registered twice");
        self.entries.push((id, entity));
    }

    /// Remove an enemy. Returns false if it was not registered, so calling
    /// this more than once for the same enemy is harmless.
    pub fn deregister(&mut self, id: EnemyId) -> bool {
        match self.entries.iter().position(|(entry, _)| *entry == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: EnemyId) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }

    pub fn entity(&self, id: EnemyId) -> Option<Entity> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == id)
            .map(|(_, entity)| *entity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EnemyId, Entity)> + '_ {
        self.entries.iter().copied()
    }

    /// Copy of the current entries, safe to walk while the registry shrinks.
    pub fn snapshot(&self) -> Vec<(EnemyId, Entity)> {
        self.entries.clone()
    }
}
