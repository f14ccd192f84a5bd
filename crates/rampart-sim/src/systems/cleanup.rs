//! Cleanup system: despawns entities retired during the tick.

use hecs::{Entity, World};

/// Despawn everything queued in the buffer. Entities already gone are skipped.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
