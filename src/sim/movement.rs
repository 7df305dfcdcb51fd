//! Movement and lifecycle
//!
//! The only writer of entity position after spawn.

use super::state::Entity;
use crate::consts::TICK_MS;

/// Move every entity along +y by `speed` units per nominal tick, scaled by `dt_ms`.
pub fn advance(entities: &mut [Entity], speed: f32, dt_ms: f32) {
    let step = speed * dt_ms / TICK_MS;
    for entity in entities.iter_mut() {
        entity.pos.y += step;
    }
}

/// Drop entities that have fully left the field through the bottom edge.
///
/// Returns how many were removed.
pub fn cull(entities: &mut Vec<Entity>, field_height: f32) -> usize {
    let before = entities.len();
    entities.retain(|e| e.pos.y < field_height);
    before - entities.len()
}
