//! Collision detection for falling entities
//!
//! Axis-aligned boxes only. Both the player and entity boxes are trimmed
//! horizontally before testing so thin sprite art never loses to an
//! invisible corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Entity, EntityKind, Player};
use crate::consts::HITBOX_SHRINK;

/// Axis-aligned bounding box (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Aabb {
    /// Box with top-left corner at `pos`
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            left: pos.x,
            right: pos.x + size.x,
            top: pos.y,
            bottom: pos.y + size.y,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Trim `fraction` of the full width, half from each side
    pub fn shrink_horizontal(self, fraction: f32) -> Self {
        let trim = self.width() * fraction / 2.0;
        Self {
            left: self.left + trim,
            right: self.right - trim,
            ..self
        }
    }

    /// Strict open-interval overlap; shared edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }
}

/// Collision box used for gameplay (horizontally shrunk)
pub fn hitbox(pos: Vec2, size: Vec2) -> Aabb {
    Aabb::from_pos_size(pos, size).shrink_horizontal(HITBOX_SHRINK)
}

/// What a single player/entity overlap means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Hazard hit while vulnerable: ends the session, hazard consumed
    HazardHit { id: u32 },
    /// Hazard overlapped while airborne or in landing grace: keeps falling
    HazardEvaded { id: u32 },
    /// Collectible touched: always consumed
    Collected { id: u32 },
}

/// Classify every overlap between the player and the live entities.
///
/// `jump_escape` enables the airborne/grace immunity; without it every
/// hazard overlap is a hit.
pub fn detect(player: &Player, entities: &[Entity], jump_escape: bool) -> Vec<Contact> {
    let player_box = player.hitbox();
    let evading = jump_escape && player.vertical.is_protected();

    entities
        .iter()
        .filter(|e| player_box.overlaps(&e.hitbox()))
        .map(|e| match e.kind {
            EntityKind::Hazard if evading => Contact::HazardEvaded { id: e.id },
            EntityKind::Hazard => Contact::HazardHit { id: e.id },
            EntityKind::Collectible => Contact::Collected { id: e.id },
        })
        .collect()
}
