//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only arrives as `dt` arguments
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, storage or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod movement;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod variant;

pub use clock::{IntervalTimer, TickClock};
pub use collision::{Aabb, Contact, detect};
pub use difficulty::{Difficulty, DifficultyCurve};
pub use state::{
    Buff, Entity, EntityKind, GameEvent, GameState, Outcome, Player, SessionStatus,
    SessionSummary, SessionView, VerticalState,
};
pub use tick::{TickInput, tick};
pub use variant::{GameKind, VariantConfig, WinCondition};
