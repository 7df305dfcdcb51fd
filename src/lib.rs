//! Pet Arcade - minigame simulation core for a virtual pet
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, player)
//! - `input`: D-pad commands and the edge-triggered command latch
//! - `records`: Top-10 record book and score ledger
//! - `persistence`: Record stores (memory, JSON file, LocalStorage)
//! - `runner`: Timer harness driving a session from wall-clock time
//! - `settings`: Harness configuration
//! - `platform`: Browser/native differences (time, dates, web binding)

pub mod input;
pub mod persistence;
pub mod platform;
pub mod records;
pub mod runner;
pub mod settings;
pub mod sim;

pub use input::{Command, CommandLatch};
pub use persistence::{PersistenceError, RecordStore};
pub use records::{Record, RecordBook, ScoreLedger};
pub use runner::SessionRunner;
pub use settings::Settings;
pub use sim::{GameKind, GameState, tick};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (ms), 20 logical updates per second
    pub const TICK_MS: f32 = 50.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest host frame delta accepted at once (ms)
    pub const MAX_FRAME_DELTA_MS: f32 = 250.0;
    /// Sprite animation frame period (ms), cosmetic only
    pub const ANIM_FRAME_MS: f32 = 150.0;
    /// Fraction of full width trimmed from every hitbox, half per side
    pub const HITBOX_SHRINK: f32 = 0.2;
}
