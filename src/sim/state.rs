//! Session state and core simulation types
//!
//! A `GameState` is owned by exactly one running session and thrown away
//! when that session ends.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, hitbox};
use super::difficulty::Difficulty;
use super::spawner::SpawnTimers;
use super::variant::{GameKind, VariantConfig};

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Waiting for the start signal
    Ready,
    /// Active gameplay
    Running,
    /// Survived until the win threshold
    Won,
    /// Hit by a hazard
    Lost,
    /// Left before reaching an outcome
    Exited,
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionStatus::Won | SessionStatus::Lost | SessionStatus::Exited
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
}

/// Emitted once when a session reaches win or lose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub kind: GameKind,
    pub outcome: Outcome,
    pub final_score: u64,
    pub duration_ms: f32,
}

/// Hazards end the run, collectibles grant a buff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Hazard,
    Collectible,
}

/// A falling obstacle or pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Base edge length before `size_factor`
    pub size: f32,
    pub size_factor: f32,
}

impl Entity {
    /// Edge length after scaling
    #[inline]
    pub fn extent(&self) -> f32 {
        self.size * self.size_factor
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, Vec2::splat(self.extent()))
    }

    pub fn hitbox(&self) -> Aabb {
        hitbox(self.pos, Vec2::splat(self.extent()))
    }
}

/// Jump state machine: Grounded -> Airborne -> LandingGrace -> Grounded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VerticalState {
    Grounded,
    Airborne { remaining_ms: f32 },
    /// Just landed; hazards are still ignored
    LandingGrace { remaining_ms: f32 },
}

impl VerticalState {
    /// Hazard collisions are suppressed in this state
    pub fn is_protected(&self) -> bool {
        !matches!(self, VerticalState::Grounded)
    }

    /// Only plain Grounded accepts a jump
    pub fn can_jump(&self) -> bool {
        matches!(self, VerticalState::Grounded)
    }
}

/// Active size buff
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Buff {
    pub multiplier: f32,
    /// Session time at which the buff reverts
    pub expires_at_ms: f32,
}

/// The pet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the grounded footprint
    pub pos: Vec2,
    pub base_size: f32,
    pub vertical: VerticalState,
    pub buff: Option<Buff>,
    /// Visual hop height while airborne
    pub jump_height: f32,
}

impl Player {
    pub fn new(pos: Vec2, base_size: f32, jump_height: f32) -> Self {
        Self {
            pos,
            base_size,
            vertical: VerticalState::Grounded,
            buff: None,
            jump_height,
        }
    }

    /// Current size multiplier (1.0 without a buff)
    pub fn size_multiplier(&self) -> f32 {
        self.buff.map_or(1.0, |b| b.multiplier)
    }

    pub fn buff_active(&self) -> bool {
        self.buff.is_some()
    }

    #[inline]
    pub fn extent(&self) -> f32 {
        self.base_size * self.size_multiplier()
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, Vec2::splat(self.extent()))
    }

    pub fn hitbox(&self) -> Aabb {
        hitbox(self.pos, Vec2::splat(self.extent()))
    }

    /// Where to draw the sprite (lifted by the hop height while airborne)
    pub fn draw_pos(&self) -> Vec2 {
        match self.vertical {
            VerticalState::Airborne { .. } => self.pos - Vec2::new(0.0, self.jump_height),
            _ => self.pos,
        }
    }
}

/// Host-facing game events
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    Started,
    Spawned { id: u32, kind: EntityKind },
    Jumped,
    Landed,
    Collected { id: u32, total: u32 },
    BuffStarted { multiplier: f32, duration_ms: f32 },
    BuffEnded,
    Finished(SessionSummary),
}

/// What the host renders each frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub kind: GameKind,
    pub status: SessionStatus,
    pub entities: Vec<Entity>,
    pub player: Player,
    pub player_draw_pos: Vec2,
    pub score: u64,
    pub collected: u32,
    pub elapsed_ms: f32,
    pub difficulty: Difficulty,
    /// Cosmetic sprite frame counter
    pub anim_frame: u32,
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    pub kind: GameKind,
    pub config: VariantConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub status: SessionStatus,
    /// Session time (ms), advanced only while running
    pub elapsed_ms: f32,
    pub player: Player,
    /// Live entities (sorted by id)
    pub entities: Vec<Entity>,
    /// Collectibles picked up this session
    pub collected: u32,
    pub spawner: SpawnTimers,
    /// Set once on win or lose
    pub summary: Option<SessionSummary>,
    next_id: u32,
}

impl GameState {
    /// New session with the kind's default tuning
    pub fn new(kind: GameKind, seed: u64) -> Self {
        Self::with_config(kind, kind.config(), seed)
    }

    pub fn with_config(kind: GameKind, config: VariantConfig, seed: u64) -> Self {
        let player_pos = Vec2::new(
            (config.field.x - config.player_size) / 2.0,
            config.field.y - config.player_size,
        );
        let jump_height = config.jump.map_or(0.0, |j| j.height);
        let spawner = SpawnTimers::new(&config);

        Self {
            kind,
            player: Player::new(player_pos, config.player_size, jump_height),
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            status: SessionStatus::Ready,
            elapsed_ms: 0.0,
            entities: Vec::new(),
            collected: 0,
            spawner,
            summary: None,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Running score, derived from elapsed time and pickups
    pub fn score(&self) -> u64 {
        self.config.score.score(self.elapsed_ms, self.collected)
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty.at(self.elapsed_ms)
    }

    /// Leave the session without an outcome
    pub fn exit(&mut self) {
        if !self.status.is_terminal() {
            log::info!("{} session exited at {:.0} ms", self.kind.as_str(), self.elapsed_ms);
            self.status = SessionStatus::Exited;
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            kind: self.kind,
            status: self.status,
            entities: self.entities.clone(),
            player: self.player.clone(),
            player_draw_pos: self.player.draw_pos(),
            score: self.score(),
            collected: self.collected,
            elapsed_ms: self.elapsed_ms,
            difficulty: self.difficulty(),
            anim_frame: 0,
        }
    }

    /// Keep entities sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.entities.sort_by_key(|e| e.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_ready_and_centered() {
        let state = GameState::new(GameKind::BallDodge, 42);
        assert_eq!(state.status, SessionStatus::Ready);
        assert_eq!(state.score(), 0);
        let field = state.config.field;
        let b = state.player.hitbox();
        assert!((b.left + b.right - field.x).abs() < 1e-3);
        assert_eq!(b.bottom, field.y);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(GameKind::MeteorShower, 1);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_exit_is_terminal_once() {
        let mut state = GameState::new(GameKind::BallDodge, 1);
        state.exit();
        assert_eq!(state.status, SessionStatus::Exited);
        state.status = SessionStatus::Lost;
        state.exit();
        assert_eq!(state.status, SessionStatus::Lost);
    }

    #[test]
    fn test_draw_pos_lifts_while_airborne() {
        let mut player = Player::new(Vec2::new(10.0, 100.0), 40.0, 30.0);
        assert_eq!(player.draw_pos(), Vec2::new(10.0, 100.0));
        player.vertical = VerticalState::Airborne { remaining_ms: 5.0 };
        assert_eq!(player.draw_pos(), Vec2::new(10.0, 70.0));
    }
}
