//! Game variants
//!
//! Both minigames run on the same engine. Everything that differs between
//! them (entity taxonomy, whether jumping escapes hazards, win condition,
//! score formula, tuning numbers) lives in a `VariantConfig`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyCurve;

/// Which minigame a session is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameKind {
    /// Balls and bones drop toward the pet; jump over balls, grab bones
    BallDodge,
    /// Meteors fall; survive until the timer runs out
    MeteorShower,
}

impl GameKind {
    pub const ALL: [GameKind; 2] = [GameKind::BallDodge, GameKind::MeteorShower];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::BallDodge => "ball_dodge",
            GameKind::MeteorShower => "meteor_shower",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ball_dodge" | "ball" | "balldodge" => Some(GameKind::BallDodge),
            "meteor_shower" | "meteor" | "meteorshower" => Some(GameKind::MeteorShower),
            _ => None,
        }
    }

    /// Key of this game's record collection
    pub fn storage_key(&self) -> String {
        format!("pet_arcade_records_{}", self.as_str())
    }

    /// Tuning preset for this game
    pub fn config(&self) -> VariantConfig {
        match self {
            GameKind::BallDodge => VariantConfig::ball_dodge(),
            GameKind::MeteorShower => VariantConfig::meteor_shower(),
        }
    }
}

/// Fixed-duration hop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpConfig {
    /// Time spent airborne (ms)
    pub flight_ms: f32,
    /// Post-landing window in which hazards are ignored (ms)
    pub grace_ms: f32,
    /// Visual hop height (field units)
    pub height: f32,
}

/// Temporary size change granted by a collectible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuffConfig {
    /// Candidate size multipliers (one picked uniformly)
    pub multipliers: Vec<f32>,
    pub min_duration_ms: f32,
    pub max_duration_ms: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectibleConfig {
    /// Base sprite/hitbox edge length
    pub size: f32,
    /// Fixed spawn interval (ms)
    pub interval_ms: f32,
    pub size_factors: Vec<f32>,
    pub buff: BuffConfig,
}

/// How a session can be won
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WinCondition {
    /// Runs until the player is hit
    Endless,
    /// Won once elapsed time reaches the threshold
    SurviveFor { ms: f32 },
}

/// `floor(elapsed seconds) * per_second + collected * per_collectible`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRule {
    pub per_second: u64,
    pub per_collectible: u64,
}

impl ScoreRule {
    pub fn score(&self, elapsed_ms: f32, collected: u32) -> u64 {
        let seconds = (elapsed_ms.max(0.0) / 1000.0).floor() as u64;
        seconds * self.per_second + collected as u64 * self.per_collectible
    }
}

/// Full parameter set for one minigame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantConfig {
    /// Play field size (x = width, y = height); entities fall along +y
    pub field: Vec2,
    /// Player base edge length
    pub player_size: f32,
    /// Distance moved per directional command
    pub player_step: f32,
    /// Up/Down move the player instead of jumping
    pub free_vertical_movement: bool,
    /// Jumping escapes hazards when present
    pub jump: Option<JumpConfig>,
    pub hazard_size: f32,
    pub hazard_size_factors: Vec<f32>,
    pub collectible: Option<CollectibleConfig>,
    pub difficulty: DifficultyCurve,
    pub win: WinCondition,
    pub score: ScoreRule,
}

impl VariantConfig {
    pub fn ball_dodge() -> Self {
        Self {
            field: Vec2::new(360.0, 480.0),
            player_size: 48.0,
            player_step: 24.0,
            free_vertical_movement: false,
            jump: Some(JumpConfig {
                flight_ms: 600.0,
                grace_ms: 200.0,
                height: 56.0,
            }),
            hazard_size: 32.0,
            hazard_size_factors: vec![0.8, 1.0, 1.2],
            collectible: Some(CollectibleConfig {
                size: 28.0,
                interval_ms: 5_000.0,
                size_factors: vec![1.0],
                buff: BuffConfig {
                    multipliers: vec![0.6, 1.5],
                    min_duration_ms: 5_000.0,
                    max_duration_ms: 8_000.0,
                },
            }),
            difficulty: DifficultyCurve {
                base_speed: 4.0,
                speed_increment: 1.0,
                max_speed: 12.0,
                base_spawn_interval_ms: 800.0,
                spawn_decrement_ms: 50.0,
                min_spawn_interval_ms: 350.0,
                step_interval_ms: 10_000.0,
            },
            win: WinCondition::Endless,
            score: ScoreRule {
                per_second: 1,
                per_collectible: 20,
            },
        }
    }

    pub fn meteor_shower() -> Self {
        Self {
            field: Vec2::new(360.0, 480.0),
            player_size: 40.0,
            player_step: 24.0,
            free_vertical_movement: true,
            jump: None,
            hazard_size: 36.0,
            hazard_size_factors: vec![0.8, 1.0, 1.2],
            collectible: None,
            difficulty: DifficultyCurve {
                base_speed: 4.0,
                speed_increment: 1.0,
                max_speed: 14.0,
                base_spawn_interval_ms: 800.0,
                spawn_decrement_ms: 75.0,
                min_spawn_interval_ms: 250.0,
                step_interval_ms: 10_000.0,
            },
            win: WinCondition::SurviveFor { ms: 60_000.0 },
            score: ScoreRule {
                per_second: 1,
                per_collectible: 0,
            },
        }
    }

    /// Whether jumping is a hazard escape in this variant
    pub fn jump_escape(&self) -> bool {
        self.jump.is_some()
    }
}
