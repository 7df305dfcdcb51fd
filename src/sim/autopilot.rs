//! Idle/demo mode - picks a command for the current tick
//!
//! Deterministic and read-only: it only looks at the state and suggests one
//! command. The host decides whether to feed it back in.

use super::state::{Entity, EntityKind, GameState, SessionStatus};
use crate::consts::TICK_MS;
use crate::input::Command;

/// How far ahead (ms) a hazard counts as a threat
const LOOKAHEAD_MS: f32 = 700.0;

/// Suggest a command for a host stepping at the default tick period
pub fn suggest(state: &GameState) -> Option<Command> {
    suggest_for_step(state, TICK_MS)
}

/// Suggest a command for a host that calls back every `step_ms`.
///
/// Longer steps widen the threat horizon and the jump window.
pub fn suggest_for_step(state: &GameState, step_ms: f32) -> Option<Command> {
    match state.status {
        SessionStatus::Ready => return Some(Command::Start),
        SessionStatus::Running => {}
        _ => return None,
    }

    let player = state.player.hitbox();
    let speed = state.config.difficulty.speed(state.elapsed_ms);
    let horizon = speed * LOOKAHEAD_MS.max(3.0 * step_ms) / TICK_MS;
    let step = state.config.player_step;

    // Closest hazard falling into our column
    let threat = state
        .entities
        .iter()
        .filter(|e| e.kind == EntityKind::Hazard)
        .filter(|e| {
            let b = e.hitbox();
            b.right > player.left - step / 2.0
                && b.left < player.right + step / 2.0
                && b.bottom <= player.bottom
                && player.top - b.bottom < horizon
        })
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    if let Some(threat) = threat {
        return Some(evade(state, threat, step_ms));
    }

    // Nothing incoming: wander toward a pickup
    let center = (player.left + player.right) / 2.0;
    state
        .entities
        .iter()
        .filter(|e| e.kind == EntityKind::Collectible)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .and_then(|bone| {
            let b = bone.hitbox();
            let target = (b.left + b.right) / 2.0;
            if (target - center).abs() <= step / 2.0 {
                None
            } else if target < center {
                Some(Command::Left)
            } else {
                Some(Command::Right)
            }
        })
}

fn evade(state: &GameState, threat: &Entity, step_ms: f32) -> Command {
    let player = state.player.hitbox();
    let threat_box = threat.hitbox();

    // Jump when the hazard is about to land on us
    if let Some(jump) = state.config.jump {
        // Speed is in field units per nominal tick
        let speed = state.config.difficulty.speed(state.elapsed_ms);
        let ms_to_contact = (player.top - threat_box.bottom) / speed.max(0.1) * TICK_MS;
        let window_ms = (jump.flight_ms / 3.0).max(step_ms);
        if ms_to_contact < window_ms && state.player.vertical.can_jump() {
            return Command::Up;
        }
    }

    let field_width = state.config.field.x;
    let threat_center = (threat_box.left + threat_box.right) / 2.0;
    let center = (player.left + player.right) / 2.0;
    let at_left = state.player.pos.x <= 0.0;
    let at_right = state.player.pos.x + state.player.extent() >= field_width;

    if (threat_center >= center && !at_left) || at_right {
        Command::Left
    } else {
        Command::Right
    }
}
