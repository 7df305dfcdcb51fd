//! Player controller
//!
//! Applies directional commands, runs the jump timers and manages the size
//! buff. Jumps are fixed-height, fixed-duration hops; the flight countdown is
//! decremented by each step's `dt`.

use rand::Rng;
use rand_pcg::Pcg32;

use super::spawner::pick_factor;
use super::state::{Buff, GameEvent, Player, VerticalState};
use super::variant::{BuffConfig, VariantConfig};
use crate::input::Command;

/// Apply one command. `Start` is handled by the session, not here.
pub fn apply_command(
    player: &mut Player,
    command: Command,
    config: &VariantConfig,
) -> Option<GameEvent> {
    let step = config.player_step;
    match command {
        Command::Left => player.pos.x -= step,
        Command::Right => player.pos.x += step,
        Command::Up if config.free_vertical_movement => player.pos.y -= step,
        Command::Down if config.free_vertical_movement => player.pos.y += step,
        Command::Up => return try_jump(player, config),
        Command::Down | Command::Start => return None,
    }
    clamp_to_field(player, config);
    None
}

/// Start a hop if the player is plainly grounded
pub fn try_jump(player: &mut Player, config: &VariantConfig) -> Option<GameEvent> {
    let jump = config.jump?;
    if !player.vertical.can_jump() {
        return None;
    }
    player.vertical = VerticalState::Airborne {
        remaining_ms: jump.flight_ms,
    };
    Some(GameEvent::Jumped)
}

/// Count down flight and landing grace
pub fn update_jump(player: &mut Player, dt_ms: f32, config: &VariantConfig) -> Option<GameEvent> {
    match player.vertical {
        VerticalState::Grounded => None,
        VerticalState::Airborne { remaining_ms } => {
            let remaining_ms = remaining_ms - dt_ms;
            if remaining_ms > 0.0 {
                player.vertical = VerticalState::Airborne { remaining_ms };
                return None;
            }
            let grace_ms = config.jump.map_or(0.0, |j| j.grace_ms);
            player.vertical = if grace_ms > 0.0 {
                VerticalState::LandingGrace {
                    remaining_ms: grace_ms,
                }
            } else {
                VerticalState::Grounded
            };
            Some(GameEvent::Landed)
        }
        VerticalState::LandingGrace { remaining_ms } => {
            let remaining_ms = remaining_ms - dt_ms;
            player.vertical = if remaining_ms > 0.0 {
                VerticalState::LandingGrace { remaining_ms }
            } else {
                VerticalState::Grounded
            };
            None
        }
    }
}

/// Grant a random size buff unless one is already running
pub fn trigger_buff(
    player: &mut Player,
    rng: &mut Pcg32,
    buff: &BuffConfig,
    now_ms: f32,
    config: &VariantConfig,
) -> Option<GameEvent> {
    if player.buff_active() {
        return None;
    }
    let multiplier = pick_factor(rng, &buff.multipliers);
    let max = buff.max_duration_ms.max(buff.min_duration_ms);
    let duration_ms = rng.random_range(buff.min_duration_ms..=max);

    player.buff = Some(Buff {
        multiplier,
        expires_at_ms: now_ms + duration_ms,
    });
    clamp_to_field(player, config);
    log::debug!("buff x{} for {:.0} ms", multiplier, duration_ms);

    Some(GameEvent::BuffStarted {
        multiplier,
        duration_ms,
    })
}

/// Revert an expired buff
pub fn update_buff(player: &mut Player, now_ms: f32, config: &VariantConfig) -> Option<GameEvent> {
    let expired = player.buff.is_some_and(|b| now_ms >= b.expires_at_ms);
    if !expired {
        return None;
    }
    player.buff = None;
    clamp_to_field(player, config);
    Some(GameEvent::BuffEnded)
}

/// Keep the player inside the field at its current size.
///
/// Without free vertical movement the player stays on the ground line.
pub fn clamp_to_field(player: &mut Player, config: &VariantConfig) {
    let extent = player.extent();
    let max_x = (config.field.x - extent).max(0.0);
    let max_y = (config.field.y - extent).max(0.0);

    player.pos.x = player.pos.x.clamp(0.0, max_x);
    player.pos.y = if config.free_vertical_movement {
        player.pos.y.clamp(0.0, max_y)
    } else {
        max_y
    };
}
