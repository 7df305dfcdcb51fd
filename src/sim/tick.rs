//! Fixed timestep simulation tick
//!
//! Advances one session by one step. Pure given the state, input and `dt`:
//! no clocks, no I/O, randomness only from the session's seeded RNG.

use super::collision::{self, Contact};
use super::movement;
use super::player;
use super::spawner;
use super::state::{GameEvent, GameState, Outcome, SessionStatus, SessionSummary};
use super::variant::WinCondition;
use crate::input::Command;

/// Input for a single tick (at most one command)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub command: Option<Command>,
}

impl TickInput {
    pub fn command(command: Command) -> Self {
        Self {
            command: Some(command),
        }
    }
}

/// Advance the session by `dt` milliseconds and report what happened
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.status {
        SessionStatus::Ready => {
            if input.command == Some(Command::Start) {
                state.status = SessionStatus::Running;
                log::info!("{} session started (seed {})", state.kind.as_str(), state.seed);
                events.push(GameEvent::Started);
            }
            return events;
        }
        SessionStatus::Running => {}
        _ => return events,
    }

    // Player input
    if let Some(command) = input.command {
        events.extend(player::apply_command(&mut state.player, command, &state.config));
    }

    state.elapsed_ms += dt;

    // Player timers
    events.extend(player::update_jump(&mut state.player, dt, &state.config));
    events.extend(player::update_buff(
        &mut state.player,
        state.elapsed_ms,
        &state.config,
    ));

    // Survival threshold wins regardless of what is on screen
    if let WinCondition::SurviveFor { ms } = state.config.win {
        if state.elapsed_ms >= ms {
            finish(state, Outcome::Win, &mut events);
            return events;
        }
    }

    events.extend(spawner::spawn_due(state, dt));

    let speed = state.config.difficulty.speed(state.elapsed_ms);
    movement::advance(&mut state.entities, speed, dt);
    movement::cull(&mut state.entities, state.config.field.y);

    let contacts = collision::detect(
        &state.player,
        &state.entities,
        state.config.jump_escape(),
    );
    resolve_contacts(state, &contacts, &mut events);

    state.normalize_order();
    events
}

/// Apply collision outcomes: consume touched entities, count pickups, end on a hit
fn resolve_contacts(state: &mut GameState, contacts: &[Contact], events: &mut Vec<GameEvent>) {
    if contacts.is_empty() {
        return;
    }

    let mut hit = false;
    let mut consumed = Vec::new();

    for contact in contacts {
        match *contact {
            Contact::HazardHit { id } => {
                hit = true;
                consumed.push(id);
            }
            Contact::HazardEvaded { .. } => {}
            Contact::Collected { id } => {
                consumed.push(id);
                state.collected += 1;
                events.push(GameEvent::Collected {
                    id,
                    total: state.collected,
                });
                if let Some(collectible) = state.config.collectible.as_ref() {
                    events.extend(player::trigger_buff(
                        &mut state.player,
                        &mut state.rng,
                        &collectible.buff,
                        state.elapsed_ms,
                        &state.config,
                    ));
                }
            }
        }
    }

    state.entities.retain(|e| !consumed.contains(&e.id));

    if hit {
        finish(state, Outcome::Lose, events);
    }
}

/// Move to the terminal state and emit the summary (once)
fn finish(state: &mut GameState, outcome: Outcome, events: &mut Vec<GameEvent>) {
    if state.status.is_terminal() {
        return;
    }
    state.status = match outcome {
        Outcome::Win => SessionStatus::Won,
        Outcome::Lose => SessionStatus::Lost,
    };
    state.spawner.cancel();

    let summary = SessionSummary {
        kind: state.kind,
        outcome,
        final_score: state.score(),
        duration_ms: state.elapsed_ms,
    };
    log::info!(
        "{} session over: {:?}, score {} after {:.1}s",
        state.kind.as_str(),
        outcome,
        summary.final_score,
        summary.duration_ms / 1000.0
    );
    state.summary = Some(summary.clone());
    events.push(GameEvent::Finished(summary));
}
