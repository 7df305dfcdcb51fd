//! Entity spawner
//!
//! Two independent accumulators: hazards on the difficulty curve's interval,
//! collectibles on a fixed longer one. New entities appear just above the
//! field with a uniform lateral offset and a size factor drawn from the
//! variant's discrete set.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::clock::IntervalTimer;
use super::state::{Entity, EntityKind, GameEvent, GameState, SessionStatus};
use super::variant::VariantConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnTimers {
    pub hazard: IntervalTimer,
    pub collectible: Option<IntervalTimer>,
}

impl SpawnTimers {
    pub fn new(config: &VariantConfig) -> Self {
        Self {
            hazard: IntervalTimer::new(config.difficulty.base_spawn_interval_ms),
            collectible: config
                .collectible
                .as_ref()
                .map(|c| IntervalTimer::new(c.interval_ms)),
        }
    }

    pub fn cancel(&mut self) {
        self.hazard.cancel();
        if let Some(timer) = self.collectible.as_mut() {
            timer.cancel();
        }
    }
}

/// Pick one value from a discrete set (1.0 for an empty set)
pub fn pick_factor(rng: &mut Pcg32, factors: &[f32]) -> f32 {
    if factors.is_empty() {
        return 1.0;
    }
    factors[rng.random_range(0..factors.len())]
}

/// Advance both spawn timers by `dt_ms` and enqueue whatever is due.
///
/// Does nothing unless the session is running.
pub fn spawn_due(state: &mut GameState, dt_ms: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.status != SessionStatus::Running {
        return events;
    }

    // One entity per elapsed interval, so a long step never drops spawns
    let interval = state.config.difficulty.spawn_interval_ms(state.elapsed_ms);
    state.spawner.hazard.set_period(interval);
    let hazards_due = state.spawner.hazard.advance(dt_ms, u32::MAX);
    for _ in 0..hazards_due {
        events.push(spawn_entity(state, EntityKind::Hazard));
    }

    let collectibles_due = state
        .spawner
        .collectible
        .as_mut()
        .map_or(0, |timer| timer.advance(dt_ms, u32::MAX));
    for _ in 0..collectibles_due {
        events.push(spawn_entity(state, EntityKind::Collectible));
    }

    events
}

/// Create one entity at the entry edge and add it to the live set
pub fn spawn_entity(state: &mut GameState, kind: EntityKind) -> GameEvent {
    let (size, factors) = match (kind, state.config.collectible.as_ref()) {
        (EntityKind::Collectible, Some(c)) => (c.size, c.size_factors.clone()),
        _ => (
            state.config.hazard_size,
            state.config.hazard_size_factors.clone(),
        ),
    };

    let size_factor = pick_factor(&mut state.rng, &factors);
    let extent = size * size_factor;
    let max_x = (state.config.field.x - extent).max(0.0);
    let x = state.rng.random_range(0.0..=max_x);

    let id = state.next_entity_id();
    state.entities.push(Entity {
        id,
        kind,
        pos: Vec2::new(x, -extent),
        size,
        size_factor,
    });
    log::trace!("spawned {:?} #{} at x={:.1} (x{})", kind, id, x, size_factor);

    GameEvent::Spawned { id, kind }
}
