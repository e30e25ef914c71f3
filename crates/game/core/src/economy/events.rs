use crate::config::EventConfig;
use crate::env::{BlessingRecord, ContentOracle, GeneratorState};
use crate::state::EventKind;

const SHRINE_ATTEMPTS: usize = 50;

/// Event behind a grid `event` node: shrine 40, remove 30, gamble 20, treasure 10.
pub fn roll_event_kind(rng: &mut GeneratorState) -> EventKind {
    match rng.draw_int(1, 100) {
        0..=40 => EventKind::Shrine,
        41..=70 => EventKind::Remove,
        71..=90 => EventKind::Gamble,
        _ => EventKind::Treasure,
    }
}

/// Rolls up to `shrine_options` distinct, unowned blessings by rarity.
///
/// Gives up after a fixed number of attempts, so a small blessing table
/// yields fewer options rather than looping.
pub fn roll_shrine(
    rng: &mut GeneratorState,
    content: &dyn ContentOracle,
    events: &EventConfig,
    owned: &[BlessingRecord],
) -> Vec<BlessingRecord> {
    let weights = events.shrine_weights;
    let mut options: Vec<BlessingRecord> = Vec::with_capacity(events.shrine_options);

    for _ in 0..SHRINE_ATTEMPTS {
        if options.len() >= events.shrine_options {
            break;
        }
        let rarity = weights.pick(rng.draw_int(1, weights.total()));
        let pool = content.blessings_by_rarity(rarity);
        if pool.is_empty() {
            continue;
        }
        let candidate = &pool[rng.draw_index(pool.len())];
        let taken = owned
            .iter()
            .chain(&options)
            .any(|blessing| blessing.id == candidate.id);
        if !taken {
            options.push(candidate.clone());
        }
    }

    options
}
