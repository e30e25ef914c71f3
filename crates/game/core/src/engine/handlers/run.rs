//! Run start and grid-node entry.

use tracing::info;

use crate::config::MapMode;
use crate::economy::{roll_blessing_pair, roll_event_kind};
use crate::env::GeneratorState;
use crate::map::{GridMap, NodeKind, PagesMap, Progression};
use crate::state::{EventKind, Loadout, Phase, PlayerState, RunState, ShopKind, StarterChoice};

use super::super::errors::{HandlerResult, Rejection};
use super::super::Ctx;
use super::{at, combat, events, shop};

/// Replaces the whole run. The generator is re-seeded from `seed`, so the
/// incoming generator state has no influence on the new run.
pub(super) fn new_run(cx: &mut Ctx<'_, '_>, seed: &str) -> HandlerResult {
    let content = cx.env.content();
    let config = cx.env.config();
    let run = &config.run;
    *cx.rng = GeneratorState::seed(seed);

    let progression = match run.map_mode {
        MapMode::Grid => Progression::Grid(GridMap::generate(cx.rng, run.map_columns)),
        MapMode::Pages => Progression::Pages(PagesMap::new(&config.pages)),
    };
    let options = roll_blessing_pair(cx.rng, content, &[]);

    let mut state = RunState {
        seed: seed.to_owned(),
        phase: Phase::Starter,
        act: 1,
        player: PlayerState::new(run.start_hp, run.start_energy, run.hand_size, run.start_gold),
        master_deck: content.starter_deck().to_vec(),
        loadout: Loadout::new(run.equipment_slots),
        starter: Some(StarterChoice { options }),
        progression: Some(progression),
        ..RunState::default()
    };
    state.log(format!("New run: {seed} ({} map)", run.map_mode));
    info!(target: "core::engine", seed, mode = %run.map_mode, "new run");

    *cx.state = state;
    Ok(())
}

pub(super) fn choose_starter_blessing(cx: &mut Ctx<'_, '_>, index: usize) -> HandlerResult {
    let Some(choice) = cx.state.starter.as_ref() else {
        return Err(Rejection::StarterChosen.into());
    };
    let blessing = at(&choice.options, index, "Starter blessing")?.clone();

    let state = &mut *cx.state;
    state.log(format!("Starter blessing: {}", blessing.name));
    state.blessings.push(blessing);
    state.starter = None;
    state.phase = Phase::Map;
    Ok(())
}

pub(super) fn enter_node(cx: &mut Ctx<'_, '_>, node_id: &str) -> HandlerResult {
    let kind = cx
        .state
        .progression
        .as_mut()
        .and_then(Progression::grid_mut)
        .and_then(|grid| grid.enter(node_id))
        .ok_or_else(|| Rejection::NodeUnavailable(node_id.to_owned()))?;
    cx.state.log(format!("Entered {node_id} ({kind})"));

    match (kind, kind.combat_tier()) {
        (_, Some(tier)) => return combat::begin_combat(cx, tier),
        (NodeKind::Shop, None) => shop::open_shop(cx, ShopKind::Card),
        (NodeKind::Bonfire, None) => events::open_event(cx, EventKind::Bonfire),
        (_, None) => {
            let kind = roll_event_kind(cx.rng);
            events::open_event(cx, kind);
        }
    }
    Ok(())
}
