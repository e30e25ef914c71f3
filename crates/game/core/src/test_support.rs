//! Shared fixtures for unit tests: a small content pack and two canned runs.

use crate::config::GameConfig;
use crate::env::{
    BlessingRecord, CardKind, CardRecord, ContentOracle, ContentPack, ContentSnapshot, Effect,
    EnemyRecord, EquipmentRecord, GeneratorState, HookSpec, Rarity, Tier, Trigger,
};
use crate::map::{GridMap, Progression};
use crate::state::{CardInstance, Loadout, Phase, Piles, PlayerState, RunState};

fn card(id: &str, name: &str, kind: CardKind, cost: u32) -> CardRecord {
    CardRecord::new(id, name, kind, cost)
}

fn strike() -> CardRecord {
    let mut card = card("strike", "Strike", CardKind::Attack, 1);
    card.damage = Some(6);
    card.tags.push("attack".into());
    card.starter = true;
    card
}

fn defend() -> CardRecord {
    let mut card = card("defend", "Defend", CardKind::Skill, 1);
    card.block = Some(5);
    card.starter = true;
    card
}

fn reward_cards() -> Vec<CardRecord> {
    let mut bash = card("bash", "Bash", CardKind::Attack, 2);
    bash.damage = Some(10);
    bash.tags.push("attack".into());

    let mut quick = card("quick_slash", "Quick Slash", CardKind::Attack, 1);
    quick.damage = Some(4);
    quick.draw = Some(1);
    quick.favored_in_shop = true;

    let mut guard = card("iron_guard", "Iron Guard", CardKind::Skill, 1);
    guard.block = Some(8);

    let mut focus = card("focus", "Focus", CardKind::Skill, 0);
    focus.energy_gain = Some(1);
    focus.exhaust = true;
    focus.rarity = Some(Rarity::Uncommon);

    let mut mend = card("mend", "Mend", CardKind::Skill, 1);
    mend.heal = Some(6);
    mend.exhaust = true;
    mend.rarity = Some(Rarity::Uncommon);

    let mut cleave = card("cleave", "Cleave", CardKind::Attack, 2);
    cleave.damage = Some(12);
    cleave.rarity = Some(Rarity::Uncommon);
    cleave.favored_in_shop = true;

    let mut meteor = card("meteor", "Meteor", CardKind::Attack, 3);
    meteor.damage = Some(24);
    meteor.rarity = Some(Rarity::Rare);

    let mut bulwark = card("bulwark", "Bulwark", CardKind::Skill, 2);
    bulwark.block = Some(16);
    bulwark.draw = Some(1);
    bulwark.rarity = Some(Rarity::Rare);

    vec![bash, quick, guard, focus, mend, cleave, meteor, bulwark]
}

fn enemy(id: &str, name: &str, max_hp: u32, damage: u32, tier: Tier) -> EnemyRecord {
    EnemyRecord {
        id: id.into(),
        name: name.into(),
        max_hp,
        hp: None,
        damage,
        block: 0,
        tier,
    }
}

fn blessing(id: &str, name: &str, rarity: Rarity, hooks: Vec<HookSpec>) -> BlessingRecord {
    BlessingRecord {
        id: id.into(),
        name: name.into(),
        description: String::new(),
        rarity: Some(rarity),
        once_per_turn: false,
        hooks,
    }
}

fn equipment(id: &str, name: &str, hooks: Vec<HookSpec>) -> EquipmentRecord {
    EquipmentRecord {
        id: id.into(),
        name: name.into(),
        description: String::new(),
        rarity: None,
        once_per_turn: false,
        slot_cost: 1,
        hooks,
    }
}

pub(crate) fn fixture_pack() -> ContentPack {
    let mut cards = vec![strike(), defend()];
    cards.extend(reward_cards());

    ContentPack {
        id: "fixture".into(),
        name: "Fixture".into(),
        starter_deck: ["strike", "strike", "strike", "defend", "defend"]
            .map(String::from)
            .to_vec(),
        cards,
        enemies: vec![
            enemy("slime", "Slime", 20, 4, Tier::Normal),
            enemy("rat", "Rat", 14, 3, Tier::Normal),
            enemy("knight", "Knight", 40, 8, Tier::Elite),
            enemy("dragon", "Dragon", 90, 12, Tier::Boss),
        ],
        blessings: vec![
            blessing(
                GameConfig::DEMO_BLESSING,
                "First Spark",
                Rarity::Common,
                vec![HookSpec::new(Trigger::CardPlayed, Effect::GainEnergy(1)).once_per_turn()],
            ),
            blessing(
                "bl_start_block",
                "Morning Guard",
                Rarity::Common,
                vec![HookSpec::new(Trigger::TurnStart, Effect::GainBlock(3))],
            ),
            blessing(
                "bl_attack_block",
                "Parry",
                Rarity::Uncommon,
                vec![HookSpec::new(Trigger::CardPlayed, Effect::GainBlock(2)).when_tag("attack")],
            ),
            blessing(
                "bl_end_heal",
                "Second Wind",
                Rarity::Rare,
                vec![HookSpec::new(Trigger::TurnEnd, Effect::Heal(2))],
            ),
        ],
        equipment: vec![
            equipment(
                "start_shield",
                "Starting Shield",
                vec![HookSpec::new(Trigger::Equip, Effect::GainBlock(5))],
            ),
            equipment(
                "battle_rhythm_band",
                "Battle Rhythm Band",
                vec![HookSpec::new(Trigger::CardPlayed, Effect::GainEnergy(1)).once_per_turn()],
            ),
            equipment(
                "regen_charm",
                "Regen Charm",
                vec![HookSpec::new(Trigger::TurnEnd, Effect::Heal(1))],
            ),
        ],
    }
}

pub(crate) fn fixture_content() -> ContentSnapshot {
    match ContentSnapshot::build(fixture_pack()) {
        Ok(snapshot) => snapshot,
        Err(err) => panic!("fixture pack is invalid: {err}"),
    }
}

/// A run on the map right after the starter pick, minus the blessing.
pub(crate) fn fresh_run() -> RunState {
    let content = fixture_content();
    let run = GameConfig::default().run;
    let mut rng = GeneratorState::seed("fixture");
    RunState {
        seed: "fixture".into(),
        phase: Phase::Map,
        act: 1,
        player: PlayerState::new(run.start_hp, run.start_energy, run.hand_size, run.start_gold),
        master_deck: content.starter_deck().to_vec(),
        loadout: Loadout::new(run.equipment_slots),
        progression: Some(Progression::Grid(GridMap::generate(
            &mut rng,
            run.map_columns,
        ))),
        ..RunState::default()
    }
}

/// Turn 1 of a normal fight with a fixed deal.
///
/// Hand is strike, defend, strike; the draw pile holds defend, strike.
pub(crate) fn combat_run() -> RunState {
    let content = fixture_content();
    let mut state = fresh_run();
    let deck = &state.master_deck;
    let instance = |uid: u32, index: usize| CardInstance {
        uid,
        card: deck[index].clone(),
    };
    // master deck order: strike x3, defend x2
    let piles = Piles {
        hand: vec![instance(0, 0), instance(3, 3), instance(1, 1)],
        draw: vec![instance(4, 4), instance(2, 2)],
        discard: Vec::new(),
        exhaust: Vec::new(),
        dealt: 5,
    };
    state.piles = piles;
    state.phase = Phase::Combat;
    state.turn = 1;
    state.enemy = content.enemies_by_tier(Tier::Normal).first().map(EnemyRecord::spawn);
    state.encounter = Some(Tier::Normal);
    state
}
