//! Loader round trips through a temporary data directory.

use std::fs;
use std::path::Path;

use game_content::{ConfigLoader, ContentFactory, ContentRegistry, PackLoader};
use game_core::{ContentOracle, Effect, MapMode, Rarity, Tier, Trigger};
use tempfile::TempDir;

const MANIFEST: &str = r#"(id: "mini", name: "Mini", starter_deck: ["poke", "poke", "brace"])"#;

const CARDS: &str = r#"(
    cards: [
        (id: "poke", name: "Poke", kind: attack, cost: 1, damage: Some(4), starter: true),
        (id: "brace", name: "Brace", kind: skill, cost: 1, block: Some(4), starter: true),
        (id: "lunge", name: "Lunge", kind: attack, cost: 2, damage: Some(11), rarity: Some(uncommon)),
    ],
)"#;

const ENEMIES: &str = r#"(
    enemies: [
        (id: "bat", name: "Bat", max_hp: 12, damage: 3, tier: normal),
        (id: "ogre", name: "Ogre", max_hp: 40, damage: 9, tier: elite),
        (id: "lich", name: "Lich", max_hp: 80, damage: 12, tier: boss),
    ],
)"#;

const BLESSINGS: &str = r#"(
    blessings: [
        (
            id: "bl_spark",
            name: "Spark",
            rarity: Some(common),
            once_per_turn: true,
            hooks: [(trigger: card_played, effect: gain_energy(1))],
        ),
    ],
)"#;

const EQUIPMENT: &str = "(equipment: [])";

fn write_pack(root: &Path, id: &str) {
    let dir = root.join("packs").join(id);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("pack.ron"), MANIFEST.replace("mini", id)).unwrap();
    fs::write(dir.join("cards.ron"), CARDS).unwrap();
    fs::write(dir.join("enemies.ron"), ENEMIES).unwrap();
    fs::write(dir.join("blessings.ron"), BLESSINGS).unwrap();
    fs::write(dir.join("equipment.ron"), EQUIPMENT).unwrap();
}

#[test]
fn pack_directory_loads_and_validates() {
    let tmp = TempDir::new().unwrap();
    write_pack(tmp.path(), "mini");

    let pack = PackLoader::load(&tmp.path().join("packs/mini")).unwrap();
    assert_eq!(pack.id, "mini");
    assert_eq!(pack.starter_deck, ["poke", "poke", "brace"]);
    assert_eq!(pack.cards[2].rarity, Some(Rarity::Uncommon));
    assert_eq!(pack.enemies[2].tier, Tier::Boss);
    let hook = &pack.blessings[0].hooks[0];
    assert_eq!(hook.trigger, Trigger::CardPlayed);
    assert_eq!(hook.effect, Effect::GainEnergy(1));
    assert!(pack.equipment.is_empty());
}

#[test]
fn factory_lists_and_registers_directory_packs() {
    let tmp = TempDir::new().unwrap();
    write_pack(tmp.path(), "mini");
    write_pack(tmp.path(), "alt");

    let factory = ContentFactory::new(tmp.path());
    assert_eq!(factory.pack_ids().unwrap(), ["alt", "mini"]);

    let mut registry = ContentRegistry::with_builtin().unwrap();
    for pack in factory.load_packs().unwrap() {
        registry.register(pack);
    }
    registry.activate("mini").unwrap();
    assert_eq!(registry.active_id(), "mini");
    assert_eq!(registry.starter_deck().len(), 3);
    assert_eq!(registry.reward_pool().len(), 1);
}

#[test]
fn parse_errors_name_the_broken_file() {
    let tmp = TempDir::new().unwrap();
    write_pack(tmp.path(), "mini");
    let dir = tmp.path().join("packs/mini");
    fs::write(dir.join("enemies.ron"), "(enemies: [(id: 3)])").unwrap();

    let err = PackLoader::load(&dir).unwrap_err().to_string();
    assert!(err.contains("enemy catalog"), "{err}");
    assert!(err.contains("mini"), "{err}");
}

#[test]
fn missing_file_is_reported() {
    let tmp = TempDir::new().unwrap();
    write_pack(tmp.path(), "mini");
    let dir = tmp.path().join("packs/mini");
    fs::remove_file(dir.join("cards.ron")).unwrap();

    let err = PackLoader::load(&dir).unwrap_err().to_string();
    assert!(err.contains("cards.ron"), "{err}");
}

#[test]
fn partial_config_keeps_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    fs::write(
        &path,
        "[run]\nstart_gold = 500\nmap_mode = \"pages\"\n\n[pages]\ntotal_pages = 6\n",
    )
    .unwrap();

    let config = ConfigLoader::load(&path).unwrap();
    assert_eq!(config.run.start_gold, 500);
    assert_eq!(config.run.map_mode, MapMode::Pages);
    assert_eq!(config.run.start_hp, 50);
    assert_eq!(config.pages.total_pages, 6);
    assert_eq!(config.economy.reroll_cost, 20);
}

#[test]
fn malformed_config_is_an_error() {
    let err = ConfigLoader::parse("[run]\nstart_gold = \"lots\"\n").unwrap_err();
    assert!(err.to_string().contains("config TOML"));
}

#[test]
fn oversized_map_config_is_rejected() {
    let err = ConfigLoader::parse("[run]\nmap_columns = 4000000000\n").unwrap_err();
    assert!(err.to_string().contains("map_columns"));

    let err = ConfigLoader::parse("[pages]\ntotal_pages = 0\n").unwrap_err();
    assert!(err.to_string().contains("total_pages"));
}
