//! One handler per command, grouped by the phase they act in.
//!
//! Phase and map-mode guards already ran in `pre_validate`; handlers check
//! the remaining, state-dependent preconditions and mutate the working copy.
mod close;
mod combat;
mod deck;
mod events;
mod level;
mod pages;
mod qa;
mod run;
mod shop;

pub(super) use close::closable_phases;

use crate::command::Command;

use super::errors::{HandlerResult, Rejection};
use super::Ctx;

pub(super) fn route(cx: &mut Ctx<'_, '_>, command: &Command) -> HandlerResult {
    match command {
        Command::NewRun { seed } => run::new_run(cx, seed),
        Command::ChooseStarterBlessing { index } => run::choose_starter_blessing(cx, *index),
        Command::StartCombat => combat::start_combat(cx),
        Command::EnterNode { node_id } => run::enter_node(cx, node_id),

        Command::OpenPage => pages::open_page(cx),
        Command::ChooseOffer { index } => pages::choose_offer(cx, *index),
        Command::DismissOffer { index } => pages::dismiss_offer(cx, *index),
        Command::Proceed => pages::proceed(cx),

        Command::PlayCard { index } => combat::play_card(cx, *index),
        Command::EndTurn => combat::end_turn(cx),

        Command::TakeReward { index } => level::take_reward(cx, *index),

        Command::TakeShop { index } => shop::take_shop(cx, *index),
        Command::ShopReroll => shop::reroll(cx),
        Command::ShopRemoveBuy { index } => shop::remove_buy(cx, *index),
        Command::ShopUpgradeBuy { index } => shop::upgrade_buy(cx, *index),

        Command::DoBonfireHeal => events::bonfire_heal(cx),
        Command::DoWellUse => events::well_use(cx),
        Command::DoWellDismiss => events::well_dismiss(cx),
        Command::EventChooseBlessing { index } => events::choose_blessing(cx, *index),
        Command::EventRemoveCard { pile, index } => events::remove_card(cx, *pile, *index),
        Command::EventGambleRoll => events::gamble(cx),
        Command::EventTreasureOpen => events::treasure(cx),

        Command::ChooseLevelUp { index } => level::choose_level_up(cx, *index),
        Command::SkipLevelUp => level::skip_level_up(cx),

        Command::CompleteNode => close::complete_node(cx),

        Command::EquipItem { index } => deck::equip(cx, *index),
        Command::UnequipItem { index } => deck::unequip(cx, *index),
        Command::OpenDeck => deck::set_deck_view(cx, true),
        Command::CloseDeck => deck::set_deck_view(cx, false),

        Command::QaKillEnemy => qa::kill_enemy(cx),
        Command::QaDraw { count } => qa::draw(cx, *count),
        Command::QaSetEnergy { value } => qa::set_energy(cx, *value),
        Command::QaAddBlessingDemo => qa::add_blessing_demo(cx),
        Command::QaAddEquipmentDemo => qa::add_equipment_demo(cx),
        Command::QaOpenShop { kind } => qa::open_shop(cx, *kind),
        Command::QaOpenEvent { kind } => qa::open_event(cx, *kind),
        Command::QaInitPages => qa::init_pages(cx),
        Command::QaPrintPage => qa::print_page(cx),
    }
}

/// Bounds-checked lookup that rejects with the collection's display name.
fn at<'a, T>(items: &'a [T], index: usize, what: &'static str) -> Result<&'a T, Rejection> {
    items.get(index).ok_or(Rejection::NoSuchIndex { what, index })
}
