//! Level-up resolution and the post-combat card reward.

use crate::state::{LevelUpBucket, PendingLevelUp};

use super::super::errors::{HandlerResult, Rejection};
use super::super::Ctx;
use super::{at, deck};

fn pending(cx: &Ctx<'_, '_>) -> Result<PendingLevelUp, Rejection> {
    cx.state
        .level_up
        .as_ref()
        .filter(|pending| pending.is_open())
        .cloned()
        .ok_or(Rejection::NoLevelUp)
}

/// Applies the pending bucket's single effect.
///
/// Buckets that act on a choice or a deck card need `index`; the others ignore it.
pub(super) fn choose_level_up(cx: &mut Ctx<'_, '_>, index: Option<usize>) -> HandlerResult {
    let pending = pending(cx)?;
    let bucket = pending.bucket;
    let index = match (bucket.needs_index(), index) {
        (true, None) => return Err(Rejection::IndexRequired(bucket).into()),
        (_, index) => index.unwrap_or_default(),
    };
    let leveling = &cx.env.config().leveling;
    let state = &mut *cx.state;

    let line = match bucket {
        LevelUpBucket::MaxHp => {
            state.player.raise_max_hp(leveling.max_hp_gain);
            format!("Max HP +{}", leveling.max_hp_gain)
        }
        LevelUpBucket::MaxEnergy => {
            state.player.max_energy += 1;
            "Max energy +1".to_owned()
        }
        LevelUpBucket::MaxHand => {
            state.player.max_hand_size += 1;
            "Hand size +1".to_owned()
        }
        LevelUpBucket::Gold => {
            state.player.gold = state.player.gold.saturating_add(leveling.gold_gain);
            format!("+{} gold", leveling.gold_gain)
        }
        LevelUpBucket::Cards => {
            let card = at(&pending.card_choices, index, "Level-up card")?.clone();
            let line = format!("Added {}", card.name);
            state.master_deck.push(card);
            line
        }
        LevelUpBucket::Blessing => {
            let blessing = at(&pending.blessing_choices, index, "Level-up blessing")?.clone();
            if state.owns_blessing(&blessing.id) {
                return Err(Rejection::BlessingOwned.into());
            }
            let line = format!("Blessing {}", blessing.name);
            state.blessings.push(blessing);
            line
        }
        LevelUpBucket::Remove => {
            let card = deck::remove_master_card(state, index, "Deck")?;
            format!("Removed {}", card.name)
        }
        LevelUpBucket::Upgrade => {
            let name = deck::upgrade_master_card(state, index, "Deck")?;
            format!("Upgraded {name}")
        }
    };

    consume(cx);
    cx.state.log(format!("Level-up: {line}"));
    Ok(())
}

pub(super) fn skip_level_up(cx: &mut Ctx<'_, '_>) -> HandlerResult {
    pending(cx)?;
    let gold = cx.env.config().leveling.skip_gold;
    cx.state.player.gold = cx.state.player.gold.saturating_add(gold);
    consume(cx);
    cx.state.log(format!("Level-up skipped: +{gold} gold"));
    Ok(())
}

fn consume(cx: &mut Ctx<'_, '_>) {
    if let Some(pending) = cx.state.level_up.as_mut() {
        pending.consumed = true;
    }
}

/// Adds one of the rolled reward cards to the master deck; one per reward.
pub(super) fn take_reward(cx: &mut Ctx<'_, '_>, index: usize) -> HandlerResult {
    let Some(reward) = cx.state.reward.as_ref() else {
        return Err(Rejection::NoSuchIndex {
            what: "Reward",
            index,
        }
        .into());
    };
    if reward.taken {
        return Err(Rejection::RewardTaken.into());
    }
    let card = at(&reward.options, index, "Reward")?.clone();

    let state = &mut *cx.state;
    if let Some(reward) = state.reward.as_mut() {
        reward.taken = true;
    }
    state.log(format!("Reward: added {}", card.name));
    state.master_deck.push(card);
    Ok(())
}
