//! QA and debug commands. They go through the same guards as player
//! commands and every one of them leaves a log line.

use crate::config::GameConfig;
use crate::map::{PagesMap, Progression};
use crate::state::{EventKind, ShopKind};

use super::super::errors::{HandlerResult, Rejection};
use super::super::Ctx;
use super::{combat, events, shop};

pub(super) fn kill_enemy(cx: &mut Ctx<'_, '_>) -> HandlerResult {
    if cx.state.combat_victory_lock {
        return Err(Rejection::CombatLocked.into());
    }
    let enemy = cx.state.enemy.as_mut().ok_or(Rejection::NoEnemy)?;
    enemy.hp = Some(0);
    cx.state.log("QA: kill enemy");
    combat::check_victory(cx);
    Ok(())
}

pub(super) fn draw(cx: &mut Ctx<'_, '_>, count: u32) -> HandlerResult {
    let drawn = cx.state.piles.draw_n(count as usize, cx.rng);
    cx.state.log(format!("QA: draw {count} (drew {drawn})"));
    Ok(())
}

pub(super) fn set_energy(cx: &mut Ctx<'_, '_>, amount: u32) -> HandlerResult {
    cx.state.player.energy = amount;
    cx.state.log(format!("QA: set energy {amount}"));
    Ok(())
}

pub(super) fn add_blessing_demo(cx: &mut Ctx<'_, '_>) -> HandlerResult {
    let blessing = cx
        .env
        .content()
        .require_blessing(GameConfig::DEMO_BLESSING)?;
    if cx.state.owns_blessing(&blessing.id) {
        return Err(Rejection::BlessingOwned.into());
    }
    cx.state.log(format!("QA: added blessing {}", blessing.name));
    cx.state.blessings.push(blessing.clone());
    Ok(())
}

pub(super) fn add_equipment_demo(cx: &mut Ctx<'_, '_>) -> HandlerResult {
    let content = cx.env.content();
    let items = GameConfig::DEMO_EQUIPMENT
        .iter()
        .map(|id| content.require_equipment(id).cloned())
        .collect::<Result<Vec<_>, _>>()?;
    let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
    let line = format!("QA: equipped {}", names.join(", "));
    cx.state.loadout.equipped.extend(items);
    cx.state.log(line);
    Ok(())
}

pub(super) fn open_shop(cx: &mut Ctx<'_, '_>, kind: ShopKind) -> HandlerResult {
    shop::open_shop(cx, kind);
    Ok(())
}

pub(super) fn open_event(cx: &mut Ctx<'_, '_>, kind: EventKind) -> HandlerResult {
    events::open_event(cx, kind);
    Ok(())
}

/// Swaps the run's progression for a fresh pages map with no page open.
pub(super) fn init_pages(cx: &mut Ctx<'_, '_>) -> HandlerResult {
    let pages = PagesMap::new(&cx.env.config().pages);
    let line = format!("QA: pages initialised ({} pages)", pages.total_pages);
    cx.state.progression = Some(Progression::Pages(pages));
    cx.state.log(line);
    Ok(())
}

pub(super) fn print_page(cx: &mut Ctx<'_, '_>) -> HandlerResult {
    let line = cx
        .state
        .progression
        .as_ref()
        .and_then(Progression::pages)
        .and_then(|pages| pages.page.as_ref())
        .map(|page| page.describe())
        .ok_or(Rejection::NoPageOpen)?;
    cx.state.log(line);
    Ok(())
}
