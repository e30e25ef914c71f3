//! Rewards, shop stock, pricing, leveling and event rolls.
//!
//! Everything here is a pure function of its inputs and the threaded
//! generator; handlers decide when to call them and apply the results.
mod costs;
mod events;
mod leveling;
mod rewards;

pub use costs::{remove_cost, tiered_cost, upgrade_cost};
pub use events::{roll_event_kind, roll_shrine};
pub use leveling::{grant_exp, roll_blessing_pair, roll_bucket, roll_level_up};
pub use rewards::{price_for, roll_reward_options, roll_shop_stock};
