//! Building blocks of [`RunState`](super::RunState).
mod encounter;
mod equipment;
mod piles;
mod player;
mod progress;

pub use encounter::{EventKind, EventState, RewardState, ShopItem, ShopKind, ShopState};
pub use equipment::Loadout;
pub use piles::{CardInstance, DeckPile, Piles};
pub use player::{PlayerState, exp_to_next};
pub use progress::{LevelUpBucket, PendingLevelUp, RunCounters, StarterChoice, TurnFlags};
