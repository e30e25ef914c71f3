//! Error types for the command pipeline.

use crate::command::CommandTag;
use crate::config::MapMode;
use crate::env::ContentError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EventKind, Phase, ShopKind};

/// Precondition violation: the command is a no-op in the current state.
///
/// The `Display` text is the line appended to the run log on rejection.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("{command}: not available during {phase}")]
    WrongPhase { command: CommandTag, phase: Phase },

    #[error("{command}: requires {expected} progression")]
    WrongMapMode {
        command: CommandTag,
        expected: MapMode,
    },

    #[error("{what}: nothing at index {index}")]
    NoSuchIndex { what: &'static str, index: usize },

    #[error("Run complete")]
    RunComplete,

    // combat
    #[error("Combat already resolved")]
    CombatLocked,

    #[error("Combat already in progress")]
    CombatAlreadyStarted,

    #[error("No enemy present")]
    NoEnemy,

    #[error("Not enough energy (need {need}).")]
    NotEnoughEnergy { need: u32 },

    // grid
    #[error("Node {0} is not reachable")]
    NodeUnavailable(String),

    // pages
    #[error("No page open")]
    NoPageOpen,

    #[error("Page already open")]
    PageAlreadyOpen,

    #[error("Offer already resolved")]
    OfferResolved,

    #[error("The boss cannot be dismissed")]
    BossNotDismissable,

    #[error("Cannot proceed: page not cleared.")]
    PageNotCleared,

    // shops
    #[error("Shop: this is not a {0} shop")]
    WrongShop(ShopKind),

    #[error("Shop: item already sold")]
    AlreadySold,

    #[error("Shop: Not enough gold")]
    ShopNotEnoughGold,

    #[error("Shop: Not enough gold to reroll")]
    RerollNotEnoughGold,

    #[error("Remove shop: Not enough gold ({cost}g).")]
    RemoveNotEnoughGold { cost: u32 },

    #[error("Upgrade shop: Not enough gold ({cost}g).")]
    UpgradeNotEnoughGold { cost: u32 },

    #[error("Cannot remove the last card")]
    LastCard,

    #[error("{0} is already upgraded")]
    AlreadyUpgraded(String),

    // events
    #[error("Event: not a {0} event")]
    WrongEvent(EventKind),

    #[error("Event already resolved")]
    EventSpent,

    #[error("Remove: limit of {cap} per run reached")]
    RemoveCapReached { cap: u32 },

    #[error("Blessing already owned")]
    BlessingOwned,

    // rewards and leveling
    #[error("Reward already taken")]
    RewardTaken,

    #[error("No level-up pending")]
    NoLevelUp,

    #[error("Level-up: choose an option or skip first")]
    LevelUpUnresolved,

    #[error("Level-up: {0} needs an index")]
    IndexRequired(crate::state::LevelUpBucket),

    #[error("Starter blessing already chosen")]
    StarterChosen,

    #[error("Deck view already {0}")]
    DeckView(&'static str),
}

impl GameError for Rejection {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use Rejection::*;
        match self {
            WrongPhase { .. } => "REJECT_WRONG_PHASE",
            WrongMapMode { .. } => "REJECT_WRONG_MAP_MODE",
            NoSuchIndex { .. } => "REJECT_NO_SUCH_INDEX",
            RunComplete => "REJECT_RUN_COMPLETE",
            CombatLocked => "REJECT_COMBAT_LOCKED",
            CombatAlreadyStarted => "REJECT_COMBAT_STARTED",
            NoEnemy => "REJECT_NO_ENEMY",
            NotEnoughEnergy { .. } => "REJECT_NOT_ENOUGH_ENERGY",
            NodeUnavailable(_) => "REJECT_NODE_UNAVAILABLE",
            NoPageOpen => "REJECT_NO_PAGE",
            PageAlreadyOpen => "REJECT_PAGE_OPEN",
            OfferResolved => "REJECT_OFFER_RESOLVED",
            BossNotDismissable => "REJECT_BOSS_DISMISS",
            PageNotCleared => "REJECT_PAGE_NOT_CLEARED",
            WrongShop(_) => "REJECT_WRONG_SHOP",
            AlreadySold => "REJECT_SOLD",
            ShopNotEnoughGold | RerollNotEnoughGold => "REJECT_NOT_ENOUGH_GOLD",
            RemoveNotEnoughGold { .. } | UpgradeNotEnoughGold { .. } => "REJECT_NOT_ENOUGH_GOLD",
            LastCard => "REJECT_LAST_CARD",
            AlreadyUpgraded(_) => "REJECT_ALREADY_UPGRADED",
            WrongEvent(_) => "REJECT_WRONG_EVENT",
            EventSpent => "REJECT_EVENT_SPENT",
            RemoveCapReached { .. } => "REJECT_REMOVE_CAP",
            BlessingOwned => "REJECT_BLESSING_OWNED",
            RewardTaken => "REJECT_REWARD_TAKEN",
            NoLevelUp => "REJECT_NO_LEVEL_UP",
            LevelUpUnresolved => "REJECT_LEVEL_UP_UNRESOLVED",
            IndexRequired(_) => "REJECT_INDEX_REQUIRED",
            StarterChosen => "REJECT_STARTER_CHOSEN",
            DeckView(_) => "REJECT_DECK_VIEW",
        }
    }
}

/// Engine invariant broken by a handler. Always a bug.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("hp {hp} exceeds max {max_hp}")]
    HpAboveMax { hp: u32, max_hp: u32 },

    #[error("piles hold {held:?} but {dealt} cards were dealt")]
    PilesNotConserved { dealt: u32, held: Vec<u32> },

    #[error("phase {0} without a progression model")]
    MissingProgression(Phase),

    #[error("combat without an enemy")]
    CombatWithoutEnemy,
}

/// Failures surfaced by [`GameEngine::apply`](super::GameEngine::apply).
///
/// Rejections never appear here; they are folded into the returned state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("{command} hit corrupt content: {error}")]
    Content {
        command: CommandTag,
        error: ContentError,
    },

    #[error("{command} broke an invariant: {violation}")]
    Invariant {
        command: CommandTag,
        violation: InvariantViolation,
    },
}

impl GameError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Content { error, .. } => error.severity(),
            Self::Invariant { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Content { error, .. } => error.error_code(),
            Self::Invariant { .. } => "ENGINE_INVARIANT",
        }
    }
}

/// Internal result of a handler before the engine folds rejections.
#[derive(Debug)]
pub(crate) enum HandlerError {
    Rejected(Rejection),
    Content(ContentError),
}

impl From<Rejection> for HandlerError {
    fn from(rejection: Rejection) -> Self {
        Self::Rejected(rejection)
    }
}

impl From<ContentError> for HandlerError {
    fn from(error: ContentError) -> Self {
        Self::Content(error)
    }
}

pub(crate) type HandlerResult = Result<(), HandlerError>;
