//! Closed, tagged command surface accepted by the engine.

use strum::{AsRefStr, Display, EnumDiscriminants, EnumString};

use crate::state::{DeckPile, EventKind, ShopKind};

/// Player and debug commands.
///
/// Serialized with an internal `type` tag, e.g. `{"type":"PlayCard","index":0}`.
/// The `QA_*` variants are debug mutators that obey the same phase guards as
/// their player-facing equivalents.
#[derive(Clone, Debug, PartialEq, Eq, EnumDiscriminants)]
#[strum_discriminants(name(CommandTag), derive(Display, EnumString, AsRefStr, Hash))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Command {
    NewRun { seed: String },
    ChooseStarterBlessing { index: usize },
    StartCombat,

    // grid progression
    EnterNode { node_id: String },

    // pages progression
    OpenPage,
    ChooseOffer { index: usize },
    DismissOffer { index: usize },
    Proceed,

    // combat
    PlayCard { index: usize },
    EndTurn,

    TakeReward { index: usize },

    // shops
    TakeShop { index: usize },
    ShopReroll,
    ShopRemoveBuy { index: usize },
    ShopUpgradeBuy { index: usize },

    // events
    DoBonfireHeal,
    DoWellUse,
    DoWellDismiss,
    EventChooseBlessing { index: usize },
    EventRemoveCard { pile: DeckPile, index: usize },
    EventGambleRoll,
    EventTreasureOpen,

    // leveling
    ChooseLevelUp {
        #[cfg_attr(feature = "serde", serde(default))]
        index: Option<usize>,
    },
    SkipLevelUp,

    CompleteNode,

    // loadout and deck view
    EquipItem { index: usize },
    UnequipItem { index: usize },
    OpenDeck,
    CloseDeck,

    // debug
    #[strum_discriminants(strum(serialize = "QA_KillEnemy"))]
    #[cfg_attr(feature = "serde", serde(rename = "QA_KillEnemy"))]
    QaKillEnemy,
    #[strum_discriminants(strum(serialize = "QA_Draw"))]
    #[cfg_attr(feature = "serde", serde(rename = "QA_Draw"))]
    QaDraw { count: u32 },
    #[strum_discriminants(strum(serialize = "QA_SetEnergy"))]
    #[cfg_attr(feature = "serde", serde(rename = "QA_SetEnergy"))]
    QaSetEnergy { value: u32 },
    #[strum_discriminants(strum(serialize = "QA_AddBlessingDemo"))]
    #[cfg_attr(feature = "serde", serde(rename = "QA_AddBlessingDemo"))]
    QaAddBlessingDemo,
    #[strum_discriminants(strum(serialize = "QA_AddEquipmentDemo"))]
    #[cfg_attr(feature = "serde", serde(rename = "QA_AddEquipmentDemo"))]
    QaAddEquipmentDemo,
    #[strum_discriminants(strum(serialize = "QA_OpenShop"))]
    #[cfg_attr(feature = "serde", serde(rename = "QA_OpenShop"))]
    QaOpenShop { kind: ShopKind },
    #[strum_discriminants(strum(serialize = "QA_OpenEvent"))]
    #[cfg_attr(feature = "serde", serde(rename = "QA_OpenEvent"))]
    QaOpenEvent { kind: EventKind },
    #[strum_discriminants(strum(serialize = "QA_InitPages"))]
    #[cfg_attr(feature = "serde", serde(rename = "QA_InitPages"))]
    QaInitPages,
    #[strum_discriminants(strum(serialize = "QA_PrintPage"))]
    #[cfg_attr(feature = "serde", serde(rename = "QA_PrintPage"))]
    QaPrintPage,
}

impl Command {
    pub fn tag(&self) -> CommandTag {
        CommandTag::from(self)
    }

    pub fn is_debug(&self) -> bool {
        self.tag().as_ref().starts_with("QA_")
    }
}

/// SHA-256 commitment over an ordered command sequence.
///
/// Pairs with [`RunState::digest`](crate::RunState::digest) to identify a replay:
/// same seed, same commands root, same final digest.
#[cfg(feature = "serde")]
pub fn compute_commands_root(commands: &[Command]) -> [u8; 32] {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    for command in commands {
        if let Ok(bytes) = bincode::serialize(command) {
            hasher.update(&bytes);
        }
    }
    hasher.finalize().into()
}
