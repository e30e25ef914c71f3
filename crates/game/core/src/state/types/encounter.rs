//! Transient state of an open shop, event or reward screen.

use strum::{AsRefStr, Display, EnumString};

use crate::env::{BlessingRecord, CardRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ShopKind {
    Card,
    Remove,
    Upgrade,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShopItem {
    pub card: CardRecord,
    pub price: u32,
    pub sold: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShopState {
    pub kind: ShopKind,
    /// Empty for remove and upgrade shops, which act on the master deck.
    pub stock: Vec<ShopItem>,
    /// Set by any successful purchase.
    pub used: bool,
}

impl ShopState {
    pub fn new(kind: ShopKind, stock: Vec<ShopItem>) -> Self {
        Self {
            kind,
            stock,
            used: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    Shrine,
    Remove,
    Gamble,
    Treasure,
    Bonfire,
    Well,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventState {
    pub kind: EventKind,
    /// Shrine offers; empty for every other kind.
    pub shrine_options: Vec<BlessingRecord>,
    /// The event's one action has been taken.
    pub used: bool,
    /// Well only: declined without using it.
    pub dismissed: bool,
}

impl EventState {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            shrine_options: Vec::new(),
            used: false,
            dismissed: false,
        }
    }

    pub fn shrine(options: Vec<BlessingRecord>) -> Self {
        Self {
            shrine_options: options,
            ..Self::new(EventKind::Shrine)
        }
    }

    pub fn is_spent(&self) -> bool {
        self.used || self.dismissed
    }
}

/// Card choices rolled at victory, held until the reward screen closes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardState {
    pub options: Vec<CardRecord>,
    pub taken: bool,
}

impl RewardState {
    pub fn new(options: Vec<CardRecord>) -> Self {
        Self {
            options,
            taken: false,
        }
    }
}
