//! Progression generators.
//!
//! A run owns exactly one progression model, chosen at run start: the
//! branching [`GridMap`] or the token-budgeted [`PagesMap`].
mod grid;
mod pages;

pub use grid::{GridMap, MapNode, NodeKind, generate_map};
pub use pages::{OfferKind, OfferSlot, Page, PageOffers, PagesMap, SlotStatus, roll_page};

use crate::config::MapMode;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Progression {
    Grid(GridMap),
    Pages(PagesMap),
}

impl Progression {
    pub fn mode(&self) -> MapMode {
        match self {
            Self::Grid(_) => MapMode::Grid,
            Self::Pages(_) => MapMode::Pages,
        }
    }

    pub fn grid(&self) -> Option<&GridMap> {
        match self {
            Self::Grid(map) => Some(map),
            Self::Pages(_) => None,
        }
    }

    pub fn grid_mut(&mut self) -> Option<&mut GridMap> {
        match self {
            Self::Grid(map) => Some(map),
            Self::Pages(_) => None,
        }
    }

    pub fn pages(&self) -> Option<&PagesMap> {
        match self {
            Self::Pages(pages) => Some(pages),
            Self::Grid(_) => None,
        }
    }

    pub fn pages_mut(&mut self) -> Option<&mut PagesMap> {
        match self {
            Self::Pages(pages) => Some(pages),
            Self::Grid(_) => None,
        }
    }
}
