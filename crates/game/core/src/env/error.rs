//! Content access errors.

use crate::error::{ErrorSeverity, GameError};

use super::Tier;

/// Errors raised when content tables are missing or inconsistent.
///
/// These indicate a corrupt or mis-authored content pack rather than a
/// reachable player state, so they are never softened into a log line.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentError {
    #[error("card '{0}' not found")]
    UnknownCard(String),

    #[error("blessing '{0}' not found")]
    UnknownBlessing(String),

    #[error("equipment '{0}' not found")]
    UnknownEquipment(String),

    #[error("content pack '{0}' is not registered")]
    UnknownPack(String),

    #[error("duplicate {table} id '{id}'")]
    DuplicateId { table: &'static str, id: String },

    #[error("no {0} enemies defined")]
    EmptyTier(Tier),

    #[error("starter deck is empty")]
    EmptyStarterDeck,

    #[error("no blessings defined")]
    NoBlessings,
}

impl GameError for ContentError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use ContentError::*;
        match self {
            UnknownCard(_) => "CONTENT_UNKNOWN_CARD",
            UnknownBlessing(_) => "CONTENT_UNKNOWN_BLESSING",
            UnknownEquipment(_) => "CONTENT_UNKNOWN_EQUIPMENT",
            UnknownPack(_) => "CONTENT_UNKNOWN_PACK",
            DuplicateId { .. } => "CONTENT_DUPLICATE_ID",
            EmptyTier(_) => "CONTENT_EMPTY_TIER",
            EmptyStarterDeck => "CONTENT_EMPTY_STARTER_DECK",
            NoBlessings => "CONTENT_NO_BLESSINGS",
        }
    }
}
