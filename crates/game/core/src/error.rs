//! Common error infrastructure for game-core.
//!
//! Domain errors live next to the code that raises them (`Rejection` in the
//! engine, `HookError` in the effect runtime, `ContentError` in the content
//! seam). They share the severity classification defined here.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: isolated failure, surrounding work continues
/// - **Validation**: invalid command for the current state, rejected as a no-op
/// - **Internal**: engine invariant broken, indicates a bug
/// - **Fatal**: content tables are corrupt, the run cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: a blessing hook targeting a missing enemy.
    Recoverable,

    /// Examples: wrong phase, not enough gold, index out of range.
    Validation,

    /// Examples: pile conservation broken, hp above max after a command.
    Internal,

    /// Examples: unknown card id, empty enemy tier.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }

    /// Returns true if this error indicates a bug or corrupt data.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization and testing. Defaults to the type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
