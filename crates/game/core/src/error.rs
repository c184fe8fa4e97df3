//! Common error infrastructure for tactics-core.
//!
//! Effect resolution itself never fails: unresolvable references are skipped
//! and arithmetic is clamped. Errors exist only at the edges of the core:
//!
//! - **Content errors** are raised while validating definition tables and are
//!   fatal at startup.
//! - **Replay errors** report a fingerprint mismatch to the verifier.
//! - **Skill errors** reject an illegal target at the skill boundary.

use crate::state::AilmentId;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with an alternative input.
    ///
    /// Examples: skill target not legal this turn
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: fingerprint mismatch on a submitted log
    Validation,

    /// Fatal error - the process cannot start with this data.
    ///
    /// Examples: malformed ailment table, cyclic annihilation graph
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all tactics-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors detected while validating content tables at load time.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ContentError {
    /// Two definitions were supplied for the same ailment.
    #[error("duplicate definition for ailment {0}")]
    DuplicateAilment(AilmentId),

    /// A definition field is outside its legal range.
    #[error("invalid definition for ailment {ailment}: {reason}")]
    InvalidDefinition {
        ailment: AilmentId,
        reason: String,
    },

    /// An interaction edge points at an ailment with no definition.
    #[error("ailment {from} interacts with undefined ailment {to}")]
    UnknownInteractionTarget { from: AilmentId, to: AilmentId },

    /// The annihilation graph contains a cycle.
    #[error("annihilation graph contains a cycle: {}", format_cycle(.0))]
    InteractionCycle(Vec<AilmentId>),
}

fn format_cycle(path: &[AilmentId]) -> String {
    path.iter()
        .map(|id| id.as_ref())
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl GameError for ContentError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateAilment(_) => "CONTENT_DUPLICATE_AILMENT",
            Self::InvalidDefinition { .. } => "CONTENT_INVALID_DEFINITION",
            Self::UnknownInteractionTarget { .. } => "CONTENT_UNKNOWN_INTERACTION_TARGET",
            Self::InteractionCycle(_) => "CONTENT_INTERACTION_CYCLE",
        }
    }
}
