//! Top-level error type of the fix pipeline.

use thiserror::Error;

use synthfix_core::{EditError, RegistrationError};

use crate::{Cancelled, FixFeature, StrategyTag};

/// Errors raised while applying a code action.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FixError {
    /// Cancellation was requested before the edit committed.
    #[error(transparent)]
    Cancelled(#[from] Cancelled),

    /// The synthesized members could not be committed.
    #[error("edit failed: {0}")]
    Edit(#[from] EditError),

    /// Snapshot construction failed.
    #[error("registration failed: {0}")]
    Registration(#[from] RegistrationError),

    /// Group actions only carry children.
    #[error("action '{0}' is a group and cannot be applied")]
    NotInvocable(String),

    /// No synthesis function is registered for the strategy.
    #[error("no synthesis registered for strategy {0:?}")]
    UnknownStrategy(StrategyTag),

    /// The strategy cannot synthesize from this kind of candidate.
    #[error("strategy {strategy:?} does not accept a {candidate} candidate")]
    CandidateMismatch {
        strategy: StrategyTag,
        candidate: &'static str,
    },

    /// The target type is missing from the snapshot.
    #[error("target type {0} not found")]
    MissingTarget(String),

    /// A provider for this language and feature is already registered.
    #[error("provider for {feature} already registered for language '{language}'")]
    DuplicateProvider { language: String, feature: FixFeature },
}

impl FixError {
    /// Check if this error is a cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FixError::Cancelled(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        let err: FixError = Cancelled.into();
        assert!(err.is_cancelled());
        assert_eq!(err.to_string(), "operation cancelled");

        let err: FixError = EditError::EmptyPlan("Derived".into()).into();
        assert!(!err.is_cancelled());
        assert!(err.to_string().starts_with("edit failed"));
    }
}
