//! Error types for snapshot construction and edit application.
//!
//! ## Error Hierarchy
//!
//! ```text
//! RegistrationError - building a ProgramSnapshot from entries
//! EditError         - committing a synthesis plan into a snapshot
//! ```
//!
//! The fix pipeline wraps both in its own top-level error together with
//! cancellation.

use thiserror::Error;

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors that occur while registering types into a snapshot.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    /// A type with this name already exists.
    #[error("duplicate type: {0}")]
    DuplicateType(String),

    /// A referenced type was not found.
    #[error("type '{referrer}' references unknown type {hash}")]
    UnknownType {
        /// The type holding the reference.
        referrer: String,
        /// Hash of the missing definition.
        hash: String,
    },

    /// Two members of one type share a signature.
    #[error("duplicate member '{member}' in type '{type_name}'")]
    DuplicateMember {
        /// The type name.
        type_name: String,
        /// The duplicated member name.
        member: String,
    },

    /// The inheritance graph contains a cycle.
    #[error("cyclic inheritance involving '{0}'")]
    CyclicInheritance(String),
}

// ============================================================================
// Edit Errors
// ============================================================================

/// Errors that occur while committing synthesized members.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    /// The plan targets a type that is not in the snapshot.
    #[error("edit target {0} not found")]
    UnknownTarget(String),

    /// The plan targets a type that cannot hold the members.
    #[error("type '{0}' cannot receive synthesized members")]
    InvalidTarget(String),

    /// A synthesized member collides with an existing one.
    #[error("member '{member}' already exists on '{type_name}'")]
    MemberCollision {
        /// The target type name.
        type_name: String,
        /// The colliding member name.
        member: String,
    },

    /// The plan has no members.
    #[error("synthesis plan for '{0}' is empty")]
    EmptyPlan(String),
}
