//! Code fixes over an immutable program model.
//!
//! `synthfix` offers two families of IDE code fixes for C#-like programs:
//!
//! - **Implement through member**: a class that leaves abstract or interface
//!   members unimplemented, but holds a field or property that already
//!   implements them, gets forwarding members.
//! - **Comparison operators**: a class implementing `IComparable<U>` gets
//!   `<`, `<=`, `>` and `>=` built on its `CompareTo`.
//!
//! The crates are layered:
//!
//! - [`synthfix_core`] - identity, type and member entries, code model
//! - [`synthfix_model`] - snapshots, hierarchy index, semantic queries
//! - [`synthfix_fixes`] - discovery, synthesis, actions and providers
//!
//! This crate re-exports all three and adds [`Workspace`], a session that
//! moves from snapshot to snapshot as actions are applied.

mod workspace;

pub use synthfix_core as types;
pub use synthfix_fixes as fixes;
pub use synthfix_model as model;

pub use synthfix_fixes::{
    CancellationToken, Cancelled, CodeAction, FixContext, FixError, FixOptions, ProviderRegistry,
    Selection, StyleOptions, compute_actions,
};
pub use synthfix_model::{ProgramSnapshot, SemanticModel, SnapshotBuilder};
pub use workspace::{Workspace, WorkspaceError};

/// Everything needed to describe a program and request fixes.
pub mod prelude {
    pub use synthfix_core::{
        ClassEntry, DataType, InterfaceEntry, MemberEntry, Operator, Param, PrimitiveKind,
        QualifiedName, Span, TypeEntry, TypeHash, TypeRef, Visibility,
    };
    pub use synthfix_fixes::{
        CancellationToken, CodeAction, ExpressionBodyPreference, FixContext, FixError,
        FixOptions, MemberPlacement, ProviderRegistry, Selection, StyleOptions, compute_actions,
    };
    pub use synthfix_model::{ProgramSnapshot, SemanticModel, SnapshotBuilder};

    pub use crate::{Workspace, WorkspaceError};
}
