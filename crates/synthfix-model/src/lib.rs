//! Program snapshots and semantic queries for synthfix.
//!
//! - [`SnapshotBuilder`] / [`ProgramSnapshot`] - immutable whole-program view
//! - [`HierarchyIndex`] - precomputed ancestor and supertype relations
//! - [`SemanticModel`] - the query facade the fix pipeline consumes
//! - [`assignability`], [`display`] - type compatibility and display names

pub mod assignability;
pub mod display;
mod facade;
mod hierarchy;
mod snapshot;

pub use assignability::{Assignability, check_assignable};
pub use display::{display_name, type_expr, type_ref_name};
pub use facade::{SemanticModel, Symbol};
pub use hierarchy::{HierarchyIndex, SupertypeKind};
pub use snapshot::{ProgramSnapshot, SnapshotBuilder};
