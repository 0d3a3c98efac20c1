//! Code fixes for synthfix.
//!
//! This crate turns a selection in a [`ProgramSnapshot`] into code actions:
//!
//! ```text
//! compute_actions ─► providers ─► discovery ─► labels/packaging ─► CodeAction
//!                                                                     │ apply
//!                              SnapshotEditor ◄─ StrategyRegistry ◄───┘
//! ```
//!
//! Two feature families are bundled:
//!
//! - implementing an abstract class or interface by delegating every
//!   unimplemented member to a field or property that already implements it
//! - generating `<`, `<=`, `>`, `>=` for types implementing a comparable
//!   contract
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use synthfix_core::{ClassEntry, DataType, InterfaceEntry, MemberEntry, TypeHash, TypeRef};
//! use synthfix_fixes::{compute_actions, CancellationToken, FixContext, ProviderRegistry, Selection};
//! use synthfix_model::SnapshotBuilder;
//!
//! let runner = TypeHash::from_name("IRunner");
//! let snapshot = SnapshotBuilder::new()
//!     .with(InterfaceEntry::new("IRunner").with_member(MemberEntry::method(
//!         TypeHash::EMPTY,
//!         "Run",
//!         vec![],
//!         DataType::Void,
//!     )))?
//!     .with(
//!         ClassEntry::new("Derived")
//!             .with_interface(TypeRef::new(runner))
//!             .with_member(MemberEntry::field(TypeHash::EMPTY, "inner", DataType::named(runner))),
//!     )?
//!     .build()?;
//!
//! let registry = ProviderRegistry::with_defaults();
//! let context = FixContext::new(
//!     Arc::new(snapshot),
//!     Selection::Type(TypeHash::from_name("Derived")),
//! );
//! let actions = compute_actions(&registry, &context)?;
//! assert_eq!(actions[0].title(), "Implement Interface");
//!
//! let fixed = actions[0].apply(&CancellationToken::new())?;
//! assert_eq!(fixed.version(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`ProgramSnapshot`]: synthfix_model::ProgramSnapshot

pub mod actions;
mod cancel;
pub mod discovery;
mod edit;
mod error;
mod options;
mod provider;
pub mod synthesis;

pub use actions::{CodeAction, CodeActionKind, LeafAction};
pub use cancel::{CancellationToken, Cancelled};
pub use discovery::{
    ComparisonContract, DelegationCandidate, Gap, GapKind, discover_comparison,
    discover_delegation, find_gaps,
};
pub use edit::{DocumentEditor, SnapshotEditor};
pub use error::FixError;
pub use options::{ExpressionBodyPreference, FixOptions, MemberPlacement, StyleOptions};
pub use provider::{
    CodeFixProvider, ComparisonOperatorsProvider, DEFAULT_LANGUAGE, DelegationProvider,
    FixContext, FixFeature, ProviderContext, ProviderKey, ProviderRegistry, Selection,
    compute_actions,
};
pub use synthesis::{
    Candidate, StrategyRegistry, StrategyTag, SynthesisContext, SynthesisFn, SynthesisPlan,
    SynthesizedMember,
};
