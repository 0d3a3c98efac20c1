//! Host-side session over a program snapshot.
//!
//! A `Workspace` collects type entries, seals them into an immutable
//! [`ProgramSnapshot`], and then moves from snapshot to snapshot as code
//! actions are applied.
//!
//! # Example
//!
//! ```
//! use synthfix::prelude::*;
//!
//! let runner = TypeHash::from_name("IRunner");
//! let mut workspace = Workspace::new();
//! workspace.install(InterfaceEntry::new("IRunner").with_member(MemberEntry::method(
//!     TypeHash::EMPTY,
//!     "Run",
//!     vec![],
//!     DataType::Void,
//! )))?;
//! workspace.install(
//!     ClassEntry::new("Derived")
//!         .with_interface(TypeRef::new(runner))
//!         .with_member(MemberEntry::field(TypeHash::EMPTY, "inner", DataType::named(runner))),
//! )?;
//! workspace.seal()?;
//!
//! let cancel = CancellationToken::new();
//! let target = Selection::Type(TypeHash::from_name("Derived"));
//! let actions = workspace.actions(target, &cancel)?;
//! workspace.apply(&actions[0], &cancel)?;
//!
//! assert_eq!(workspace.version(), Some(1));
//! assert!(workspace.actions(target, &cancel)?.is_empty());
//! # Ok::<(), synthfix::WorkspaceError>(())
//! ```

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use synthfix_core::{RegistrationError, TypeEntry};
use synthfix_fixes::{
    CancellationToken, Cancelled, CodeAction, FixContext, FixError, FixOptions, ProviderRegistry,
    Selection, compute_actions,
};
use synthfix_model::{ProgramSnapshot, SnapshotBuilder};

/// A program under edit.
#[derive(Debug)]
pub struct Workspace {
    /// Pending registrations (consumed on seal).
    builder: Option<SnapshotBuilder>,
    /// Current snapshot (available after seal).
    snapshot: Option<Arc<ProgramSnapshot>>,
    registry: ProviderRegistry,
    options: FixOptions,
}

impl Workspace {
    /// Create an empty workspace with the bundled providers.
    pub fn new() -> Self {
        Self {
            builder: Some(SnapshotBuilder::new()),
            snapshot: None,
            registry: ProviderRegistry::with_defaults(),
            options: FixOptions::default(),
        }
    }

    // === Builder Methods ===

    /// Replace the provider registry.
    pub fn with_registry(mut self, registry: ProviderRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the fix options used for every request.
    pub fn with_options(mut self, options: FixOptions) -> Self {
        self.options = options;
        self
    }

    // === Registration ===

    /// Register a type.
    ///
    /// # Errors
    ///
    /// Returns `WorkspaceError::AlreadySealed` after [`seal`](Self::seal), or
    /// the registration error for duplicate types and members.
    pub fn install(&mut self, entry: impl Into<TypeEntry>) -> Result<(), WorkspaceError> {
        let Some(builder) = self.builder.as_mut() else {
            return Err(WorkspaceError::AlreadySealed);
        };
        builder.register(entry)?;
        Ok(())
    }

    /// Build the initial snapshot. Calling `seal` again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if a supertype is unknown or inheritance is cyclic.
    /// The pending registrations are kept, so the caller can install the
    /// missing types and seal again.
    pub fn seal(&mut self) -> Result<(), WorkspaceError> {
        if self.is_sealed() {
            return Ok(());
        }
        let Some(builder) = self.builder.as_ref() else {
            return Err(WorkspaceError::NotSealed);
        };
        let snapshot = builder.clone().build()?;
        info!(types = snapshot.type_count(), "workspace sealed");
        self.builder = None;
        self.snapshot = Some(Arc::new(snapshot));
        Ok(())
    }

    pub fn is_sealed(&self) -> bool {
        self.snapshot.is_some()
    }

    // === Queries ===

    /// Current snapshot.
    pub fn snapshot(&self) -> Option<&Arc<ProgramSnapshot>> {
        self.snapshot.as_ref()
    }

    /// Version of the current snapshot.
    pub fn version(&self) -> Option<u64> {
        self.snapshot.as_ref().map(|s| s.version())
    }

    pub fn options(&self) -> &FixOptions {
        &self.options
    }

    // === Fixes ===

    /// Code actions for a selection in the current snapshot.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn actions(
        &self,
        selection: Selection,
        cancel: &CancellationToken,
    ) -> Result<Vec<CodeAction>, WorkspaceError> {
        let snapshot = self.snapshot.as_ref().ok_or(WorkspaceError::NotSealed)?;
        let context = FixContext::new(Arc::clone(snapshot), selection)
            .with_options(self.options.clone())
            .with_cancellation(cancel.clone());
        Ok(compute_actions(&self.registry, &context)?)
    }

    /// Apply an action computed from the current snapshot and advance to
    /// the resulting one.
    ///
    /// # Errors
    ///
    /// Returns `WorkspaceError::StaleAction` if the workspace has moved on
    /// since the action was computed. On any error the current snapshot is
    /// kept.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn apply(
        &mut self,
        action: &CodeAction,
        cancel: &CancellationToken,
    ) -> Result<u64, WorkspaceError> {
        let current = self.version().ok_or(WorkspaceError::NotSealed)?;
        if let Some(leaf) = action.as_leaf()
            && leaf.snapshot_version() != current
        {
            return Err(WorkspaceError::StaleAction {
                action: leaf.snapshot_version(),
                current,
            });
        }

        let snapshot = action.apply(cancel)?;
        let version = snapshot.version();
        debug!(action = %action.title(), version, "workspace advanced");
        self.snapshot = Some(Arc::new(snapshot));
        Ok(version)
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur during workspace operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkspaceError {
    /// Types cannot be installed once the snapshot is built.
    #[error("workspace is already sealed - cannot install types after seal()")]
    AlreadySealed,

    /// Queries need a snapshot.
    #[error("workspace is not sealed - call seal() first")]
    NotSealed,

    /// The action was computed from an older snapshot.
    #[error("action computed from snapshot {action}, workspace is at {current}")]
    StaleAction { action: u64, current: u64 },

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Fix(#[from] FixError),

    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}
