//! ProgramSnapshot - immutable whole-program view.
//!
//! A snapshot owns every type entry (behind `Arc`, so derived snapshots
//! share unchanged types) plus the [`HierarchyIndex`] built for it. Edits
//! never mutate a snapshot; they derive a new one with an incremented
//! version and the edited type replaced.
//!
//! # Example
//!
//! ```
//! use synthfix_core::{ClassEntry, TypeHash, TypeRef};
//! use synthfix_model::SnapshotBuilder;
//!
//! let snapshot = SnapshotBuilder::new()
//!     .with(ClassEntry::new("Base").as_abstract())?
//!     .with(ClassEntry::new("Derived").with_base(TypeRef::new(TypeHash::from_name("Base"))))?
//!     .build()?;
//!
//! assert_eq!(snapshot.version(), 0);
//! assert_eq!(snapshot.hierarchy().ancestors(TypeHash::from_name("Derived")).len(), 1);
//! # Ok::<(), synthfix_core::RegistrationError>(())
//! ```

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use synthfix_core::{
    ClassEntry, EditError, RegistrationError, TypeEntry, TypeHash, TypeParamEntry,
};

use crate::HierarchyIndex;

/// Collects type entries and validates them into a [`ProgramSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    types: FxHashMap<TypeHash, TypeEntry>,
    order: Vec<TypeHash>,
}

impl SnapshotBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type entry.
    ///
    /// Returns an error if a type with the same qualified name already
    /// exists, or if two members of the entry share an identity.
    pub fn register(&mut self, entry: impl Into<TypeEntry>) -> Result<(), RegistrationError> {
        let entry = entry.into();
        let hash = entry.type_hash();

        if self.types.contains_key(&hash) {
            return Err(RegistrationError::DuplicateType(
                entry.qualified_name().to_string(),
            ));
        }

        let mut seen = FxHashSet::default();
        for member in entry.members() {
            if !seen.insert(member.member_hash()) {
                return Err(RegistrationError::DuplicateMember {
                    type_name: entry.qualified_name().to_string(),
                    member: member.name.clone(),
                });
            }
        }

        self.order.push(hash);
        self.types.insert(hash, entry);
        Ok(())
    }

    /// Register a type entry, builder style.
    pub fn with(mut self, entry: impl Into<TypeEntry>) -> Result<Self, RegistrationError> {
        self.register(entry)?;
        Ok(self)
    }

    /// Validate the inheritance graph and freeze the snapshot.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn build(self) -> Result<ProgramSnapshot, RegistrationError> {
        let hierarchy = HierarchyIndex::build(self.order.iter().filter_map(|h| self.types.get(h)))?;

        let mut type_params = FxHashMap::default();
        for entry in self.types.values() {
            for (index, param) in entry.type_params().iter().enumerate() {
                type_params.insert(param.type_hash, (entry.type_hash(), index));
            }
        }

        let mut simple_names: FxHashMap<String, usize> = FxHashMap::default();
        for entry in self.types.values() {
            *simple_names.entry(entry.name().to_string()).or_default() += 1;
        }

        debug!(types = self.order.len(), "built program snapshot");

        Ok(ProgramSnapshot {
            version: 0,
            types: self
                .types
                .into_iter()
                .map(|(hash, entry)| (hash, Arc::new(entry)))
                .collect(),
            order: Arc::new(self.order),
            type_params: Arc::new(type_params),
            simple_names: Arc::new(simple_names),
            hierarchy: Arc::new(hierarchy),
        })
    }
}

/// Immutable whole-program view.
///
/// Cloning is cheap; derived snapshots share unchanged entries and the
/// hierarchy index with their parent.
#[derive(Debug, Clone)]
pub struct ProgramSnapshot {
    version: u64,
    types: FxHashMap<TypeHash, Arc<TypeEntry>>,
    order: Arc<Vec<TypeHash>>,
    /// Type parameter hash -> (owner, index into the owner's parameters).
    type_params: Arc<FxHashMap<TypeHash, (TypeHash, usize)>>,
    /// Simple name -> number of types using it.
    simple_names: Arc<FxHashMap<String, usize>>,
    hierarchy: Arc<HierarchyIndex>,
}

impl ProgramSnapshot {
    /// Edit generation; 0 for a freshly built snapshot.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The hierarchy index.
    pub fn hierarchy(&self) -> &HierarchyIndex {
        &self.hierarchy
    }

    // === Type Lookup ===

    /// Get a type by hash.
    pub fn get(&self, hash: TypeHash) -> Option<&TypeEntry> {
        self.types.get(&hash).map(Arc::as_ref)
    }

    /// Get a type by qualified name (e.g., "System.IComparable").
    pub fn get_by_name(&self, name: &str) -> Option<&TypeEntry> {
        self.get(TypeHash::from_name(name))
    }

    /// Get a class entry by hash.
    pub fn get_class(&self, hash: TypeHash) -> Option<&ClassEntry> {
        self.get(hash).and_then(TypeEntry::as_class)
    }

    /// Get a type parameter by hash.
    pub fn type_param(&self, hash: TypeHash) -> Option<&TypeParamEntry> {
        let (owner, index) = self.type_params.get(&hash)?;
        self.get(*owner)?.type_params().get(*index)
    }

    /// Check if a type exists.
    pub fn contains(&self, hash: TypeHash) -> bool {
        self.types.contains_key(&hash)
    }

    /// All types in registration order.
    pub fn types(&self) -> impl Iterator<Item = &TypeEntry> {
        self.order.iter().filter_map(|h| self.get(*h))
    }

    /// Number of types.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Check if more than one type uses this simple name.
    pub fn is_simple_name_ambiguous(&self, name: &str) -> bool {
        self.simple_names.get(name).is_some_and(|count| *count > 1)
    }

    // === Derivation ===

    /// Derive a snapshot with one type replaced.
    ///
    /// The replacement must keep the type's supertypes and type parameters,
    /// so the hierarchy index carries over unchanged. `self` is untouched.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn with_type_replaced(&self, entry: TypeEntry) -> Result<ProgramSnapshot, EditError> {
        let hash = entry.type_hash();
        let Some(existing) = self.get(hash) else {
            return Err(EditError::UnknownTarget(entry.qualified_name().to_string()));
        };

        let same_shape = existing.type_params() == entry.type_params()
            && existing.direct_supertypes().eq(entry.direct_supertypes());
        if !same_shape {
            return Err(EditError::InvalidTarget(entry.qualified_name().to_string()));
        }

        let mut types = self.types.clone();
        types.insert(hash, Arc::new(entry));

        let derived = ProgramSnapshot {
            version: self.version + 1,
            types,
            order: Arc::clone(&self.order),
            type_params: Arc::clone(&self.type_params),
            simple_names: Arc::clone(&self.simple_names),
            hierarchy: Arc::clone(&self.hierarchy),
        };
        debug!(version = derived.version, "derived program snapshot");
        Ok(derived)
    }
}
