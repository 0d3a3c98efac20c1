//! TypeEntry enum for unified type storage.
//!
//! This module provides `TypeEntry`, a single enum that wraps all type entry
//! kinds for unified storage and iteration in the snapshot.

use crate::{QualifiedName, TypeHash, TypeRef};

use super::{ClassEntry, InterfaceEntry, MemberEntry, TypeParamEntry, TypeSource};

/// Unified type entry for snapshot storage.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeEntry {
    /// Class or struct type (including generic definitions).
    Class(ClassEntry),
    /// Interface type.
    Interface(InterfaceEntry),
}

impl TypeEntry {
    /// Get the type hash for this entry.
    pub fn type_hash(&self) -> TypeHash {
        match self {
            TypeEntry::Class(e) => e.type_hash,
            TypeEntry::Interface(e) => e.type_hash,
        }
    }

    /// Get the unqualified name.
    pub fn name(&self) -> &str {
        match self {
            TypeEntry::Class(e) => &e.name,
            TypeEntry::Interface(e) => &e.name,
        }
    }

    /// Get the qualified name (with namespace).
    pub fn qualified_name(&self) -> &QualifiedName {
        match self {
            TypeEntry::Class(e) => &e.qualified_name,
            TypeEntry::Interface(e) => &e.qualified_name,
        }
    }

    /// Get the source (document or metadata).
    pub fn source(&self) -> &TypeSource {
        match self {
            TypeEntry::Class(e) => &e.source,
            TypeEntry::Interface(e) => &e.source,
        }
    }

    /// Directly declared members.
    pub fn members(&self) -> &[MemberEntry] {
        match self {
            TypeEntry::Class(e) => &e.members,
            TypeEntry::Interface(e) => &e.members,
        }
    }

    /// Declared type parameters.
    pub fn type_params(&self) -> &[TypeParamEntry] {
        match self {
            TypeEntry::Class(e) => &e.type_params,
            TypeEntry::Interface(e) => &e.type_params,
        }
    }

    /// Directly named supertypes: base class first, then interfaces.
    pub fn direct_supertypes(&self) -> impl Iterator<Item = &TypeRef> {
        let (base, interfaces) = match self {
            TypeEntry::Class(e) => (e.base_class.as_ref(), e.interfaces.as_slice()),
            TypeEntry::Interface(e) => (None, e.base_interfaces.as_slice()),
        };
        base.into_iter().chain(interfaces)
    }

    // === Type Checks ===

    /// Check if this is a class type.
    pub fn is_class(&self) -> bool {
        matches!(self, TypeEntry::Class(_))
    }

    /// Check if this is an interface type.
    pub fn is_interface(&self) -> bool {
        matches!(self, TypeEntry::Interface(_))
    }

    // === Downcasting ===

    /// Get as a class entry.
    pub fn as_class(&self) -> Option<&ClassEntry> {
        match self {
            TypeEntry::Class(e) => Some(e),
            _ => None,
        }
    }

    /// Get as an interface entry.
    pub fn as_interface(&self) -> Option<&InterfaceEntry> {
        match self {
            TypeEntry::Interface(e) => Some(e),
            _ => None,
        }
    }

    /// Directly declared members, mutably.
    pub fn members_mut(&mut self) -> &mut Vec<MemberEntry> {
        match self {
            TypeEntry::Class(e) => &mut e.members,
            TypeEntry::Interface(e) => &mut e.members,
        }
    }
}

impl From<ClassEntry> for TypeEntry {
    fn from(entry: ClassEntry) -> Self {
        TypeEntry::Class(entry)
    }
}

impl From<InterfaceEntry> for TypeEntry {
    fn from(entry: InterfaceEntry) -> Self {
        TypeEntry::Interface(entry)
    }
}
