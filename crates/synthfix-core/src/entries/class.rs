//! Class type entry.
//!
//! This module provides `ClassEntry` for classes and structs, including
//! generic definitions. Structs share the representation; nothing in fix
//! discovery distinguishes them.

use crate::{DataType, QualifiedName, Span, TypeHash, TypeRef};

use super::{MemberEntry, TypeParamEntry, TypeSource};

/// Registry entry for a class or struct type.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassEntry {
    /// Unqualified name.
    pub name: String,
    /// Fully qualified name (with namespace).
    pub qualified_name: QualifiedName,
    /// Type hash for identity.
    pub type_hash: TypeHash,
    /// Source (document or metadata).
    pub source: TypeSource,

    // === Inheritance ===
    /// Base class (single inheritance).
    pub base_class: Option<TypeRef>,
    /// Implemented interface instantiations, in declaration order.
    pub interfaces: Vec<TypeRef>,

    // === Members ===
    /// Directly declared members, in declaration order.
    pub members: Vec<MemberEntry>,

    // === Generics ===
    /// Declared type parameters.
    pub type_params: Vec<TypeParamEntry>,

    // === Modifiers ===
    /// Class is marked `abstract`.
    pub is_abstract: bool,
}

impl ClassEntry {
    /// Create a new class entry from its qualified name.
    pub fn new(qualified_name: impl Into<QualifiedName>) -> Self {
        let qualified_name = qualified_name.into();
        Self {
            name: qualified_name.simple_name().to_string(),
            type_hash: qualified_name.to_type_hash(),
            qualified_name,
            source: TypeSource::Metadata,
            base_class: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            type_params: Vec::new(),
            is_abstract: false,
        }
    }

    // === Builder Methods ===

    /// Set the base class.
    pub fn with_base(mut self, base: TypeRef) -> Self {
        self.base_class = Some(base);
        self
    }

    /// Add an implemented interface.
    pub fn with_interface(mut self, interface: TypeRef) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Add a member. The member is re-homed onto this type.
    pub fn with_member(mut self, mut member: MemberEntry) -> Self {
        member.owner = self.type_hash;
        self.members.push(member);
        self
    }

    /// Declare a type parameter with the given constraints.
    pub fn with_type_param(mut self, name: &str, constraints: Vec<DataType>) -> Self {
        let mut param = TypeParamEntry::new(self.type_hash, name);
        param.constraints = constraints;
        self.type_params.push(param);
        self
    }

    /// Set the declaration span (marks the type as source-declared).
    pub fn with_span(mut self, span: Span) -> Self {
        self.source = TypeSource::source(span);
        self
    }

    /// Mark as abstract.
    pub fn as_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    // === Query Methods ===

    /// Hash of a declared type parameter.
    pub fn type_param(&self, name: &str) -> Option<TypeHash> {
        self.type_params
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.type_hash)
    }

    /// The type as seen from inside its own body (`Derived<T>` for generics).
    pub fn self_type(&self) -> DataType {
        DataType::generic(
            self.type_hash,
            self.type_params
                .iter()
                .map(|p| DataType::param(p.type_hash))
                .collect(),
        )
    }
}
