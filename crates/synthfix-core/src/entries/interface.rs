//! Interface type entry.

use crate::{QualifiedName, Span, TypeHash, TypeRef};

use super::{MemberEntry, TypeParamEntry, TypeSource};

/// Registry entry for an interface type.
///
/// Interface members are implicitly abstract; a class satisfies each one
/// either implicitly (a public member with the same signature) or explicitly
/// (`IShape.Area`).
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceEntry {
    /// Unqualified name.
    pub name: String,
    /// Fully qualified name (with namespace).
    pub qualified_name: QualifiedName,
    /// Type hash for identity.
    pub type_hash: TypeHash,
    /// Source (document or metadata).
    pub source: TypeSource,
    /// Required members.
    pub members: Vec<MemberEntry>,
    /// Base interface instantiations.
    pub base_interfaces: Vec<TypeRef>,
    /// Declared type parameters.
    pub type_params: Vec<TypeParamEntry>,
}

impl InterfaceEntry {
    /// Create a new interface entry from its qualified name.
    pub fn new(qualified_name: impl Into<QualifiedName>) -> Self {
        let qualified_name = qualified_name.into();
        Self {
            name: qualified_name.simple_name().to_string(),
            type_hash: qualified_name.to_type_hash(),
            qualified_name,
            source: TypeSource::Metadata,
            members: Vec::new(),
            base_interfaces: Vec::new(),
            type_params: Vec::new(),
        }
    }

    /// Add a member. The member is re-homed onto this interface.
    pub fn with_member(mut self, mut member: MemberEntry) -> Self {
        member.owner = self.type_hash;
        self.members.push(member);
        self
    }

    /// Add a base interface.
    pub fn with_base(mut self, base: TypeRef) -> Self {
        self.base_interfaces.push(base);
        self
    }

    /// Declare an unconstrained type parameter.
    pub fn with_type_param(mut self, name: &str) -> Self {
        self.type_params
            .push(TypeParamEntry::new(self.type_hash, name));
        self
    }

    /// Set the declaration span (marks the interface as source-declared).
    pub fn with_span(mut self, span: Span) -> Self {
        self.source = TypeSource::source(span);
        self
    }

    /// Hash of a declared type parameter.
    pub fn type_param(&self, name: &str) -> Option<TypeHash> {
        self.type_params
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.type_hash)
    }

    /// Hashes of all type parameters, in declaration order.
    pub fn type_param_hashes(&self) -> Vec<TypeHash> {
        self.type_params.iter().map(|p| p.type_hash).collect()
    }

    /// Find a member by name.
    pub fn find_member(&self, name: &str) -> Option<&MemberEntry> {
        self.members.iter().find(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DataType, Param, PrimitiveKind};

    #[test]
    fn interface_entry_creation() {
        let entry = InterfaceEntry::new("System.IComparable").with_type_param("T");

        assert_eq!(entry.name, "IComparable");
        assert_eq!(entry.qualified_name.namespace, vec!["System"]);
        assert!(entry.type_param("T").is_some());
        assert_eq!(entry.type_param_hashes().len(), 1);
        assert!(entry.members.is_empty());
    }

    #[test]
    fn interface_members_are_rehomed() {
        let entry = InterfaceEntry::new("IShape").with_member(MemberEntry::method(
            TypeHash::EMPTY,
            "Area",
            vec![Param::new("scale", DataType::primitive(PrimitiveKind::Double))],
            DataType::primitive(PrimitiveKind::Double),
        ));

        let area = entry.find_member("Area").unwrap();
        assert_eq!(area.owner, entry.type_hash);
        assert!(entry.find_member("Perimeter").is_none());
    }

    #[test]
    fn interface_bases() {
        let base = TypeHash::from_name("IBase");
        let entry = InterfaceEntry::new("IDerived").with_base(TypeRef::new(base));
        assert_eq!(entry.base_interfaces, vec![TypeRef::new(base)]);
    }
}
