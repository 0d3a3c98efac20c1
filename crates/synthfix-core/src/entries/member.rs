//! Member entries: fields, properties and methods.
//!
//! Members are a tagged variant ([`MemberKind`]) with a payload per kind.
//! Everything that inspects members matches on the tag exhaustively.

use bitflags::bitflags;

use crate::{DataType, Operator, Span, TypeHash, TypeRef, Visibility};

use super::MemberSource;

bitflags! {
    /// Declaration modifiers of a member.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MemberModifiers: u8 {
        /// No body; must be overridden by a concrete descendant.
        const ABSTRACT = 1 << 0;
        /// Has a body that descendants may override.
        const VIRTUAL = 1 << 1;
        /// Overrides an inherited abstract or virtual member.
        const OVERRIDE = 1 << 2;
        /// Belongs to the type rather than an instance.
        const STATIC = 1 << 3;
        /// Override that may not be overridden further.
        const SEALED = 1 << 4;
    }
}

/// A method or operator parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    pub name: String,
    pub data_type: DataType,
}

impl Param {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Field payload.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub data_type: DataType,
}

/// Property payload.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDef {
    pub data_type: DataType,
    pub has_getter: bool,
    pub has_setter: bool,
}

/// Method payload. Operators are static methods with an operator tag.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
    pub params: Vec<Param>,
    pub return_type: DataType,
    pub operator: Option<Operator>,
}

/// Kind of a member together with its kind-specific data.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberKind {
    Field(FieldDef),
    Property(PropertyDef),
    Method(MethodDef),
}

/// Coarse member category, used for style lookups and placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberCategory {
    Field,
    Property,
    Method,
    Operator,
}

/// Identity of a member for override and implementation matching.
///
/// Two members with equal signatures occupy the same slot: an override
/// fills an abstract member's slot, an implicit implementation fills an
/// interface member's slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberSignature {
    pub name: String,
    pub category: MemberCategory,
    pub params: Vec<DataType>,
}

/// Registry entry for a member declared on a type.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberEntry {
    /// Simple name (operators use their token).
    pub name: String,
    /// Declaring type.
    pub owner: TypeHash,
    /// Kind and payload.
    pub kind: MemberKind,
    /// Declared accessibility.
    pub visibility: Visibility,
    /// Declaration modifiers.
    pub modifiers: MemberModifiers,
    /// Interface this member explicitly implements (`IShape.Area`).
    pub explicit_interface: Option<TypeRef>,
    /// Origin.
    pub source: MemberSource,
}

impl MemberEntry {
    fn new(owner: TypeHash, name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            owner,
            kind,
            visibility: Visibility::Public,
            modifiers: MemberModifiers::empty(),
            explicit_interface: None,
            source: MemberSource::Metadata,
        }
    }

    /// Create a field.
    pub fn field(owner: TypeHash, name: impl Into<String>, data_type: DataType) -> Self {
        Self::new(owner, name, MemberKind::Field(FieldDef { data_type }))
    }

    /// Create a read-write property.
    pub fn property(owner: TypeHash, name: impl Into<String>, data_type: DataType) -> Self {
        Self::new(
            owner,
            name,
            MemberKind::Property(PropertyDef {
                data_type,
                has_getter: true,
                has_setter: true,
            }),
        )
    }

    /// Create a method.
    pub fn method(
        owner: TypeHash,
        name: impl Into<String>,
        params: Vec<Param>,
        return_type: DataType,
    ) -> Self {
        Self::new(
            owner,
            name,
            MemberKind::Method(MethodDef {
                params,
                return_type,
                operator: None,
            }),
        )
    }

    /// Create a static operator.
    pub fn operator(owner: TypeHash, op: Operator, params: Vec<Param>, return_type: DataType) -> Self {
        let mut entry = Self::new(
            owner,
            op.token(),
            MemberKind::Method(MethodDef {
                params,
                return_type,
                operator: Some(op),
            }),
        );
        entry.modifiers |= MemberModifiers::STATIC;
        entry
    }

    // === Builder Methods ===

    /// Set the accessibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Add modifiers.
    pub fn with_modifiers(mut self, modifiers: MemberModifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    /// Mark as abstract.
    pub fn as_abstract(self) -> Self {
        self.with_modifiers(MemberModifiers::ABSTRACT)
    }

    /// Mark as virtual.
    pub fn as_virtual(self) -> Self {
        self.with_modifiers(MemberModifiers::VIRTUAL)
    }

    /// Mark as override.
    pub fn as_override(self) -> Self {
        self.with_modifiers(MemberModifiers::OVERRIDE)
    }

    /// Make a property read-only.
    pub fn read_only(mut self) -> Self {
        if let MemberKind::Property(p) = &mut self.kind {
            p.has_setter = false;
        }
        self
    }

    /// Mark as an explicit implementation of `interface`.
    ///
    /// Explicit implementations are only reachable through the interface.
    pub fn explicit_for(mut self, interface: TypeRef) -> Self {
        self.explicit_interface = Some(interface);
        self.visibility = Visibility::Private;
        self
    }

    /// Set the declaration span (marks the member as source-declared).
    pub fn with_span(mut self, span: Span) -> Self {
        self.source = MemberSource::source(span);
        self
    }

    /// Set the origin.
    pub fn with_source(mut self, source: MemberSource) -> Self {
        self.source = source;
        self
    }

    // === Query Methods ===

    /// Coarse category.
    pub fn category(&self) -> MemberCategory {
        match &self.kind {
            MemberKind::Field(_) => MemberCategory::Field,
            MemberKind::Property(_) => MemberCategory::Property,
            MemberKind::Method(m) if m.operator.is_some() => MemberCategory::Operator,
            MemberKind::Method(_) => MemberCategory::Method,
        }
    }

    /// Parameters (empty for fields and properties).
    pub fn params(&self) -> &[Param] {
        match &self.kind {
            MemberKind::Method(m) => &m.params,
            MemberKind::Field(_) | MemberKind::Property(_) => &[],
        }
    }

    /// Operator tag, if this is an operator.
    pub fn operator_kind(&self) -> Option<Operator> {
        match &self.kind {
            MemberKind::Method(m) => m.operator,
            MemberKind::Field(_) | MemberKind::Property(_) => None,
        }
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(MemberModifiers::ABSTRACT)
    }

    pub fn is_override(&self) -> bool {
        self.modifiers.contains(MemberModifiers::OVERRIDE)
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(MemberModifiers::STATIC)
    }

    pub fn is_explicit(&self) -> bool {
        self.explicit_interface.is_some()
    }

    /// Override/implementation slot identity.
    pub fn signature(&self) -> MemberSignature {
        MemberSignature {
            name: self.name.clone(),
            category: self.category(),
            params: self.params().iter().map(|p| p.data_type.clone()).collect(),
        }
    }

    /// Identity hash, distinct for explicit implementations.
    pub fn member_hash(&self) -> TypeHash {
        let params: Vec<TypeHash> = self
            .params()
            .iter()
            .map(|p| p.data_type.signature_hash())
            .collect();
        let owner = match &self.explicit_interface {
            Some(iface) => TypeHash::from_instance(self.owner, &[iface.signature_hash()]),
            None => self.owner,
        };
        match self.operator_kind() {
            Some(op) => TypeHash::from_operator(owner, op.token(), &params),
            None => TypeHash::from_member(owner, &self.name, &params),
        }
    }

    /// Copy of this member with type parameters replaced by arguments.
    ///
    /// Used to view an interface member through a concrete instantiation
    /// (`CompareTo(T)` on `IComparable<Base>` becomes `CompareTo(Base)`).
    pub fn substituted(&self, params: &[TypeHash], args: &[DataType]) -> MemberEntry {
        let mut copy = self.clone();
        if let Some(iface) = &mut copy.explicit_interface {
            *iface = iface.substitute(params, args);
        }
        match &mut copy.kind {
            MemberKind::Field(f) => f.data_type = f.data_type.substitute(params, args),
            MemberKind::Property(p) => p.data_type = p.data_type.substitute(params, args),
            MemberKind::Method(m) => {
                m.return_type = m.return_type.substitute(params, args);
                for param in &mut m.params {
                    param.data_type = param.data_type.substitute(params, args);
                }
            }
        }
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PrimitiveKind;

    fn owner() -> TypeHash {
        TypeHash::from_name("Base")
    }

    #[test]
    fn field_defaults() {
        let field = MemberEntry::field(owner(), "inner", DataType::named(owner()));
        assert_eq!(field.category(), MemberCategory::Field);
        assert_eq!(field.visibility, Visibility::Public);
        assert!(field.params().is_empty());
        assert!(!field.is_explicit());
    }

    #[test]
    fn operator_is_static() {
        let op = MemberEntry::operator(
            owner(),
            Operator::Less,
            vec![
                Param::new("left", DataType::named(owner())),
                Param::new("right", DataType::named(owner())),
            ],
            DataType::primitive(PrimitiveKind::Bool),
        );
        assert!(op.is_static());
        assert_eq!(op.category(), MemberCategory::Operator);
        assert_eq!(op.operator_kind(), Some(Operator::Less));
        assert_eq!(op.name, "<");
    }

    #[test]
    fn explicit_member_is_private_and_distinct() {
        let iface = TypeRef::new(TypeHash::from_name("IInterface"));
        let implicit = MemberEntry::property(owner(), "Inner", DataType::named(owner()));
        let explicit = implicit.clone().explicit_for(iface);

        assert_eq!(explicit.visibility, Visibility::Private);
        assert_ne!(implicit.member_hash(), explicit.member_hash());
        assert_eq!(implicit.signature(), explicit.signature());
    }

    #[test]
    fn read_only_property() {
        let prop = MemberEntry::property(owner(), "Size", DataType::primitive(PrimitiveKind::Int))
            .read_only();
        match prop.kind {
            MemberKind::Property(p) => {
                assert!(p.has_getter);
                assert!(!p.has_setter);
            }
            _ => panic!("Expected property"),
        }
    }

    #[test]
    fn substituted_rewrites_params_and_return() {
        let iface = TypeHash::from_name("System.IComparable");
        let t = TypeHash::from_type_param(iface, "T");
        let compare = MemberEntry::method(
            iface,
            "CompareTo",
            vec![Param::new("other", DataType::param(t))],
            DataType::primitive(PrimitiveKind::Int),
        );

        let closed = compare.substituted(&[t], &[DataType::named(owner())]);
        assert_eq!(closed.params()[0].data_type, DataType::named(owner()));
        match &closed.kind {
            MemberKind::Method(m) => assert_eq!(m.return_type, DataType::primitive(PrimitiveKind::Int)),
            other => panic!("expected method, got {other:?}"),
        }
    }

    #[test]
    fn signature_ignores_owner() {
        let a = MemberEntry::method(owner(), "Method", vec![], DataType::Void).as_abstract();
        let b = MemberEntry::method(TypeHash::from_name("Derived"), "Method", vec![], DataType::Void)
            .as_override();
        assert_eq!(a.signature(), b.signature());
        assert_ne!(a.member_hash(), b.member_hash());
    }
}
