//! Semantic model facade.
//!
//! [`SemanticModel`] is the read-only query surface the fix pipeline runs
//! against. [`ProgramSnapshot`] implements it directly; hosts with their own
//! semantic graph implement the trait over it instead.

use synthfix_core::{DataType, MemberEntry, TypeEntry, TypeHash, TypeRef};

use crate::{Assignability, ProgramSnapshot, assignability, display};

/// Symbol found at a document offset.
#[derive(Debug, Clone, Copy)]
pub enum Symbol<'a> {
    /// A type declaration.
    Type(&'a TypeEntry),
    /// A member declaration, with its declaring type.
    Member(&'a TypeEntry, &'a MemberEntry),
}

impl<'a> Symbol<'a> {
    /// The type declaring this symbol (or the type itself).
    pub fn containing_type(&self) -> &'a TypeEntry {
        match self {
            Symbol::Type(ty) => ty,
            Symbol::Member(ty, _) => ty,
        }
    }
}

/// Read-only queries over types, members and interfaces.
pub trait SemanticModel: Send + Sync {
    /// Innermost declaration containing `offset`.
    fn resolve_symbol_at(&self, offset: u32) -> Option<Symbol<'_>>;

    /// Look up a type.
    fn type_entry(&self, ty: TypeHash) -> Option<&TypeEntry>;

    /// Base class chain, nearest first.
    fn ancestors_of(&self, ty: TypeHash) -> &[TypeRef];

    /// Members of a type, as seen from that type.
    ///
    /// With `include_inherited`, members of every ancestor follow the type's
    /// own, nearest ancestor first, with generic arguments substituted.
    fn members_of(&self, ty: TypeHash, include_inherited: bool) -> Vec<MemberEntry>;

    /// All implemented interface instantiations, declaration order.
    fn implemented_interfaces_of(&self, ty: TypeHash) -> Vec<TypeRef>;

    /// Member of `ty` that implements `member` of `interface`, if any.
    ///
    /// An explicit implementation wins over an implicit one.
    fn resolve_interface_member_implementation(
        &self,
        ty: TypeHash,
        interface: &TypeRef,
        member: &MemberEntry,
    ) -> Option<MemberEntry>;

    /// Assignability of a declared type to an instantiation.
    fn check_assignable(&self, ty: &DataType, target: &TypeRef) -> Assignability;

    /// Minimally qualified display name.
    fn display_name(&self, ty: &DataType) -> String;
}

impl SemanticModel for ProgramSnapshot {
    fn resolve_symbol_at(&self, offset: u32) -> Option<Symbol<'_>> {
        let ty = self
            .types()
            .filter(|t| t.source().span().is_some_and(|s| s.contains(offset)))
            .min_by_key(|t| t.source().span().map_or(u32::MAX, |s| s.len()))?;

        let member = ty
            .members()
            .iter()
            .find(|m| m.source.span().is_some_and(|s| s.contains(offset)));

        Some(match member {
            Some(member) => Symbol::Member(ty, member),
            None => Symbol::Type(ty),
        })
    }

    fn type_entry(&self, ty: TypeHash) -> Option<&TypeEntry> {
        self.get(ty)
    }

    fn ancestors_of(&self, ty: TypeHash) -> &[TypeRef] {
        self.hierarchy().ancestors(ty)
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    fn members_of(&self, ty: TypeHash, include_inherited: bool) -> Vec<MemberEntry> {
        let mut members: Vec<MemberEntry> = self
            .get(ty)
            .map(|entry| entry.members().to_vec())
            .unwrap_or_default();

        if include_inherited {
            for ancestor in self.ancestors_of(ty) {
                let Some(entry) = self.get(ancestor.definition) else {
                    continue;
                };
                let params = self.hierarchy().params(ancestor.definition);
                members.extend(
                    entry
                        .members()
                        .iter()
                        .map(|m| m.substituted(params, &ancestor.args)),
                );
            }
        }

        members
    }

    fn implemented_interfaces_of(&self, ty: TypeHash) -> Vec<TypeRef> {
        self.hierarchy().interfaces(ty).cloned().collect()
    }

    fn resolve_interface_member_implementation(
        &self,
        ty: TypeHash,
        interface: &TypeRef,
        member: &MemberEntry,
    ) -> Option<MemberEntry> {
        let params = self.hierarchy().params(interface.definition);
        let expected = member.substituted(params, &interface.args).signature();
        let members = self.members_of(ty, true);

        let explicit = members.iter().find(|m| {
            m.explicit_interface.as_ref() == Some(interface) && m.signature() == expected
        });
        let implicit = || {
            members.iter().find(|m| {
                !m.is_explicit()
                    && !m.is_static()
                    && m.visibility.is_public()
                    && m.signature() == expected
            })
        };

        explicit.or_else(implicit).cloned()
    }

    fn check_assignable(&self, ty: &DataType, target: &TypeRef) -> Assignability {
        assignability::check_assignable(self, ty, target)
    }

    fn display_name(&self, ty: &DataType) -> String {
        display::display_name(self, ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synthfix_core::{ClassEntry, InterfaceEntry, Param, PrimitiveKind, Span, Visibility};

    use crate::SnapshotBuilder;

    fn h(name: &str) -> TypeHash {
        TypeHash::from_name(name)
    }

    fn int() -> DataType {
        DataType::primitive(PrimitiveKind::Int)
    }

    fn comparable() -> InterfaceEntry {
        let iface = InterfaceEntry::new("System.IComparable").with_type_param("T");
        let t = iface.type_param("T").unwrap();
        iface.with_member(MemberEntry::method(
            TypeHash::EMPTY,
            "CompareTo",
            vec![Param::new("other", DataType::param(t))],
            int(),
        ))
    }

    fn comparable_of(name: &str) -> TypeRef {
        TypeRef::generic(h("System.IComparable"), vec![DataType::named(h(name))])
    }

    fn compare_to(arg: &str) -> MemberEntry {
        MemberEntry::method(
            TypeHash::EMPTY,
            "CompareTo",
            vec![Param::new("other", DataType::named(h(arg)))],
            int(),
        )
    }

    fn build(entries: Vec<TypeEntry>) -> ProgramSnapshot {
        let mut builder = SnapshotBuilder::new();
        for entry in entries {
            builder.register(entry).unwrap();
        }
        builder.build().unwrap()
    }

    #[test]
    fn resolve_symbol_at_prefers_members() {
        let base = ClassEntry::new("Base")
            .with_span(Span::new(0, 100))
            .with_member(
                MemberEntry::field(TypeHash::EMPTY, "inner", int()).with_span(Span::new(20, 10)),
            );
        let snapshot = build(vec![base.into()]);

        match snapshot.resolve_symbol_at(25) {
            Some(Symbol::Member(ty, member)) => {
                assert_eq!(ty.name(), "Base");
                assert_eq!(member.name, "inner");
            }
            other => panic!("Expected member, got {:?}", other),
        }
        assert!(matches!(snapshot.resolve_symbol_at(5), Some(Symbol::Type(_))));
        assert!(snapshot.resolve_symbol_at(500).is_none());
    }

    #[test]
    fn members_of_includes_ancestors_in_order() {
        let base = ClassEntry::new("Base")
            .as_abstract()
            .with_member(
                MemberEntry::method(TypeHash::EMPTY, "Method", vec![], DataType::Void).as_abstract(),
            );
        let derived = ClassEntry::new("Derived")
            .with_base(TypeRef::new(h("Base")))
            .with_member(MemberEntry::field(
                TypeHash::EMPTY,
                "inner",
                DataType::named(h("Derived")),
            ));
        let snapshot = build(vec![base.into(), derived.into()]);

        let names = |inherited| -> Vec<String> {
            snapshot
                .members_of(h("Derived"), inherited)
                .into_iter()
                .map(|m| m.name)
                .collect()
        };
        let own = names(false);
        let all = names(true);
        assert_eq!(own, vec!["inner"]);
        assert_eq!(all, vec!["inner", "Method"]);
    }

    #[test]
    fn inherited_generic_members_are_substituted() {
        let holder = ClassEntry::new("Holder").with_type_param("T", vec![]);
        let t = holder.type_param("T").unwrap();
        let take = MemberEntry::method(
            TypeHash::EMPTY,
            "Take",
            vec![Param::new("value", DataType::param(t))],
            DataType::Void,
        );
        let holder = holder.as_abstract().with_member(take.as_abstract());
        let concrete =
            ClassEntry::new("IntHolder").with_base(TypeRef::generic(h("Holder"), vec![int()]));
        let snapshot = build(vec![holder.into(), concrete.into()]);

        let members = snapshot.members_of(h("IntHolder"), true);
        assert_eq!(members[0].params()[0].data_type, int());
    }

    #[test]
    fn implicit_implementation_must_be_public() {
        let base = ClassEntry::new("Base")
            .with_interface(comparable_of("Base"))
            .with_member(compare_to("Base").with_visibility(Visibility::Internal));
        let snapshot = build(vec![comparable().into(), base.into()]);
        let cmp = comparable();
        let method = cmp.find_member("CompareTo").unwrap();

        assert!(
            snapshot
                .resolve_interface_member_implementation(h("Base"), &comparable_of("Base"), method)
                .is_none()
        );
    }

    #[test]
    fn explicit_implementation_wins() {
        let base = ClassEntry::new("Base")
            .with_interface(comparable_of("Base"))
            .with_member(compare_to("Base").with_span(Span::new(0, 1)))
            .with_member(compare_to("Base").explicit_for(comparable_of("Base")));
        let snapshot = build(vec![comparable().into(), base.into()]);
        let cmp = comparable();
        let method = cmp.find_member("CompareTo").unwrap();

        let resolved = snapshot
            .resolve_interface_member_implementation(h("Base"), &comparable_of("Base"), method)
            .unwrap();
        assert!(resolved.is_explicit());
        assert_eq!(resolved.visibility, Visibility::Private);
    }

    #[test]
    fn implementation_matches_instantiation() {
        let base = ClassEntry::new("Base")
            .with_interface(comparable_of("Base"))
            .with_interface(comparable_of("Other"))
            .with_member(compare_to("Base"));
        let other = ClassEntry::new("Other");
        let snapshot = build(vec![comparable().into(), other.into(), base.into()]);
        let cmp = comparable();
        let method = cmp.find_member("CompareTo").unwrap();

        assert_eq!(snapshot.implemented_interfaces_of(h("Base")).len(), 2);
        assert!(
            snapshot
                .resolve_interface_member_implementation(h("Base"), &comparable_of("Base"), method)
                .is_some()
        );
        assert!(
            snapshot
                .resolve_interface_member_implementation(h("Base"), &comparable_of("Other"), method)
                .is_none()
        );
    }
}
