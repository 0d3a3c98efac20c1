//! Hierarchy Index - precomputed supertype relations for a snapshot.
//!
//! Uses `petgraph::DiGraph` with:
//! - Nodes: `TypeHash` of every registered type
//! - Edges: derived -> supertype, weighted by [`SupertypeKind`]
//!
//! The graph is only used for cycle detection and descendant walks. Ancestor
//! chains and transitive supertype lists are computed once at build time, in
//! topological order, with generic arguments substituted into the terms of
//! each type's own parameters. Compatibility checks then read plain data.

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, Reversed};
use rustc_hash::{FxHashMap, FxHashSet};

use synthfix_core::{RegistrationError, TypeEntry, TypeHash, TypeRef};

/// How a type names one of its direct supertypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupertypeKind {
    BaseClass,
    Interface,
}

/// Precomputed ancestor, supertype and descendant relations.
#[derive(Debug, Default)]
pub struct HierarchyIndex {
    /// Inheritance graph (derived -> supertype).
    graph: DiGraph<TypeHash, SupertypeKind>,

    /// TypeHash -> graph node.
    nodes: FxHashMap<TypeHash, NodeIndex>,

    /// Type parameter hashes per type, in declaration order.
    params: FxHashMap<TypeHash, Vec<TypeHash>>,

    /// Interface definitions.
    interfaces: FxHashSet<TypeHash>,

    /// Base class chain, nearest first.
    ancestors: FxHashMap<TypeHash, Vec<TypeRef>>,

    /// All transitive supertypes (classes and interfaces), declaration order,
    /// nearest first, without duplicates.
    supertypes: FxHashMap<TypeHash, Vec<TypeRef>>,

    /// All transitive descendants.
    descendants: FxHashMap<TypeHash, FxHashSet<TypeHash>>,
}

impl HierarchyIndex {
    /// Build the index over a complete set of types.
    ///
    /// Fails when a supertype reference names an unregistered type or when
    /// the inheritance graph has a cycle.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn build<'a>(
        types: impl IntoIterator<Item = &'a TypeEntry>,
    ) -> Result<Self, RegistrationError> {
        let entries: Vec<&TypeEntry> = types.into_iter().collect();
        let mut index = Self::default();

        for entry in &entries {
            let hash = entry.type_hash();
            let node = index.graph.add_node(hash);
            index.nodes.insert(hash, node);
            index.params.insert(
                hash,
                entry.type_params().iter().map(|p| p.type_hash).collect(),
            );
            if entry.is_interface() {
                index.interfaces.insert(hash);
            }
        }

        let mut direct: FxHashMap<TypeHash, Vec<TypeRef>> = FxHashMap::default();
        let mut base_of: FxHashMap<TypeHash, TypeRef> = FxHashMap::default();

        for entry in &entries {
            let hash = entry.type_hash();
            let from = index.nodes[&hash];
            if let Some(class) = entry.as_class()
                && let Some(base) = &class.base_class
            {
                base_of.insert(hash, base.clone());
            }

            for reference in entry.direct_supertypes() {
                let Some(&to) = index.nodes.get(&reference.definition) else {
                    return Err(RegistrationError::UnknownType {
                        referrer: entry.qualified_name().to_string(),
                        hash: reference.definition.to_string(),
                    });
                };
                let kind = if index.interfaces.contains(&reference.definition) {
                    SupertypeKind::Interface
                } else {
                    SupertypeKind::BaseClass
                };
                index.graph.add_edge(from, to, kind);
                direct.entry(hash).or_default().push(reference.clone());
            }
        }

        let order = toposort(&index.graph, None).map_err(|cycle| {
            let hash = index.graph[cycle.node_id()];
            let name = entries
                .iter()
                .find(|e| e.type_hash() == hash)
                .map(|e| e.qualified_name().to_string())
                .unwrap_or_else(|| hash.to_string());
            RegistrationError::CyclicInheritance(name)
        })?;

        // Supertypes before the types that derive from them.
        for node in order.iter().rev() {
            let hash = index.graph[*node];

            let mut supers: Vec<TypeRef> = Vec::new();
            for reference in direct.get(&hash).into_iter().flatten() {
                push_unique(&mut supers, reference.clone());
                for inherited in index.instance_supertypes(reference) {
                    push_unique(&mut supers, inherited);
                }
            }
            index.supertypes.insert(hash, supers);

            let mut chain = Vec::new();
            if let Some(base) = base_of.get(&hash) {
                chain.push(base.clone());
                chain.extend(index.substituted(base, index.ancestors(base.definition)));
            }
            index.ancestors.insert(hash, chain);
        }

        for (&hash, &node) in &index.nodes {
            let reversed = Reversed(&index.graph);
            let mut bfs = Bfs::new(reversed, node);
            let mut found = FxHashSet::default();
            while let Some(next) = bfs.next(reversed) {
                if next != node {
                    found.insert(index.graph[next]);
                }
            }
            index.descendants.insert(hash, found);
        }

        Ok(index)
    }

    // === Query Methods ===

    /// Base class chain of a type, nearest first.
    pub fn ancestors(&self, ty: TypeHash) -> &[TypeRef] {
        self.ancestors.get(&ty).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All transitive supertypes of a type definition.
    pub fn supertypes(&self, ty: TypeHash) -> &[TypeRef] {
        self.supertypes.get(&ty).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All transitive interface instantiations of a type definition.
    pub fn interfaces(&self, ty: TypeHash) -> impl Iterator<Item = &TypeRef> {
        self.supertypes(ty)
            .iter()
            .filter(|r| self.interfaces.contains(&r.definition))
    }

    /// Supertypes of an instantiation, with its arguments substituted.
    pub fn instance_supertypes(&self, instance: &TypeRef) -> Vec<TypeRef> {
        self.substituted(instance, self.supertypes(instance.definition))
    }

    /// Type parameters of a definition.
    pub fn params(&self, ty: TypeHash) -> &[TypeHash] {
        self.params.get(&ty).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check if `ty` is an interface.
    pub fn is_interface(&self, ty: TypeHash) -> bool {
        self.interfaces.contains(&ty)
    }

    /// Check if `ty` is a strict descendant of `ancestor` (definition level).
    pub fn is_derived_from(&self, ty: TypeHash, ancestor: TypeHash) -> bool {
        self.descendants
            .get(&ancestor)
            .is_some_and(|set| set.contains(&ty))
    }

    /// All strict descendants of a type.
    pub fn descendants(&self, ty: TypeHash) -> impl Iterator<Item = TypeHash> + '_ {
        self.descendants.get(&ty).into_iter().flatten().copied()
    }

    /// Check if an instantiation equals `target` or has it as a supertype.
    pub fn is_subtype(&self, instance: &TypeRef, target: &TypeRef) -> bool {
        instance == target
            || (self.is_derived_from(instance.definition, target.definition)
                && self.instance_supertypes(instance).contains(target))
    }

    /// Number of indexed types.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn substituted(&self, instance: &TypeRef, refs: &[TypeRef]) -> Vec<TypeRef> {
        let params = self.params(instance.definition);
        refs.iter()
            .map(|r| r.substitute(params, &instance.args))
            .collect()
    }
}

fn push_unique(list: &mut Vec<TypeRef>, reference: TypeRef) {
    if !list.contains(&reference) {
        list.push(reference);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synthfix_core::{ClassEntry, DataType, InterfaceEntry};

    fn class(name: &str) -> ClassEntry {
        ClassEntry::new(name)
    }

    fn r(name: &str) -> TypeRef {
        TypeRef::new(TypeHash::from_name(name))
    }

    fn build(types: Vec<TypeEntry>) -> Result<HierarchyIndex, RegistrationError> {
        HierarchyIndex::build(types.iter())
    }

    #[test]
    fn ancestors_nearest_first() {
        let index = build(vec![
            class("Base").as_abstract().into(),
            class("Middle").with_base(r("Base")).into(),
            class("Derived").with_base(r("Middle")).into(),
        ])
        .unwrap();

        let h = TypeHash::from_name;
        assert_eq!(index.ancestors(h("Derived")), &[r("Middle"), r("Base")]);
        assert!(index.ancestors(h("Base")).is_empty());
        assert!(index.is_derived_from(h("Derived"), h("Base")));
        assert!(!index.is_derived_from(h("Base"), h("Derived")));
        assert_eq!(index.descendants(h("Base")).count(), 2);
    }

    #[test]
    fn inherited_interfaces_are_substituted() {
        let comparable = InterfaceEntry::new("System.IComparable").with_type_param("T");
        let t = comparable.type_param("T").unwrap();
        let base_ref = r("Base");
        let base = class("Base").with_interface(TypeRef::generic(
            comparable.type_hash,
            vec![DataType::Named(base_ref.clone())],
        ));
        let derived = class("Derived").with_base(base_ref.clone());

        let index = build(vec![comparable.clone().into(), base.into(), derived.into()]).unwrap();
        let expected = TypeRef::generic(comparable.type_hash, vec![DataType::Named(base_ref)]);

        let interfaces: Vec<_> = index.interfaces(TypeHash::from_name("Derived")).collect();
        assert_eq!(interfaces, vec![&expected]);
        assert_eq!(index.params(comparable.type_hash), &[t]);
    }

    #[test]
    fn generic_base_arguments_flow_into_supertypes() {
        let holder = class("Holder").with_type_param("T", vec![]);
        let t = holder.type_param("T").unwrap();
        let holder = holder.with_interface(TypeRef::generic(
            TypeHash::from_name("IBox"),
            vec![DataType::param(t)],
        ));
        let ibox = InterfaceEntry::new("IBox").with_type_param("T");
        let concrete = class("IntHolder").with_base(TypeRef::generic(
            TypeHash::from_name("Holder"),
            vec![DataType::named(TypeHash::from_name("Base"))],
        ));

        let index = build(vec![ibox.into(), holder.into(), concrete.into()]).unwrap();
        let supers = index.supertypes(TypeHash::from_name("IntHolder"));
        assert_eq!(
            supers[1],
            TypeRef::generic(
                TypeHash::from_name("IBox"),
                vec![DataType::named(TypeHash::from_name("Base"))]
            )
        );
    }

    #[test]
    fn is_subtype_checks_arguments() {
        let comparable = InterfaceEntry::new("IComparable").with_type_param("T");
        let cmp_of = |name: &str| {
            TypeRef::generic(
                comparable.type_hash,
                vec![DataType::named(TypeHash::from_name(name))],
            )
        };
        let index = build(vec![
            comparable.clone().into(),
            class("Base").with_interface(cmp_of("Base")).into(),
        ])
        .unwrap();

        assert!(index.is_subtype(&r("Base"), &cmp_of("Base")));
        assert!(!index.is_subtype(&r("Base"), &cmp_of("Other")));
        assert!(index.is_subtype(&r("Base"), &r("Base")));
    }

    #[test]
    fn cycle_is_rejected() {
        let result = build(vec![
            class("A").with_base(r("B")).into(),
            class("B").with_base(r("A")).into(),
        ]);
        assert!(matches!(
            result,
            Err(RegistrationError::CyclicInheritance(_))
        ));
    }

    #[test]
    fn unknown_supertype_is_rejected() {
        let result = build(vec![class("Derived").with_base(r("Missing")).into()]);
        assert!(matches!(result, Err(RegistrationError::UnknownType { .. })));
    }
}
