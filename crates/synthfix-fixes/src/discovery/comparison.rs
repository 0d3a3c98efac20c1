//! Comparison operator candidates.
//!
//! A type implementing the comparable contract `IComparable<U>` gets the
//! four relational operators against `U`, unless it already declares
//! `operator <` with `U` as its second parameter. The single `<` probe
//! stands in for the whole operator set.

use tracing::{debug, trace};

use synthfix_core::{DataType, MemberEntry, Operator, TypeEntry, TypeHash, TypeRef};
use synthfix_model::SemanticModel;

use crate::{CancellationToken, Cancelled, FixOptions};

/// An instantiation of the comparable contract that still needs operators.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonContract {
    /// The contract instantiation (`IComparable<Base>`).
    pub interface: TypeRef,
    /// The compared type `U`.
    pub compared: DataType,
    /// The member of the fixed type implementing the comparison method.
    pub method: MemberEntry,
}

impl ComparisonContract {
    /// Check if callers must go through the contract to reach the method.
    pub fn needs_cast(&self) -> bool {
        !self.method.visibility.is_public()
    }
}

/// Find contract instantiations declared directly on `ty` that lack
/// relational operators, in interface declaration order.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn discover_comparison(
    model: &dyn SemanticModel,
    ty: TypeHash,
    options: &FixOptions,
    cancel: &CancellationToken,
) -> Result<Vec<ComparisonContract>, Cancelled> {
    cancel.check()?;
    let Some(class) = model.type_entry(ty).and_then(TypeEntry::as_class) else {
        return Ok(Vec::new());
    };

    let contract = options.comparable_contract.to_type_hash();
    let Some(contract_entry) = model.type_entry(contract).and_then(TypeEntry::as_interface) else {
        trace!(contract = %options.comparable_contract, "comparable contract not in snapshot");
        return Ok(Vec::new());
    };
    let Some(compare_method) = contract_entry.find_member(&options.comparison_method) else {
        trace!(method = %options.comparison_method, "contract has no comparison method");
        return Ok(Vec::new());
    };

    // Only contracts the type declares itself; a base class that implements
    // the contract owns its own operators.
    let declared = class.interfaces.iter().filter(|i| i.definition == contract);
    cancel.check()?;
    let own = model.members_of(ty, false);

    let mut contracts = Vec::new();
    for interface in declared.cloned() {
        let Some(compared) = interface.args.first().cloned() else {
            continue;
        };
        if !compared.is_resolved() || compared.is_dynamic() {
            trace!("dropping contract with unresolved compared type");
            continue;
        }

        cancel.check()?;
        let Some(method) =
            model.resolve_interface_member_implementation(ty, &interface, compare_method)
        else {
            trace!(compared = %model.display_name(&compared), "comparison method unresolved");
            continue;
        };

        if declares_less_than(&own, &compared) {
            trace!(compared = %model.display_name(&compared), "operators already present");
            continue;
        }

        contracts.push(ComparisonContract {
            interface,
            compared,
            method,
        });
    }

    debug!(target_type = %ty, contracts = contracts.len(), "comparison discovery");
    Ok(contracts)
}

fn declares_less_than(members: &[MemberEntry], compared: &DataType) -> bool {
    members.iter().any(|m| {
        m.operator_kind() == Some(Operator::Less)
            && m.params().get(1).is_some_and(|p| &p.data_type == compared)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use synthfix_core::{ClassEntry, InterfaceEntry, Param, PrimitiveKind, Visibility};
    use synthfix_model::{ProgramSnapshot, SnapshotBuilder};

    fn h(name: &str) -> TypeHash {
        TypeHash::from_name(name)
    }

    fn comparable() -> InterfaceEntry {
        let iface = InterfaceEntry::new("System.IComparable").with_type_param("T");
        let t = iface.type_param("T").unwrap();
        iface.with_member(MemberEntry::method(
            TypeHash::EMPTY,
            "CompareTo",
            vec![Param::new("other", DataType::param(t))],
            DataType::primitive(PrimitiveKind::Int),
        ))
    }

    fn comparable_of(arg: DataType) -> TypeRef {
        TypeRef::generic(h("System.IComparable"), vec![arg])
    }

    fn compare_to(arg: DataType) -> MemberEntry {
        MemberEntry::method(
            TypeHash::EMPTY,
            "CompareTo",
            vec![Param::new("other", arg)],
            DataType::primitive(PrimitiveKind::Int),
        )
    }

    fn less_than(self_ty: &str, arg: &str) -> MemberEntry {
        MemberEntry::operator(
            TypeHash::EMPTY,
            Operator::Less,
            vec![
                Param::new("left", DataType::named(h(self_ty))),
                Param::new("right", DataType::named(h(arg))),
            ],
            DataType::primitive(PrimitiveKind::Bool),
        )
    }

    fn build(entries: Vec<TypeEntry>) -> ProgramSnapshot {
        let mut builder = SnapshotBuilder::new();
        for entry in entries {
            builder.register(entry).unwrap();
        }
        builder.build().unwrap()
    }

    fn discover(snapshot: &ProgramSnapshot, ty: &str) -> Vec<ComparisonContract> {
        discover_comparison(snapshot, h(ty), &FixOptions::default(), &CancellationToken::new())
            .unwrap()
    }

    #[test]
    fn public_comparison_needs_no_cast() {
        let base = DataType::named(h("Base"));
        let snapshot = build(vec![
            comparable().into(),
            ClassEntry::new("Base")
                .with_interface(comparable_of(base.clone()))
                .with_member(compare_to(base.clone()))
                .into(),
        ]);

        let found = discover(&snapshot, "Base");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].compared, base);
        assert!(!found[0].needs_cast());
    }

    #[test]
    fn non_public_comparison_needs_cast() {
        let base = DataType::named(h("Base"));
        let snapshot = build(vec![
            comparable().into(),
            ClassEntry::new("Base")
                .with_interface(comparable_of(base.clone()))
                .with_member(compare_to(base.clone()).explicit_for(comparable_of(base)))
                .into(),
        ]);

        let found = discover(&snapshot, "Base");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].method.visibility, Visibility::Private);
        assert!(found[0].needs_cast());
    }

    #[test]
    fn existing_less_than_suppresses_only_its_contract() {
        let base = DataType::named(h("Base"));
        let derived = DataType::named(h("Derived"));
        let snapshot = build(vec![
            comparable().into(),
            ClassEntry::new("Base").into(),
            ClassEntry::new("Derived")
                .with_base(TypeRef::new(h("Base")))
                .with_interface(comparable_of(base.clone()))
                .with_interface(comparable_of(derived.clone()))
                .with_member(compare_to(base))
                .with_member(compare_to(derived.clone()))
                .with_member(less_than("Derived", "Base"))
                .into(),
        ]);

        let found = discover(&snapshot, "Derived");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].compared, derived);
    }

    #[test]
    fn inherited_contract_is_left_to_the_base() {
        let base = DataType::named(h("Base"));
        let snapshot = build(vec![
            comparable().into(),
            ClassEntry::new("Base")
                .with_interface(comparable_of(base.clone()))
                .with_member(compare_to(base))
                .with_member(less_than("Base", "Base"))
                .into(),
            ClassEntry::new("Derived")
                .with_base(TypeRef::new(h("Base")))
                .into(),
        ]);

        assert!(discover(&snapshot, "Base").is_empty());
        assert!(discover(&snapshot, "Derived").is_empty());
    }

    #[test]
    fn unresolved_compared_type_is_dropped() {
        let snapshot = build(vec![
            comparable().into(),
            ClassEntry::new("Base")
                .with_interface(comparable_of(DataType::Error))
                .with_member(compare_to(DataType::Error))
                .into(),
        ]);
        assert!(discover(&snapshot, "Base").is_empty());
    }

    #[test]
    fn missing_comparison_method_is_dropped() {
        let base = DataType::named(h("Base"));
        let snapshot = build(vec![
            comparable().into(),
            ClassEntry::new("Base")
                .with_interface(comparable_of(base))
                .into(),
        ]);
        assert!(discover(&snapshot, "Base").is_empty());
    }

    #[test]
    fn missing_contract_yields_nothing() {
        let snapshot = build(vec![ClassEntry::new("Base").into()]);
        assert!(discover(&snapshot, "Base").is_empty());
    }
}
