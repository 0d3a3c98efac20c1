//! Candidate discovery.
//!
//! Both features start from the concrete type being fixed:
//!
//! - [`delegation`] finds directly declared fields and properties that can
//!   stand in for an unimplemented abstract class or interface.
//! - [`comparison`] finds comparable-contract instantiations that still lack
//!   relational operators.
//!
//! Every semantic query is preceded by a cancellation check.

pub mod comparison;
pub mod delegation;

use rustc_hash::FxHashSet;
use tracing::trace;

use synthfix_core::{MemberEntry, MemberModifiers, MemberSignature, TypeEntry, TypeHash, TypeRef};
use synthfix_model::SemanticModel;

use crate::{CancellationToken, Cancelled};

pub use comparison::{ComparisonContract, discover_comparison};
pub use delegation::{DelegationCandidate, discover_delegation};

/// What kind of supertype leaves members unimplemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GapKind {
    /// An abstract ancestor class with abstract members nobody overrides.
    AbstractClass,
    /// An implemented interface with members nobody implements.
    Interface,
}

/// Members of one supertype that the fixed type does not implement.
#[derive(Debug, Clone, PartialEq)]
pub struct Gap {
    pub kind: GapKind,
    /// The abstract class or interface instantiation, in the fixed type's terms.
    pub owner: TypeRef,
    /// Unimplemented members, generic arguments substituted.
    pub members: Vec<MemberEntry>,
}

/// Find every gap of a class, nearest abstract ancestor first, then
/// interfaces in declaration order.
///
/// Abstract-class gaps are only reported for non-abstract classes; an
/// abstract class may leave inherited members abstract.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn find_gaps(
    model: &dyn SemanticModel,
    ty: TypeHash,
    cancel: &CancellationToken,
) -> Result<Vec<Gap>, Cancelled> {
    cancel.check()?;
    let Some(class) = model.type_entry(ty).and_then(TypeEntry::as_class) else {
        return Ok(Vec::new());
    };

    let mut gaps = Vec::new();
    if !class.is_abstract {
        gaps.extend(abstract_gaps(model, ty, cancel)?);
    }
    gaps.extend(interface_gaps(model, ty, cancel)?);
    Ok(gaps)
}

fn abstract_gaps(
    model: &dyn SemanticModel,
    ty: TypeHash,
    cancel: &CancellationToken,
) -> Result<Vec<Gap>, Cancelled> {
    cancel.check()?;
    let ancestors = model.ancestors_of(ty);
    cancel.check()?;
    let members = model.members_of(ty, true);

    // Members arrive nearest declaration first, so the first member seen for
    // an overridable slot decides whether the slot is filled.
    let overridable =
        MemberModifiers::ABSTRACT | MemberModifiers::VIRTUAL | MemberModifiers::OVERRIDE;
    let mut decided: FxHashSet<MemberSignature> = FxHashSet::default();
    let mut gaps: Vec<Gap> = Vec::new();

    for member in members {
        if member.is_static()
            || member.is_explicit()
            || !member.modifiers.intersects(overridable)
        {
            continue;
        }
        if !decided.insert(member.signature()) || !member.is_abstract() {
            continue;
        }
        let Some(owner) = ancestors.iter().find(|a| a.definition == member.owner) else {
            continue;
        };
        match gaps.iter_mut().find(|g| &g.owner == owner) {
            Some(gap) => gap.members.push(member),
            None => gaps.push(Gap {
                kind: GapKind::AbstractClass,
                owner: owner.clone(),
                members: vec![member],
            }),
        }
    }

    Ok(gaps)
}

fn interface_gaps(
    model: &dyn SemanticModel,
    ty: TypeHash,
    cancel: &CancellationToken,
) -> Result<Vec<Gap>, Cancelled> {
    cancel.check()?;
    let mut gaps = Vec::new();

    for interface in model.implemented_interfaces_of(ty) {
        cancel.check()?;
        let Some(entry) = model
            .type_entry(interface.definition)
            .and_then(TypeEntry::as_interface)
        else {
            trace!(interface = %interface.definition, "skipping unresolved interface");
            continue;
        };

        let params = entry.type_param_hashes();
        let mut missing = Vec::new();
        for member in entry.members.iter().filter(|m| !m.is_static()) {
            cancel.check()?;
            if model
                .resolve_interface_member_implementation(ty, &interface, member)
                .is_none()
            {
                missing.push(member.substituted(&params, &interface.args));
            }
        }

        if !missing.is_empty() {
            gaps.push(Gap {
                kind: GapKind::Interface,
                owner: interface,
                members: missing,
            });
        }
    }

    Ok(gaps)
}
