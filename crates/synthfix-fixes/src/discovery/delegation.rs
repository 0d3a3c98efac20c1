//! Delegation candidates.
//!
//! A delegation candidate is a field or property declared directly on the
//! fixed type whose declared type can stand in for a gap owner. Forwarding
//! every unimplemented member of the gap through it closes the gap.
//!
//! Inherited fields and properties are never candidates, even when they
//! would be assignable.

use std::sync::Arc;

use tracing::{debug, trace};

use synthfix_core::{DataType, MemberEntry, MemberKind, TypeHash};
use synthfix_model::{Assignability, SemanticModel};

use super::{Gap, GapKind, find_gaps};
use crate::{CancellationToken, Cancelled};

/// A member that can stand in for a gap owner.
#[derive(Debug, Clone, PartialEq)]
pub struct DelegationCandidate {
    /// Field or property declared on the fixed type.
    pub member: MemberEntry,
    /// The gap the member can fill.
    pub gap: Arc<Gap>,
}

impl DelegationCandidate {
    /// Reference shown in labels: the simple name, or `Interface.Name` for
    /// an explicit interface implementation.
    pub fn reference(&self, model: &dyn SemanticModel) -> String {
        match &self.member.explicit_interface {
            Some(interface) => format!(
                "{}.{}",
                model.display_name(&DataType::Named(interface.clone())),
                self.member.name
            ),
            None => self.member.name.clone(),
        }
    }
}

/// Find delegation candidates for every gap of the given kind.
///
/// Candidates are ordered by gap, then by member declaration order.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn discover_delegation(
    model: &dyn SemanticModel,
    ty: TypeHash,
    kind: GapKind,
    cancel: &CancellationToken,
) -> Result<Vec<DelegationCandidate>, Cancelled> {
    let gaps: Vec<Arc<Gap>> = find_gaps(model, ty, cancel)?
        .into_iter()
        .filter(|g| g.kind == kind)
        .map(Arc::new)
        .collect();
    if gaps.is_empty() {
        return Ok(Vec::new());
    }

    cancel.check()?;
    let own = model.members_of(ty, false);
    let mut candidates = Vec::new();

    for gap in &gaps {
        for member in &own {
            let declared = match &member.kind {
                MemberKind::Field(field) => &field.data_type,
                MemberKind::Property(property) if property.has_getter => &property.data_type,
                MemberKind::Property(_) => {
                    trace!(member = %member.name, "skipping write-only property");
                    continue;
                }
                MemberKind::Method(_) => continue,
            };

            cancel.check()?;
            match model.check_assignable(declared, &gap.owner) {
                Assignability::Assignable => candidates.push(DelegationCandidate {
                    member: member.clone(),
                    gap: Arc::clone(gap),
                }),
                Assignability::NotAssignable => {}
                Assignability::Malformed => {
                    trace!(member = %member.name, "dropping candidate with unresolved type");
                }
            }
        }
    }

    debug!(
        target_type = %ty,
        ?kind,
        gaps = gaps.len(),
        candidates = candidates.len(),
        "delegation discovery"
    );
    Ok(candidates)
}
