//! Committing synthesis plans.
//!
//! A [`DocumentEditor`] turns a plan into a new [`ProgramSnapshot`]. The
//! input snapshot is never modified: a failed or cancelled commit leaves the
//! caller with exactly what it had.

use rustc_hash::FxHashSet;
use tracing::debug;

use synthfix_core::{EditError, MemberEntry, TypeEntry, TypeHash};
use synthfix_model::ProgramSnapshot;

use crate::{CancellationToken, FixError, MemberPlacement, SynthesisPlan};

/// Applies synthesis plans to snapshots.
pub trait DocumentEditor: Send + Sync {
    /// Insert the plan's members into its target type, producing a new snapshot.
    fn commit(
        &self,
        snapshot: &ProgramSnapshot,
        plan: &SynthesisPlan,
        placement: MemberPlacement,
        cancel: &CancellationToken,
    ) -> Result<ProgramSnapshot, FixError>;
}

/// Editor that inserts members directly into the target class entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotEditor;

impl DocumentEditor for SnapshotEditor {
    #[cfg_attr(feature = "profiling", profiling::function)]
    fn commit(
        &self,
        snapshot: &ProgramSnapshot,
        plan: &SynthesisPlan,
        placement: MemberPlacement,
        cancel: &CancellationToken,
    ) -> Result<ProgramSnapshot, FixError> {
        let target = plan.target();
        let Some(entry) = snapshot.get(target) else {
            return Err(EditError::UnknownTarget(target.to_string()).into());
        };
        let type_name = entry.qualified_name().to_string();
        if plan.is_empty() {
            return Err(EditError::EmptyPlan(type_name).into());
        }
        if !entry.is_class() {
            return Err(EditError::InvalidTarget(type_name).into());
        }

        let mut seen: FxHashSet<TypeHash> =
            entry.members().iter().map(MemberEntry::member_hash).collect();
        for member in plan.members() {
            if member.entry.owner != target || !seen.insert(member.entry.member_hash()) {
                return Err(EditError::MemberCollision {
                    type_name,
                    member: member.entry.name.clone(),
                }
                .into());
            }
        }

        cancel.check()?;

        let mut updated: TypeEntry = entry.clone();
        let members = updated.members_mut();
        for member in plan.members() {
            let index = insertion_index(members, &member.entry, placement);
            members.insert(index, member.entry.clone());
        }

        let derived = snapshot.with_type_replaced(updated)?;
        debug!(
            target_type = %type_name,
            inserted = plan.len(),
            version = derived.version(),
            "committed synthesis plan"
        );
        Ok(derived)
    }
}

fn insertion_index(
    members: &[MemberEntry],
    inserted: &MemberEntry,
    placement: MemberPlacement,
) -> usize {
    match placement {
        MemberPlacement::AtEnd => members.len(),
        MemberPlacement::AfterSameKind => members
            .iter()
            .rposition(|m| m.category() == inserted.category())
            .map_or(members.len(), |i| i + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use synthfix_core::syntax::{Body, Expr, MemberDecl, MethodDecl, TypeExpr};
    use synthfix_core::{
        ClassEntry, DataType, InterfaceEntry, MemberModifiers, MemberSource, PrimitiveKind,
        Visibility,
    };
    use synthfix_model::SnapshotBuilder;

    use crate::SynthesizedMember;

    fn h(name: &str) -> TypeHash {
        TypeHash::from_name(name)
    }

    fn snapshot() -> ProgramSnapshot {
        SnapshotBuilder::new()
            .with(
                ClassEntry::new("Derived")
                    .with_member(MemberEntry::field(
                        TypeHash::EMPTY,
                        "inner",
                        DataType::primitive(PrimitiveKind::Int),
                    ))
                    .with_member(MemberEntry::method(
                        TypeHash::EMPTY,
                        "Existing",
                        vec![],
                        DataType::Void,
                    ))
                    .with_member(MemberEntry::field(
                        TypeHash::EMPTY,
                        "other",
                        DataType::primitive(PrimitiveKind::Int),
                    )),
            )
            .and_then(|b| b.with(InterfaceEntry::new("IShape")))
            .and_then(SnapshotBuilder::build)
            .unwrap()
    }

    fn method(owner: TypeHash, name: &str) -> SynthesizedMember {
        let syntax = Arc::new(MemberDecl::Method(MethodDecl {
            visibility: Some(Visibility::Public),
            modifiers: MemberModifiers::empty(),
            return_type: TypeExpr::new("void"),
            explicit_interface: None,
            name: name.to_string(),
            params: vec![],
            body: Body::Expression(Expr::ident("inner").member(name).call(vec![])),
        }));
        let entry = MemberEntry::method(owner, name, vec![], DataType::Void)
            .with_source(MemberSource::Synthesized(Arc::clone(&syntax)));
        SynthesizedMember { entry, syntax }
    }

    fn names(snapshot: &ProgramSnapshot) -> Vec<String> {
        snapshot
            .get(h("Derived"))
            .unwrap()
            .members()
            .iter()
            .map(|m| m.name.clone())
            .collect()
    }

    #[test]
    fn commit_appends_and_keeps_original() {
        let original = snapshot();
        let plan = SynthesisPlan::new(h("Derived"), vec![method(h("Derived"), "Run")]);

        let derived = SnapshotEditor
            .commit(&original, &plan, MemberPlacement::AtEnd, &CancellationToken::new())
            .unwrap();

        assert_eq!(names(&derived), vec!["inner", "Existing", "other", "Run"]);
        assert_eq!(names(&original), vec!["inner", "Existing", "other"]);
        assert_eq!(derived.version(), original.version() + 1);
        assert!(
            derived.get(h("Derived")).unwrap().members()[3]
                .source
                .is_synthesized()
        );
    }

    #[test]
    fn after_same_kind_placement() {
        let plan = SynthesisPlan::new(
            h("Derived"),
            vec![method(h("Derived"), "Run"), method(h("Derived"), "Stop")],
        );
        let derived = SnapshotEditor
            .commit(
                &snapshot(),
                &plan,
                MemberPlacement::AfterSameKind,
                &CancellationToken::new(),
            )
            .unwrap();

        assert_eq!(
            names(&derived),
            vec!["inner", "Existing", "Run", "Stop", "other"]
        );
    }

    #[test]
    fn collisions_are_rejected() {
        let editor = SnapshotEditor;
        let at_end = MemberPlacement::AtEnd;
        let cancel = CancellationToken::new();

        let existing = SynthesisPlan::new(h("Derived"), vec![method(h("Derived"), "Existing")]);
        assert!(matches!(
            editor.commit(&snapshot(), &existing, at_end, &cancel),
            Err(FixError::Edit(EditError::MemberCollision { .. }))
        ));

        let twice = SynthesisPlan::new(
            h("Derived"),
            vec![method(h("Derived"), "Run"), method(h("Derived"), "Run")],
        );
        assert!(matches!(
            editor.commit(&snapshot(), &twice, at_end, &cancel),
            Err(FixError::Edit(EditError::MemberCollision { .. }))
        ));
    }

    #[test]
    fn invalid_plans_are_rejected() {
        let editor = SnapshotEditor;
        let at_end = MemberPlacement::AtEnd;
        let cancel = CancellationToken::new();

        let empty = SynthesisPlan::new(h("Derived"), vec![]);
        assert!(matches!(
            editor.commit(&snapshot(), &empty, at_end, &cancel),
            Err(FixError::Edit(EditError::EmptyPlan(_)))
        ));

        let missing = SynthesisPlan::new(h("Missing"), vec![method(h("Missing"), "Run")]);
        assert!(matches!(
            editor.commit(&snapshot(), &missing, at_end, &cancel),
            Err(FixError::Edit(EditError::UnknownTarget(_)))
        ));

        let interface = SynthesisPlan::new(h("IShape"), vec![method(h("IShape"), "Run")]);
        assert!(matches!(
            editor.commit(&snapshot(), &interface, at_end, &cancel),
            Err(FixError::Edit(EditError::InvalidTarget(_)))
        ));
    }

    #[test]
    fn cancelled_commit_produces_nothing() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let plan = SynthesisPlan::new(h("Derived"), vec![method(h("Derived"), "Run")]);

        let err = SnapshotEditor
            .commit(&snapshot(), &plan, MemberPlacement::AtEnd, &cancel)
            .unwrap_err();
        assert!(err.is_cancelled());
    }
}
