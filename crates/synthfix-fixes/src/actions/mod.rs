//! Code actions.
//!
//! A [`CodeAction`] is either a leaf that applies one candidate, or a group
//! of leaves offered under one title. Only leaves are invocable.

pub mod labels;

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use synthfix_core::TypeHash;
use synthfix_model::ProgramSnapshot;

use crate::{
    CancellationToken, Candidate, DocumentEditor, FixError, StrategyRegistry, StrategyTag,
    StyleOptions, SynthesisContext, SynthesisPlan,
};

pub use labels::{LabelParts, disambiguate, qualified_display};

/// Everything a leaf needs to synthesize and commit one candidate.
#[derive(Clone)]
pub struct LeafAction {
    snapshot: Arc<ProgramSnapshot>,
    target: TypeHash,
    candidate: Candidate,
    strategy: StrategyTag,
    strategies: Arc<StrategyRegistry>,
    editor: Arc<dyn DocumentEditor>,
    style: StyleOptions,
}

impl LeafAction {
    pub fn new(
        snapshot: Arc<ProgramSnapshot>,
        target: TypeHash,
        candidate: Candidate,
        strategy: StrategyTag,
        strategies: Arc<StrategyRegistry>,
        editor: Arc<dyn DocumentEditor>,
        style: StyleOptions,
    ) -> Self {
        Self {
            snapshot,
            target,
            candidate,
            strategy,
            strategies,
            editor,
            style,
        }
    }

    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    pub fn strategy(&self) -> StrategyTag {
        self.strategy
    }

    pub fn target(&self) -> TypeHash {
        self.target
    }

    /// Version of the snapshot this action was computed from.
    pub fn snapshot_version(&self) -> u64 {
        self.snapshot.version()
    }

    fn plan(&self) -> Result<SynthesisPlan, FixError> {
        let context = SynthesisContext {
            model: &*self.snapshot,
            target: self.target,
            style: &self.style,
        };
        self.strategies
            .synthesize(self.strategy, &context, &self.candidate)
    }

    fn apply(&self, cancel: &CancellationToken) -> Result<ProgramSnapshot, FixError> {
        cancel.check()?;
        let plan = self.plan()?;
        cancel.check()?;
        self.editor
            .commit(&self.snapshot, &plan, self.style.placement, cancel)
    }
}

impl fmt::Debug for LeafAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeafAction")
            .field("target", &self.target)
            .field("candidate", &self.candidate)
            .field("strategy", &self.strategy)
            .field("snapshot_version", &self.snapshot.version())
            .finish_non_exhaustive()
    }
}

/// Leaf or group.
#[derive(Debug, Clone)]
pub enum CodeActionKind {
    Leaf(Box<LeafAction>),
    Group(Vec<CodeAction>),
}

/// An offered fix.
#[derive(Debug, Clone)]
pub struct CodeAction {
    title: String,
    equivalence_key: String,
    kind: CodeActionKind,
}

impl CodeAction {
    /// Create an invocable action.
    pub fn leaf(
        title: impl Into<String>,
        equivalence_key: impl Into<String>,
        action: LeafAction,
    ) -> Self {
        Self {
            title: title.into(),
            equivalence_key: equivalence_key.into(),
            kind: CodeActionKind::Leaf(Box::new(action)),
        }
    }

    /// Create a non-invocable group.
    pub fn group(
        title: impl Into<String>,
        equivalence_key: impl Into<String>,
        children: Vec<CodeAction>,
    ) -> Self {
        Self {
            title: title.into(),
            equivalence_key: equivalence_key.into(),
            kind: CodeActionKind::Group(children),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Key identifying the same fix across invocations (for fix-all).
    pub fn equivalence_key(&self) -> &str {
        &self.equivalence_key
    }

    pub fn kind(&self) -> &CodeActionKind {
        &self.kind
    }

    /// Nested actions of a group; empty for leaves.
    pub fn children(&self) -> &[CodeAction] {
        match &self.kind {
            CodeActionKind::Group(children) => children,
            CodeActionKind::Leaf(_) => &[],
        }
    }

    pub fn is_invocable(&self) -> bool {
        matches!(self.kind, CodeActionKind::Leaf(_))
    }

    /// Leaf payload, if invocable.
    pub fn as_leaf(&self) -> Option<&LeafAction> {
        match &self.kind {
            CodeActionKind::Leaf(leaf) => Some(leaf),
            CodeActionKind::Group(_) => None,
        }
    }

    /// Synthesize and commit, returning the new snapshot.
    ///
    /// The snapshot the action was computed from is never modified, so a
    /// failed or cancelled apply leaves the caller's state as it was.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn apply(&self, cancel: &CancellationToken) -> Result<ProgramSnapshot, FixError> {
        let Some(leaf) = self.as_leaf() else {
            return Err(FixError::NotInvocable(self.title.clone()));
        };
        let result = leaf.apply(cancel);
        if let Ok(snapshot) = &result {
            debug!(action = %self.title, version = snapshot.version(), "applied code action");
        }
        result
    }

    /// Rendered text of the members `apply` would insert.
    pub fn preview(&self) -> Result<Vec<String>, FixError> {
        let Some(leaf) = self.as_leaf() else {
            return Err(FixError::NotInvocable(self.title.clone()));
        };
        Ok(leaf.plan()?.render())
    }
}

/// Package labeled leaves into the action list for one feature.
///
/// No leaves yield nothing; one leaf takes the feature title; several become
/// children of a group carrying the title.
pub fn package(
    title: &str,
    key: &str,
    mut leaves: Vec<(String, String, LeafAction)>,
) -> Option<CodeAction> {
    match leaves.len() {
        0 => None,
        1 => {
            let (_, equivalence_key, leaf) = leaves.remove(0);
            Some(CodeAction::leaf(title, equivalence_key, leaf))
        }
        _ => {
            let children = leaves
                .into_iter()
                .map(|(label, equivalence_key, leaf)| {
                    CodeAction::leaf(label, equivalence_key, leaf)
                })
                .collect();
            Some(CodeAction::group(title, key, children))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synthfix_core::{ClassEntry, DataType, MemberEntry, PrimitiveKind, TypeRef};
    use synthfix_model::SnapshotBuilder;

    use crate::SnapshotEditor;
    use crate::discovery::ComparisonContract;

    fn leaf() -> LeafAction {
        let snapshot = SnapshotBuilder::new()
            .with(ClassEntry::new("Derived"))
            .and_then(SnapshotBuilder::build)
            .unwrap();
        let target = TypeHash::from_name("Derived");
        LeafAction::new(
            Arc::new(snapshot),
            target,
            Candidate::Comparison(ComparisonContract {
                interface: TypeRef::new(TypeHash::from_name("IComparable")),
                compared: DataType::named(target),
                method: MemberEntry::method(
                    target,
                    "CompareTo",
                    vec![],
                    DataType::primitive(PrimitiveKind::Int),
                ),
            }),
            StrategyTag::ComparisonOperators,
            Arc::new(StrategyRegistry::with_defaults()),
            Arc::new(SnapshotEditor),
            StyleOptions::default(),
        )
    }

    fn labeled(label: &str) -> (String, String, LeafAction) {
        (label.to_string(), format!("key:{label}"), leaf())
    }

    #[test]
    fn packaging_by_count() {
        assert!(package("Title", "key", vec![]).is_none());

        let single = package("Title", "key", vec![labeled("A")]).unwrap();
        assert_eq!(single.title(), "Title");
        assert_eq!(single.equivalence_key(), "key:A");
        assert!(single.is_invocable());
        assert!(single.children().is_empty());

        let group = package("Title", "key", vec![labeled("A"), labeled("B")]).unwrap();
        assert_eq!(group.title(), "Title");
        assert!(!group.is_invocable());
        let titles: Vec<&str> = group.children().iter().map(CodeAction::title).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn groups_cannot_be_applied() {
        let group = package("Title", "key", vec![labeled("A"), labeled("B")]).unwrap();
        let err = group.apply(&CancellationToken::new()).unwrap_err();
        assert_eq!(err, FixError::NotInvocable("Title".to_string()));
        assert!(group.preview().is_err());
    }

    #[test]
    fn cancelled_apply_fails_before_synthesis() {
        let action = package("Title", "key", vec![labeled("A")]).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert!(action.apply(&cancel).unwrap_err().is_cancelled());
    }

    #[test]
    fn preview_renders_plan() {
        let action = package("Title", "key", vec![labeled("A")]).unwrap();
        let preview = action.preview().unwrap();
        assert_eq!(preview.len(), 4);
        assert!(preview[0].starts_with("public static bool operator <(Derived left, Derived right)"));
    }
}
