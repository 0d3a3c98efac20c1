//! Code fix providers and the `compute_actions` entry point.
//!
//! A [`ProviderRegistry`] holds one provider per (language, feature) pair.
//! [`compute_actions`] resolves the selection to the type being fixed and
//! asks every provider of the context's language, in registration order.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use synthfix_core::{DataType, TypeHash};
use synthfix_model::{ProgramSnapshot, SemanticModel, Symbol};

use crate::actions::{LabelParts, LeafAction, disambiguate, package, qualified_display};
use crate::discovery::{GapKind, discover_comparison, discover_delegation};
use crate::{
    CancellationToken, Cancelled, Candidate, CodeAction, DocumentEditor, FixError, FixOptions,
    SnapshotEditor, StrategyRegistry, StrategyTag,
};

/// Language the bundled providers register under.
pub const DEFAULT_LANGUAGE: &str = "csharp";

/// The fixes this crate offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixFeature {
    ImplementAbstractClass,
    ImplementInterface,
    GenerateComparisonOperators,
}

impl FixFeature {
    /// Title shown for the single action or the group.
    pub fn title(self) -> &'static str {
        match self {
            FixFeature::ImplementAbstractClass => "Implement Abstract Class",
            FixFeature::ImplementInterface => "Implement Interface",
            FixFeature::GenerateComparisonOperators => "Generate comparison operators",
        }
    }

    /// Stable identifier used in equivalence keys.
    pub fn key(self) -> &'static str {
        match self {
            FixFeature::ImplementAbstractClass => "implement-abstract-class",
            FixFeature::ImplementInterface => "implement-interface",
            FixFeature::GenerateComparisonOperators => "generate-comparison-operators",
        }
    }
}

impl fmt::Display for FixFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Registry key of a provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProviderKey {
    pub language: String,
    pub feature: FixFeature,
}

/// Inputs handed to a provider for one target type.
pub struct ProviderContext<'a> {
    pub snapshot: &'a Arc<ProgramSnapshot>,
    pub target: TypeHash,
    pub options: &'a FixOptions,
    pub cancel: &'a CancellationToken,
    pub strategies: &'a Arc<StrategyRegistry>,
    pub editor: &'a Arc<dyn DocumentEditor>,
}

impl ProviderContext<'_> {
    pub fn model(&self) -> &dyn SemanticModel {
        &**self.snapshot
    }

    /// Leaf applying `candidate` with `strategy` on this context's target.
    pub fn leaf(&self, candidate: Candidate, strategy: StrategyTag) -> LeafAction {
        LeafAction::new(
            Arc::clone(self.snapshot),
            self.target,
            candidate,
            strategy,
            Arc::clone(self.strategies),
            Arc::clone(self.editor),
            self.options.style,
        )
    }
}

/// A source of code actions for one feature.
pub trait CodeFixProvider: Send + Sync {
    fn feature(&self) -> FixFeature;

    /// Discover candidates for the context's target and package them.
    fn provide(&self, context: &ProviderContext<'_>) -> Result<Option<CodeAction>, Cancelled>;
}

/// Offers forwarding implementations through a field or property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelegationProvider {
    kind: GapKind,
}

impl DelegationProvider {
    pub fn new(kind: GapKind) -> Self {
        Self { kind }
    }
}

impl CodeFixProvider for DelegationProvider {
    fn feature(&self) -> FixFeature {
        match self.kind {
            GapKind::AbstractClass => FixFeature::ImplementAbstractClass,
            GapKind::Interface => FixFeature::ImplementInterface,
        }
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    fn provide(&self, context: &ProviderContext<'_>) -> Result<Option<CodeAction>, Cancelled> {
        let model = context.model();
        let feature = self.feature();
        let candidates = discover_delegation(model, context.target, self.kind, context.cancel)?;

        let owners = candidates.iter().fold(Vec::new(), |mut owners, c| {
            if !owners.contains(&&c.gap.owner) {
                owners.push(&c.gap.owner);
            }
            owners
        });
        let with_owner = owners.len() > 1;
        let target_name = model
            .type_entry(context.target)
            .map(|t| t.qualified_name().to_string())
            .unwrap_or_else(|| context.target.to_string());

        let parts: Vec<LabelParts> = candidates
            .iter()
            .map(|candidate| {
                let member = &candidate.member;
                let qualified = match &member.explicit_interface {
                    Some(interface) => format!(
                        "{}.{}",
                        qualified_display(model, &DataType::Named(interface.clone())),
                        member.name
                    ),
                    None => format!("{}.{}", target_name, member.name),
                };
                let short = candidate.reference(model);
                if with_owner {
                    let owner = model.display_name(&DataType::Named(candidate.gap.owner.clone()));
                    LabelParts::new(
                        format!("Implement '{}' through '{}'", owner, short),
                        format!("Implement '{}' through '{}'", owner, qualified),
                    )
                } else {
                    LabelParts::new(
                        format!("Implement through '{}'", short),
                        format!("Implement through '{}'", qualified),
                    )
                }
            })
            .collect();

        let leaves = disambiguate(&parts)
            .into_iter()
            .zip(candidates)
            .map(|(label, candidate)| {
                let key = format!(
                    "{}:{}:{}",
                    feature.key(),
                    candidate.gap.owner.signature_hash(),
                    candidate.member.member_hash()
                );
                let leaf = context.leaf(
                    Candidate::Delegation(candidate),
                    StrategyTag::DelegateThroughMember,
                );
                (label, key, leaf)
            })
            .collect();

        Ok(package(feature.title(), feature.key(), leaves))
    }
}

/// Offers relational operators for comparable contracts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComparisonOperatorsProvider;

impl CodeFixProvider for ComparisonOperatorsProvider {
    fn feature(&self) -> FixFeature {
        FixFeature::GenerateComparisonOperators
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    fn provide(&self, context: &ProviderContext<'_>) -> Result<Option<CodeAction>, Cancelled> {
        let model = context.model();
        let feature = self.feature();
        let contracts =
            discover_comparison(model, context.target, context.options, context.cancel)?;

        let parts: Vec<LabelParts> = contracts
            .iter()
            .map(|contract| {
                LabelParts::new(
                    format!(
                        "Generate operators for '{}'",
                        model.display_name(&contract.compared)
                    ),
                    format!(
                        "Generate operators for '{}'",
                        qualified_display(model, &contract.compared)
                    ),
                )
            })
            .collect();

        let leaves = disambiguate(&parts)
            .into_iter()
            .zip(contracts)
            .map(|(label, contract)| {
                let key = format!("{}:{}", feature.key(), contract.interface.signature_hash());
                let leaf = context.leaf(
                    Candidate::Comparison(contract),
                    StrategyTag::ComparisonOperators,
                );
                (label, key, leaf)
            })
            .collect();

        Ok(package(feature.title(), feature.key(), leaves))
    }
}

/// Providers keyed by language and feature, plus the shared synthesis and
/// edit machinery their actions use.
#[derive(Clone)]
pub struct ProviderRegistry {
    providers: FxHashMap<ProviderKey, Arc<dyn CodeFixProvider>>,
    order: Vec<ProviderKey>,
    strategies: Arc<StrategyRegistry>,
    editor: Arc<dyn DocumentEditor>,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new(StrategyRegistry::with_defaults(), SnapshotEditor)
    }
}

impl ProviderRegistry {
    /// Create a registry with no providers.
    pub fn new(strategies: StrategyRegistry, editor: impl DocumentEditor + 'static) -> Self {
        Self {
            providers: FxHashMap::default(),
            order: Vec::new(),
            strategies: Arc::new(strategies),
            editor: Arc::new(editor),
        }
    }

    /// Create a registry with every bundled provider under [`DEFAULT_LANGUAGE`].
    pub fn with_defaults() -> Self {
        let mut registry = Self::default();
        let providers: [Arc<dyn CodeFixProvider>; 3] = [
            Arc::new(DelegationProvider::new(GapKind::AbstractClass)),
            Arc::new(DelegationProvider::new(GapKind::Interface)),
            Arc::new(ComparisonOperatorsProvider),
        ];
        for provider in providers {
            registry.insert(DEFAULT_LANGUAGE, provider);
        }
        registry
    }

    /// Register a provider for a language.
    ///
    /// Fails if the language already has a provider for the same feature.
    pub fn register(
        &mut self,
        language: &str,
        provider: impl CodeFixProvider + 'static,
    ) -> Result<(), FixError> {
        let key = ProviderKey {
            language: language.to_string(),
            feature: provider.feature(),
        };
        if self.providers.contains_key(&key) {
            return Err(FixError::DuplicateProvider {
                language: key.language,
                feature: key.feature,
            });
        }
        self.insert(language, Arc::new(provider));
        Ok(())
    }

    fn insert(&mut self, language: &str, provider: Arc<dyn CodeFixProvider>) {
        let key = ProviderKey {
            language: language.to_string(),
            feature: provider.feature(),
        };
        if self.providers.insert(key.clone(), provider).is_none() {
            self.order.push(key);
        }
    }

    /// Providers for a language, in registration order.
    pub fn providers_for<'a>(
        &'a self,
        language: &'a str,
    ) -> impl Iterator<Item = &'a Arc<dyn CodeFixProvider>> + 'a {
        self.order
            .iter()
            .filter(move |key| key.language == language)
            .filter_map(|key| self.providers.get(key))
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.order)
            .finish_non_exhaustive()
    }
}

/// What the user selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// A source offset; resolved to the innermost enclosing type.
    Offset(u32),
    /// A type, already resolved by the host.
    Type(TypeHash),
}

/// One `compute_actions` request.
#[derive(Debug, Clone)]
pub struct FixContext {
    pub snapshot: Arc<ProgramSnapshot>,
    pub selection: Selection,
    pub language: String,
    pub options: FixOptions,
    pub cancel: CancellationToken,
}

impl FixContext {
    pub fn new(snapshot: Arc<ProgramSnapshot>, selection: Selection) -> Self {
        Self {
            snapshot,
            selection,
            language: DEFAULT_LANGUAGE.to_string(),
            options: FixOptions::default(),
            cancel: CancellationToken::new(),
        }
    }

    // === Builder Methods ===

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_options(mut self, options: FixOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// The type being fixed, if the selection resolves to one.
    pub fn target(&self) -> Option<TypeHash> {
        match self.selection {
            Selection::Type(ty) => self.snapshot.contains(ty).then_some(ty),
            Selection::Offset(offset) => match self.snapshot.resolve_symbol_at(offset)? {
                Symbol::Type(entry) => Some(entry.type_hash()),
                symbol @ Symbol::Member(..) => Some(symbol.containing_type().type_hash()),
            },
        }
    }
}

/// Compute every code action available for the context's selection.
///
/// Actions are ordered by provider registration order; each provider
/// contributes at most one action (a leaf or a group).
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn compute_actions(
    registry: &ProviderRegistry,
    context: &FixContext,
) -> Result<Vec<CodeAction>, Cancelled> {
    context.cancel.check()?;
    let Some(target) = context.target() else {
        debug!(selection = ?context.selection, "selection does not resolve to a type");
        return Ok(Vec::new());
    };

    let provider_context = ProviderContext {
        snapshot: &context.snapshot,
        target,
        options: &context.options,
        cancel: &context.cancel,
        strategies: &registry.strategies,
        editor: &registry.editor,
    };

    let mut actions = Vec::new();
    for provider in registry.providers_for(&context.language) {
        context.cancel.check()?;
        if let Some(action) = provider.provide(&provider_context)? {
            debug!(
                target_type = %target,
                feature = %provider.feature(),
                children = action.children().len(),
                "provider offered action"
            );
            actions.push(action);
        }
    }

    debug!(target_type = %target, actions = actions.len(), "computed code actions");
    Ok(actions)
}
