//! Code synthesis.
//!
//! Synthesis turns one discovered candidate into a [`SynthesisPlan`]: the
//! ordered members an action will insert into the fixed type, each as a
//! semantic entry paired with its code-model declaration.
//!
//! Strategies form a closed set ([`StrategyTag`]); a [`StrategyRegistry`]
//! maps each tag to the function that builds plans for it.

mod comparison;
mod delegation;

use std::sync::Arc;

use rustc_hash::FxHashMap;

use synthfix_core::syntax::{Body, Expr, MemberDecl, Stmt};
use synthfix_core::{MemberEntry, TypeHash};
use synthfix_model::SemanticModel;

use crate::discovery::{ComparisonContract, DelegationCandidate};
use crate::{ExpressionBodyPreference, FixError, StyleOptions};

pub use comparison::synthesize_comparison_operators;
pub use delegation::{delegation_access, synthesize_delegation};

/// A member ready to be committed.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedMember {
    /// Semantic entry, owned by the target type.
    pub entry: MemberEntry,
    /// Declaration syntax.
    pub syntax: Arc<MemberDecl>,
}

/// Immutable, ordered set of members to add to one type.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisPlan {
    target: TypeHash,
    members: Vec<SynthesizedMember>,
}

impl SynthesisPlan {
    pub fn new(target: TypeHash, members: Vec<SynthesizedMember>) -> Self {
        Self { target, members }
    }

    /// Type receiving the members.
    pub fn target(&self) -> TypeHash {
        self.target
    }

    /// Members in insertion order.
    pub fn members(&self) -> &[SynthesizedMember] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Render every member as text.
    pub fn render(&self) -> Vec<String> {
        self.members.iter().map(|m| m.syntax.to_string()).collect()
    }
}

/// A discovered candidate, as handed to a strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    Delegation(DelegationCandidate),
    Comparison(ComparisonContract),
}

impl Candidate {
    /// Short kind name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Candidate::Delegation(_) => "delegation",
            Candidate::Comparison(_) => "comparison",
        }
    }
}

/// The closed set of synthesis strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyTag {
    /// Forward every unimplemented member through a field or property.
    DelegateThroughMember,
    /// Emit the four relational operators over the comparison method.
    ComparisonOperators,
}

/// Inputs shared by every strategy.
pub struct SynthesisContext<'a> {
    pub model: &'a dyn SemanticModel,
    pub target: TypeHash,
    pub style: &'a StyleOptions,
}

/// A function building a plan from a candidate.
pub type SynthesisFn = fn(&SynthesisContext<'_>, &Candidate) -> Result<SynthesisPlan, FixError>;

/// Maps strategy tags to synthesis functions.
#[derive(Debug, Clone, Default)]
pub struct StrategyRegistry {
    strategies: FxHashMap<StrategyTag, SynthesisFn>,
}

impl StrategyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in strategy.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(StrategyTag::DelegateThroughMember, synthesize_delegation);
        registry.register(
            StrategyTag::ComparisonOperators,
            synthesize_comparison_operators,
        );
        registry
    }

    /// Register (or replace) the function for a strategy.
    pub fn register(&mut self, tag: StrategyTag, synthesize: SynthesisFn) {
        self.strategies.insert(tag, synthesize);
    }

    /// Check if a strategy has a function.
    pub fn contains(&self, tag: StrategyTag) -> bool {
        self.strategies.contains_key(&tag)
    }

    /// Build a plan with the given strategy.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn synthesize(
        &self,
        tag: StrategyTag,
        context: &SynthesisContext<'_>,
        candidate: &Candidate,
    ) -> Result<SynthesisPlan, FixError> {
        let synthesize = self
            .strategies
            .get(&tag)
            .ok_or(FixError::UnknownStrategy(tag))?;
        synthesize(context, candidate)
    }
}

/// Body for a single forwarding expression.
///
/// `returns_value` selects `return expr;` over `expr;` for block bodies.
pub(crate) fn forwarding_body(
    preference: ExpressionBodyPreference,
    expr: Expr,
    returns_value: bool,
) -> Body {
    if preference.use_expression_body(true) {
        Body::Expression(expr)
    } else if returns_value {
        Body::Block(vec![Stmt::Return(Some(expr))])
    } else {
        Body::Block(vec![Stmt::Expr(expr)])
    }
}
