//! Style and feature options.
//!
//! Options are plain values built with `with_*` methods; hosts own their
//! persistence and pass a fresh copy into every invocation.

use synthfix_core::{MemberCategory, QualifiedName};

/// Preference for expression-bodied members (`=> expr;`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExpressionBodyPreference {
    /// Always use an expression body.
    Always,
    /// Use an expression body when the body is a single expression.
    #[default]
    WhenPossible,
    /// Always use a block body.
    Never,
}

impl ExpressionBodyPreference {
    /// Decide for a body that is (or is not) a single expression.
    pub fn use_expression_body(self, single_expression: bool) -> bool {
        match self {
            ExpressionBodyPreference::Always => true,
            ExpressionBodyPreference::WhenPossible => single_expression,
            ExpressionBodyPreference::Never => false,
        }
    }
}

/// Where committed members are inserted in the target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MemberPlacement {
    /// After every existing member.
    #[default]
    AtEnd,
    /// After the last existing member of the same category, or at the end.
    AfterSameKind,
}

/// Code style options consulted by synthesis and edit application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StyleOptions {
    pub methods: ExpressionBodyPreference,
    pub properties: ExpressionBodyPreference,
    pub operators: ExpressionBodyPreference,
    pub placement: MemberPlacement,
}

impl StyleOptions {
    /// Same preference for every member category.
    pub fn uniform(preference: ExpressionBodyPreference) -> Self {
        Self {
            methods: preference,
            properties: preference,
            operators: preference,
            placement: MemberPlacement::default(),
        }
    }

    /// Preference for a member category. Fields have no bodies and report
    /// the default.
    pub fn expression_body(&self, category: MemberCategory) -> ExpressionBodyPreference {
        match category {
            MemberCategory::Method => self.methods,
            MemberCategory::Property => self.properties,
            MemberCategory::Operator => self.operators,
            MemberCategory::Field => ExpressionBodyPreference::default(),
        }
    }

    // === Builder Methods ===

    pub fn with_methods(mut self, preference: ExpressionBodyPreference) -> Self {
        self.methods = preference;
        self
    }

    pub fn with_properties(mut self, preference: ExpressionBodyPreference) -> Self {
        self.properties = preference;
        self
    }

    pub fn with_operators(mut self, preference: ExpressionBodyPreference) -> Self {
        self.operators = preference;
        self
    }

    pub fn with_placement(mut self, placement: MemberPlacement) -> Self {
        self.placement = placement;
        self
    }
}

/// Options for one invocation of the fix pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixOptions {
    /// Generic comparable contract whose instantiations get operators.
    pub comparable_contract: QualifiedName,
    /// Comparison method declared on the contract.
    pub comparison_method: String,
    /// Code style.
    pub style: StyleOptions,
}

impl Default for FixOptions {
    fn default() -> Self {
        Self {
            comparable_contract: QualifiedName::from_qualified_string("System.IComparable"),
            comparison_method: "CompareTo".to_string(),
            style: StyleOptions::default(),
        }
    }
}

impl FixOptions {
    /// Use a different comparable contract and method.
    pub fn with_comparable_contract(
        mut self,
        contract: impl Into<QualifiedName>,
        method: impl Into<String>,
    ) -> Self {
        self.comparable_contract = contract.into();
        self.comparison_method = method.into();
        self
    }

    /// Replace the style options.
    pub fn with_style(mut self, style: StyleOptions) -> Self {
        self.style = style;
        self
    }
}
