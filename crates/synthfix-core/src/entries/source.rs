//! Origin tracking for types and members.

use std::sync::Arc;

use crate::Span;
use crate::syntax::MemberDecl;

/// Where a type definition comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeSource {
    /// Declared in an editable document.
    Source {
        /// Range of the whole declaration.
        span: Span,
    },
    /// Referenced metadata (library types such as `IComparable<T>`).
    #[default]
    Metadata,
}

impl TypeSource {
    /// Create a source-declared type.
    pub fn source(span: Span) -> Self {
        TypeSource::Source { span }
    }

    /// Span of the declaration, if declared in source.
    pub fn span(&self) -> Option<Span> {
        match self {
            TypeSource::Source { span } => Some(*span),
            TypeSource::Metadata => None,
        }
    }
}

/// Where a member comes from.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MemberSource {
    /// Declared in an editable document.
    Source {
        /// Range of the member declaration.
        span: Span,
    },
    /// Referenced metadata.
    #[default]
    Metadata,
    /// Inserted by an applied edit.
    Synthesized(Arc<MemberDecl>),
}

impl MemberSource {
    /// Create a source-declared member.
    pub fn source(span: Span) -> Self {
        MemberSource::Source { span }
    }

    /// Span of the declaration, if declared in source.
    pub fn span(&self) -> Option<Span> {
        match self {
            MemberSource::Source { span } => Some(*span),
            _ => None,
        }
    }

    /// Syntax of a synthesized member.
    pub fn syntax(&self) -> Option<&MemberDecl> {
        match self {
            MemberSource::Synthesized(decl) => Some(decl),
            _ => None,
        }
    }

    /// Check if this member was inserted by an edit.
    pub fn is_synthesized(&self) -> bool {
        matches!(self, MemberSource::Synthesized(_))
    }
}
