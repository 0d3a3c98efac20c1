//! Member declaration nodes of the code model.
//!
//! Synthesis builds these; the document editor stores them on the new
//! snapshot and the renderer turns them into text.

use crate::{MemberModifiers, Operator, Visibility};

use super::{Expr, Stmt, TypeExpr};

/// Body of a method, operator or accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// `=> expr;`
    Expression(Expr),
    /// `{ stmts }`
    Block(Vec<Stmt>),
}

impl Body {
    pub fn is_expression(&self) -> bool {
        matches!(self, Body::Expression(_))
    }
}

/// A declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    pub ty: TypeExpr,
    pub name: String,
}

impl ParamDecl {
    pub fn new(ty: TypeExpr, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
        }
    }
}

/// A method declaration.
///
/// Examples:
/// - `public override void Method() => inner.Method();`
/// - `int IShape.Area() { return inner.Area(); }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    /// `None` for explicit interface implementations, which carry no modifier.
    pub visibility: Option<Visibility>,
    pub modifiers: MemberModifiers,
    pub return_type: TypeExpr,
    pub explicit_interface: Option<TypeExpr>,
    pub name: String,
    pub params: Vec<ParamDecl>,
    pub body: Body,
}

/// An operator declaration (always `public static`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorDecl {
    pub return_type: TypeExpr,
    pub op: Operator,
    pub params: Vec<ParamDecl>,
    pub body: Body,
}

/// Property body: either a getter-only expression or an accessor list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyBody {
    /// `=> expr;`
    Expression(Expr),
    /// `{ get ...; set ...; }`
    Accessors {
        getter: Option<Body>,
        setter: Option<Body>,
    },
}

/// A property declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDecl {
    pub visibility: Option<Visibility>,
    pub modifiers: MemberModifiers,
    pub ty: TypeExpr,
    pub explicit_interface: Option<TypeExpr>,
    pub name: String,
    pub body: PropertyBody,
}

/// A synthesized member declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberDecl {
    Method(MethodDecl),
    Operator(OperatorDecl),
    Property(PropertyDecl),
}

impl MemberDecl {
    /// Declared name (the operator token for operators).
    pub fn name(&self) -> &str {
        match self {
            MemberDecl::Method(m) => &m.name,
            MemberDecl::Operator(o) => o.op.token(),
            MemberDecl::Property(p) => &p.name,
        }
    }
}
