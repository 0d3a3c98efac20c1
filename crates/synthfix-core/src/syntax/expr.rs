//! Expression and statement nodes of the code model.

use crate::Operator;

/// A rendered type reference (`int`, `IComparable<Base>`, `T`).
///
/// The semantic model decides how a type is spelled; the code model only
/// carries the result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeExpr {
    pub text: String,
}

impl TypeExpr {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Literal values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Int(i64),
    Bool(bool),
}

/// An expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Literal value
    Literal(Literal),
    /// Identifier reference (`inner`, `left`, `value`)
    Ident(String),
    /// `this`
    This,
    /// Member access (`target.name`)
    Member(Box<MemberExpr>),
    /// Invocation (`callee(args)`)
    Call(Box<CallExpr>),
    /// Binary operation
    Binary(Box<BinaryExpr>),
    /// Cast (`(Type)expr`)
    Cast(Box<CastExpr>),
    /// Parenthesized expression
    Paren(Box<Expr>),
    /// Simple assignment (`target = value`)
    Assign(Box<AssignExpr>),
}

/// Member access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberExpr {
    pub target: Expr,
    pub name: String,
}

/// Invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpr {
    pub callee: Expr,
    pub args: Vec<Expr>,
}

/// Binary operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryExpr {
    pub left: Expr,
    pub op: Operator,
    pub right: Expr,
}

/// Cast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastExpr {
    pub ty: TypeExpr,
    pub expr: Expr,
}

/// Assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignExpr {
    pub target: Expr,
    pub value: Expr,
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn int(value: i64) -> Self {
        Expr::Literal(Literal::Int(value))
    }

    /// `self.name`
    pub fn member(self, name: impl Into<String>) -> Self {
        Expr::Member(Box::new(MemberExpr {
            target: self,
            name: name.into(),
        }))
    }

    /// `self(args)`
    pub fn call(self, args: Vec<Expr>) -> Self {
        Expr::Call(Box::new(CallExpr { callee: self, args }))
    }

    /// `self op right`
    pub fn binary(self, op: Operator, right: Expr) -> Self {
        Expr::Binary(Box::new(BinaryExpr {
            left: self,
            op,
            right,
        }))
    }

    /// `((ty)self)` - parenthesized so it can be used as a member access target.
    pub fn cast_to(self, ty: TypeExpr) -> Self {
        Expr::Paren(Box::new(Expr::Cast(Box::new(CastExpr { ty, expr: self }))))
    }

    /// `self = value`
    pub fn assign(self, value: Expr) -> Self {
        Expr::Assign(Box::new(AssignExpr {
            target: self,
            value,
        }))
    }
}

/// A statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// Expression statement (`expr;`)
    Expr(Expr),
    /// `return expr;` or `return;`
    Return(Option<Expr>),
}
