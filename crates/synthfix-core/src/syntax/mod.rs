//! Code model for synthesized members.
//!
//! A small owned syntax tree covering what synthesis emits: forwarding
//! methods and properties, and static relational operators.
//!
//! - [`Expr`], [`Stmt`] - expressions and statements
//! - [`MemberDecl`] - method, operator and property declarations
//! - [`render_member`] - canonical text rendering

mod decl;
mod expr;
mod render;

pub use decl::{
    Body, MemberDecl, MethodDecl, OperatorDecl, ParamDecl, PropertyBody, PropertyDecl,
};
pub use expr::{
    AssignExpr, BinaryExpr, CallExpr, CastExpr, Expr, Literal, MemberExpr, Stmt, TypeExpr,
};
pub use render::render_member;
