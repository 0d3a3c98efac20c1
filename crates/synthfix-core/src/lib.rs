//! Core types for synthfix.
//!
//! This crate provides the identity and data model shared by the snapshot
//! and fix crates:
//!
//! - [`TypeHash`], [`QualifiedName`], [`Span`] - identity and location
//! - [`DataType`], [`TypeRef`] - declared types with generic arguments
//! - [`entries`] - type and member entries stored in a snapshot
//! - [`syntax`] - code model for synthesized members
//! - [`RegistrationError`], [`EditError`] - error types

pub mod data_type;
pub mod entries;
pub mod error;
pub mod operator;
pub mod qualified_name;
pub mod span;
pub mod syntax;
pub mod type_hash;
pub mod visibility;

pub use data_type::{DataType, PrimitiveKind, TypeRef};
pub use entries::{
    ClassEntry, FieldDef, InterfaceEntry, MemberCategory, MemberEntry, MemberKind,
    MemberModifiers, MemberSignature, MemberSource, MethodDef, Param, PropertyDef, TypeEntry,
    TypeParamEntry, TypeSource,
};
pub use error::{EditError, RegistrationError};
pub use operator::Operator;
pub use qualified_name::QualifiedName;
pub use span::Span;
pub use type_hash::TypeHash;
pub use visibility::Visibility;
