//! Snapshot entry types.
//!
//! - [`TypeEntry`] - Unified enum wrapping all type entries
//! - [`ClassEntry`] - Class and struct types (including generic definitions)
//! - [`InterfaceEntry`] - Interface types
//! - [`TypeParamEntry`] - Generic type parameters
//! - [`MemberEntry`] - Fields, properties, methods and operators
//!
//! Supporting types:
//! - [`TypeSource`], [`MemberSource`] - Origin tracking (document, metadata, edit)

mod class;
mod interface;
mod member;
mod source;
mod type_entry;
mod type_param;

// Source tracking
pub use source::{MemberSource, TypeSource};

// Members
pub use member::{
    FieldDef, MemberCategory, MemberEntry, MemberKind, MemberModifiers, MemberSignature,
    MethodDef, Param, PropertyDef,
};

// Individual entry types
pub use class::ClassEntry;
pub use interface::InterfaceEntry;
pub use type_param::TypeParamEntry;

// Unified type entry
pub use type_entry::TypeEntry;
