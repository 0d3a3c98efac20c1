//! Generic type parameter entry.

use crate::{DataType, TypeHash};

/// A generic type parameter declared on a class or interface.
///
/// `class Derived<T> : Base where T : Base` declares one parameter `T` with
/// the constraint list `[Base]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParamEntry {
    /// Parameter name (e.g., "T").
    pub name: String,
    /// Hash scoped to the owner, see [`TypeHash::from_type_param`].
    pub type_hash: TypeHash,
    /// Declaring type.
    pub owner: TypeHash,
    /// Constraint types, in declaration order.
    pub constraints: Vec<DataType>,
}

impl TypeParamEntry {
    /// Create an unconstrained parameter.
    pub fn new(owner: TypeHash, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            type_hash: TypeHash::from_type_param(owner, &name),
            name,
            owner,
            constraints: Vec::new(),
        }
    }

    /// Add a constraint.
    pub fn with_constraint(mut self, constraint: DataType) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Check if any constraint is unresolved or `dynamic`.
    ///
    /// Such a constraint set cannot prove assignability to anything.
    pub fn has_malformed_constraint(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| !c.is_resolved() || c.is_dynamic())
    }
}
