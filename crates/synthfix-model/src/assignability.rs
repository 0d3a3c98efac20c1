//! Assignability of declared types to a target instantiation.
//!
//! A declared type `D` is assignable to a target `A` when:
//! - `D` is `A`,
//! - `D` is a named type with `A` among its (substituted) supertypes, or
//! - `D` is a type parameter with a constraint that is assignable to `A`.
//!
//! `dynamic` and unresolved types are never assignable. A type parameter
//! whose constraints contain either, or whose constraint chain loops back on
//! itself, is malformed and treated as not assignable.

use rustc_hash::FxHashSet;

use synthfix_core::{DataType, TypeHash, TypeRef};

use crate::ProgramSnapshot;

/// Outcome of an assignability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignability {
    Assignable,
    NotAssignable,
    /// The answer cannot be determined (unresolved, dynamic or cyclic).
    Malformed,
}

/// Check if `ty` is assignable to `target` in `snapshot`.
pub fn check_assignable(
    snapshot: &ProgramSnapshot,
    ty: &DataType,
    target: &TypeRef,
) -> Assignability {
    let mut visiting = FxHashSet::default();
    check(snapshot, ty, target, &mut visiting)
}

fn check(
    snapshot: &ProgramSnapshot,
    ty: &DataType,
    target: &TypeRef,
    visiting: &mut FxHashSet<TypeHash>,
) -> Assignability {
    match ty {
        DataType::Dynamic | DataType::Error => Assignability::Malformed,
        DataType::Void | DataType::Primitive(_) => Assignability::NotAssignable,
        DataType::Named(reference) => {
            if !reference.is_resolved() {
                Assignability::Malformed
            } else if snapshot.hierarchy().is_subtype(reference, target) {
                Assignability::Assignable
            } else {
                Assignability::NotAssignable
            }
        }
        DataType::Param(param) => {
            if !visiting.insert(*param) {
                return Assignability::Malformed;
            }
            let Some(entry) = snapshot.type_param(*param) else {
                return Assignability::Malformed;
            };
            if entry.has_malformed_constraint() {
                return Assignability::Malformed;
            }

            // Every constraint is checked so a cycle anywhere in the chain
            // still marks the parameter malformed.
            let mut result = Assignability::NotAssignable;
            for constraint in &entry.constraints {
                match check(snapshot, constraint, target, visiting) {
                    Assignability::Malformed => return Assignability::Malformed,
                    Assignability::Assignable => result = Assignability::Assignable,
                    Assignability::NotAssignable => {}
                }
            }
            visiting.remove(param);
            result
        }
    }
}
