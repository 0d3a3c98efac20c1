//! Display names for declared types.
//!
//! Names are minimally qualified: the simple name, unless another type in
//! the snapshot shares it, in which case the namespace is included.

use synthfix_core::syntax::TypeExpr;
use synthfix_core::{DataType, TypeHash, TypeRef};

use crate::ProgramSnapshot;

/// Minimally qualified display name of a declared type.
pub fn display_name(snapshot: &ProgramSnapshot, ty: &DataType) -> String {
    match ty {
        DataType::Void => "void".to_string(),
        DataType::Primitive(kind) => kind.name().to_string(),
        DataType::Named(reference) => type_ref_name(snapshot, reference),
        DataType::Param(param) => snapshot
            .type_param(*param)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| param.to_string()),
        DataType::Dynamic => "dynamic".to_string(),
        DataType::Error => "?".to_string(),
    }
}

/// Minimally qualified display name of an instantiation (`IComparable<Base>`).
pub fn type_ref_name(snapshot: &ProgramSnapshot, reference: &TypeRef) -> String {
    let mut name = definition_name(snapshot, reference.definition);
    if !reference.args.is_empty() {
        let args: Vec<String> = reference
            .args
            .iter()
            .map(|a| display_name(snapshot, a))
            .collect();
        name.push('<');
        name.push_str(&args.join(", "));
        name.push('>');
    }
    name
}

/// Code-model type expression for a declared type.
pub fn type_expr(snapshot: &ProgramSnapshot, ty: &DataType) -> TypeExpr {
    TypeExpr::new(display_name(snapshot, ty))
}

fn definition_name(snapshot: &ProgramSnapshot, definition: TypeHash) -> String {
    match snapshot.get(definition) {
        Some(entry) if snapshot.is_simple_name_ambiguous(entry.name()) => {
            entry.qualified_name().to_string()
        }
        Some(entry) => entry.name().to_string(),
        None => definition.to_string(),
    }
}
