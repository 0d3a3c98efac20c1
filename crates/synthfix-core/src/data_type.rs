//! DataType - the declared type of a member, parameter or type argument.
//!
//! Unlike [`TypeHash`], which only identifies a definition, a `DataType`
//! carries generic arguments (`IComparable<Base>`), type parameter references
//! (`T`) and the two sentinel types discovery must reject: `dynamic` and the
//! error type produced when a reference could not be resolved.
//!
//! # Example
//!
//! ```
//! use synthfix_core::{DataType, TypeHash};
//!
//! let base = TypeHash::from_name("Base");
//! let comparable = TypeHash::from_name("System.IComparable");
//!
//! let contract = DataType::generic(comparable, vec![DataType::named(base)]);
//! assert!(contract.is_resolved());
//! assert!(!DataType::Error.is_resolved());
//! ```

use std::fmt;

use crate::TypeHash;

/// Built-in primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    Int,
    Long,
    Float,
    Double,
    String,
    Object,
}

impl PrimitiveKind {
    /// Keyword used when rendering the type.
    pub const fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::String => "string",
            PrimitiveKind::Object => "object",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reference to a named type definition with bound type arguments.
///
/// Non-generic types have an empty argument list. Interface instantiations
/// such as `IComparable<Base>` are `TypeRef`s too.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// Hash of the (unbound) definition.
    pub definition: TypeHash,
    /// Bound type arguments, in declaration order of the definition's parameters.
    pub args: Vec<DataType>,
}

impl TypeRef {
    /// Reference to a non-generic type.
    pub fn new(definition: TypeHash) -> Self {
        Self {
            definition,
            args: Vec::new(),
        }
    }

    /// Reference to a generic instantiation.
    pub fn generic(definition: TypeHash, args: Vec<DataType>) -> Self {
        Self { definition, args }
    }

    /// Whether every argument is resolved.
    pub fn is_resolved(&self) -> bool {
        self.args.iter().all(DataType::is_resolved)
    }

    /// Identity hash of this instantiation.
    pub fn signature_hash(&self) -> TypeHash {
        if self.args.is_empty() {
            self.definition
        } else {
            let args: Vec<TypeHash> = self.args.iter().map(DataType::signature_hash).collect();
            TypeHash::from_instance(self.definition, &args)
        }
    }

    /// Replace type parameter references in the arguments.
    pub fn substitute(&self, params: &[TypeHash], args: &[DataType]) -> TypeRef {
        TypeRef {
            definition: self.definition,
            args: self.args.iter().map(|a| a.substitute(params, args)).collect(),
        }
    }
}

/// A complete declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    /// No value (method return only).
    Void,
    /// Built-in primitive.
    Primitive(PrimitiveKind),
    /// Class, struct or interface, possibly generic.
    Named(TypeRef),
    /// Reference to a generic type parameter.
    Param(TypeHash),
    /// The late-bound `dynamic` type.
    Dynamic,
    /// A reference the semantic model could not resolve.
    Error,
}

impl DataType {
    /// Non-generic named type.
    pub fn named(definition: TypeHash) -> Self {
        DataType::Named(TypeRef::new(definition))
    }

    /// Generic named type.
    pub fn generic(definition: TypeHash, args: Vec<DataType>) -> Self {
        DataType::Named(TypeRef::generic(definition, args))
    }

    /// Type parameter reference.
    pub fn param(param: TypeHash) -> Self {
        DataType::Param(param)
    }

    /// Primitive type.
    pub fn primitive(kind: PrimitiveKind) -> Self {
        DataType::Primitive(kind)
    }

    /// Check if this is `void`.
    pub fn is_void(&self) -> bool {
        matches!(self, DataType::Void)
    }

    /// Check if this is `dynamic`.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, DataType::Dynamic)
    }

    /// Whether the type (including nested arguments) contains no error type.
    pub fn is_resolved(&self) -> bool {
        match self {
            DataType::Error => false,
            DataType::Named(r) => r.is_resolved(),
            _ => true,
        }
    }

    /// Hash used in member signatures.
    ///
    /// Two data types that are equal always share a signature hash.
    pub fn signature_hash(&self) -> TypeHash {
        match self {
            DataType::Void => TypeHash::from_name("void"),
            DataType::Primitive(kind) => TypeHash::from_name(kind.name()),
            DataType::Named(r) => r.signature_hash(),
            DataType::Param(p) => *p,
            DataType::Dynamic => TypeHash::from_name("dynamic"),
            DataType::Error => TypeHash::EMPTY,
        }
    }

    /// Replace each `Param(params[i])` with `args[i]`.
    ///
    /// Parameters without a matching argument are left untouched.
    pub fn substitute(&self, params: &[TypeHash], args: &[DataType]) -> DataType {
        match self {
            DataType::Param(p) => params
                .iter()
                .position(|candidate| candidate == p)
                .and_then(|i| args.get(i))
                .cloned()
                .unwrap_or_else(|| self.clone()),
            DataType::Named(r) => DataType::Named(r.substitute(params, args)),
            other => other.clone(),
        }
    }
}

impl From<TypeRef> for DataType {
    fn from(r: TypeRef) -> Self {
        DataType::Named(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(name: &str) -> TypeHash {
        TypeHash::from_name(name)
    }

    #[test]
    fn resolved_checks_nested_arguments() {
        let nested = DataType::generic(hash("List"), vec![DataType::Error]);
        assert!(!nested.is_resolved());
        assert!(DataType::Dynamic.is_resolved());
        assert!(DataType::named(hash("Base")).is_resolved());
    }

    #[test]
    fn substitute_replaces_parameters() {
        let t = TypeHash::from_type_param(hash("IComparable"), "T");
        let open = DataType::generic(hash("List"), vec![DataType::param(t)]);
        let closed = open.substitute(&[t], &[DataType::named(hash("Base"))]);

        assert_eq!(
            closed,
            DataType::generic(hash("List"), vec![DataType::named(hash("Base"))])
        );
    }

    #[test]
    fn substitute_leaves_unknown_parameters() {
        let t = TypeHash::from_type_param(hash("Box"), "T");
        let u = TypeHash::from_type_param(hash("Box"), "U");
        let ty = DataType::param(u);
        assert_eq!(ty.substitute(&[t], &[DataType::Void]), ty);
    }

    #[test]
    fn signature_hash_distinguishes_instances() {
        let a = DataType::generic(hash("IComparable"), vec![DataType::named(hash("Base"))]);
        let b = DataType::generic(hash("IComparable"), vec![DataType::named(hash("Derived"))]);
        assert_ne!(a.signature_hash(), b.signature_hash());
        assert_eq!(
            DataType::named(hash("Base")).signature_hash(),
            hash("Base")
        );
    }

    #[test]
    fn primitive_names() {
        assert_eq!(PrimitiveKind::Int.to_string(), "int");
        assert_eq!(PrimitiveKind::Bool.name(), "bool");
    }
}
