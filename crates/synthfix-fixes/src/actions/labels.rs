//! Action label disambiguation.

use rustc_hash::{FxHashMap, FxHashSet};

use synthfix_core::DataType;
use synthfix_model::SemanticModel;

/// Two renderings of one candidate label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelParts {
    /// Label used when nothing else shares it.
    pub short: String,
    /// Label with the declaring type or namespace spelled out.
    pub qualified: String,
}

impl LabelParts {
    pub fn new(short: impl Into<String>, qualified: impl Into<String>) -> Self {
        Self {
            short: short.into(),
            qualified: qualified.into(),
        }
    }
}

/// Pick a unique label for every candidate, preserving order.
///
/// Labels whose short form collides fall back to the qualified form. Labels
/// still colliding after that keep the first occurrence bare and number the
/// rest: `X`, `X (2)`, `X (3)`.
pub fn disambiguate(parts: &[LabelParts]) -> Vec<String> {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for part in parts {
        *counts.entry(part.short.as_str()).or_default() += 1;
    }

    let preferred: Vec<&str> = parts
        .iter()
        .map(|p| {
            if counts[p.short.as_str()] > 1 {
                p.qualified.as_str()
            } else {
                p.short.as_str()
            }
        })
        .collect();

    let mut used: FxHashSet<String> = FxHashSet::default();
    let mut labels = Vec::with_capacity(parts.len());
    for label in preferred {
        let mut unique = label.to_string();
        let mut ordinal = 1;
        while used.contains(&unique) {
            ordinal += 1;
            unique = format!("{} ({})", label, ordinal);
        }
        used.insert(unique.clone());
        labels.push(unique);
    }
    labels
}

/// Fully qualified display name of a declared type, generic arguments included.
pub fn qualified_display(model: &dyn SemanticModel, ty: &DataType) -> String {
    let DataType::Named(reference) = ty else {
        return model.display_name(ty);
    };
    let Some(entry) = model.type_entry(reference.definition) else {
        return model.display_name(ty);
    };
    let mut name = entry.qualified_name().to_string();
    if !reference.args.is_empty() {
        let args: Vec<String> = reference
            .args
            .iter()
            .map(|a| qualified_display(model, a))
            .collect();
        name.push('<');
        name.push_str(&args.join(", "));
        name.push('>');
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use synthfix_core::{ClassEntry, InterfaceEntry, TypeHash};
    use synthfix_model::SnapshotBuilder;

    fn labels(parts: &[(&str, &str)]) -> Vec<String> {
        let parts: Vec<LabelParts> = parts
            .iter()
            .map(|(short, qualified)| LabelParts::new(*short, *qualified))
            .collect();
        disambiguate(&parts)
    }

    #[test]
    fn distinct_labels_stay_short() {
        assert_eq!(
            labels(&[("Inner", "Derived.Inner"), ("IInterface.Inner", "Ns.IInterface.Inner")]),
            vec!["Inner", "IInterface.Inner"]
        );
    }

    #[test]
    fn colliding_labels_are_qualified() {
        assert_eq!(
            labels(&[("Shape", "Models.Shape"), ("Shape", "Drawing.Shape"), ("Base", "Base")]),
            vec!["Models.Shape", "Drawing.Shape", "Base"]
        );
    }

    #[test]
    fn remaining_collisions_are_numbered() {
        assert_eq!(
            labels(&[("Inner", "Derived.Inner"), ("Inner", "Derived.Inner"), ("Inner", "Derived.Inner")]),
            vec!["Derived.Inner", "Derived.Inner (2)", "Derived.Inner (3)"]
        );
    }

    #[test]
    fn numbering_skips_taken_labels() {
        assert_eq!(
            labels(&[("A (2)", "A (2)"), ("A", "A"), ("A", "A")]),
            vec!["A (2)", "A", "A (3)"]
        );
    }

    #[test]
    fn qualified_display_spells_out_namespaces() {
        let snapshot = SnapshotBuilder::new()
            .with(InterfaceEntry::new("System.IComparable").with_type_param("T"))
            .and_then(|b| b.with(ClassEntry::new("Models.Shape")))
            .and_then(SnapshotBuilder::build)
            .unwrap();
        let ty = DataType::generic(
            TypeHash::from_name("System.IComparable"),
            vec![DataType::named(TypeHash::from_name("Models.Shape"))],
        );

        assert_eq!(snapshot.display_name(&ty), "IComparable<Shape>");
        assert_eq!(
            qualified_display(&snapshot, &ty),
            "System.IComparable<Models.Shape>"
        );
    }
}
