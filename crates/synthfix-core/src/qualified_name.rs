use std::fmt;

/// Qualified name for type identity.
///
/// The namespace path is kept separate from the simple name so display code
/// can print the minimally qualified form without re-parsing strings.
///
/// # Examples
///
/// ```
/// use synthfix_core::QualifiedName;
///
/// let base = QualifiedName::global("Base");
/// assert_eq!(base.to_string(), "Base");
///
/// let cmp = QualifiedName::from("System.IComparable");
/// assert_eq!(cmp.simple_name(), "IComparable");
/// assert_eq!(cmp.to_string(), "System.IComparable");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// Simple name (e.g., "Base", "IComparable")
    pub name: String,
    /// Namespace path (e.g., ["System", "Collections"]).
    /// Empty for the global namespace.
    pub namespace: Vec<String>,
}

impl QualifiedName {
    /// Create a qualified name in the global namespace.
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Vec::new(),
        }
    }

    /// Create from a dotted string (e.g., "System.IComparable").
    ///
    /// The last segment is the name, the rest is the namespace. Empty
    /// segments are dropped, so ".System.IComparable" == "System.IComparable".
    pub fn from_qualified_string(s: &str) -> Self {
        let mut parts: Vec<String> = s
            .split('.')
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        match parts.pop() {
            Some(name) => Self {
                name,
                namespace: parts,
            },
            None => Self::global(""),
        }
    }

    /// Get the simple (unqualified) name.
    pub fn simple_name(&self) -> &str {
        &self.name
    }

    /// Compute the type hash of this name.
    pub fn to_type_hash(&self) -> crate::TypeHash {
        crate::TypeHash::from_name(&self.to_string())
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.namespace.join("."), self.name)
        }
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self::from_qualified_string(s)
    }
}

impl From<String> for QualifiedName {
    fn from(s: String) -> Self {
        Self::from_qualified_string(&s)
    }
}
