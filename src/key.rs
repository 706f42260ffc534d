//! Identity of an output location

use std::fmt;

use crate::error::OutputError;

/// Namespace plus relative name of an output target
///
/// Equality and hashing cover both fields, so two keys sharing only a
/// namespace or only a name address different targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetKey {
    namespace: String,
    relative_name: String,
}

impl TargetKey {
    /// Create a key; the relative name must not be empty
    pub fn new(
        namespace: impl Into<String>,
        relative_name: impl Into<String>,
    ) -> Result<Self, OutputError> {
        let relative_name = relative_name.into();
        if relative_name.is_empty() {
            return Err(OutputError::invalid_key("relative name is empty"));
        }
        Ok(Self {
            namespace: namespace.into(),
            relative_name,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn relative_name(&self) -> &str {
        &self.relative_name
    }

    /// Namespace as a directory prefix (`com.acme` -> `com/acme/`)
    pub fn namespace_path(&self) -> String {
        if self.namespace.is_empty() {
            String::new()
        } else {
            format!("{}/", self.namespace.replace('.', "/"))
        }
    }
}

impl fmt::Display for TargetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            f.write_str(&self.relative_name)
        } else {
            write!(f, "{}.{}", self.namespace, self.relative_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_display_joins_namespace() {
        let key = TargetKey::new("com.acme", "Foo").unwrap();
        assert_eq!(key.to_string(), "com.acme.Foo");
    }

    #[test]
    fn test_display_omits_empty_namespace() {
        let key = TargetKey::new("", "META-INF/services/com.acme.Plugin").unwrap();
        assert_eq!(key.to_string(), "META-INF/services/com.acme.Plugin");
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = TargetKey::new("com.acme", "");
        assert!(matches!(result, Err(OutputError::InvalidKey { .. })));
    }

    #[test]
    fn test_equality_needs_both_fields() {
        let a = TargetKey::new("com.acme", "Foo").unwrap();
        let same_name = TargetKey::new("org.other", "Foo").unwrap();
        let same_namespace = TargetKey::new("com.acme", "Bar").unwrap();

        assert_ne!(a, same_name);
        assert_ne!(a, same_namespace);
        assert_eq!(a, TargetKey::new("com.acme", "Foo").unwrap());

        let set: HashSet<_> = [a.clone(), same_name, same_namespace, a].into();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_namespace_path() {
        let key = TargetKey::new("com.acme.gen", "Foo").unwrap();
        assert_eq!(key.namespace_path(), "com/acme/gen/");
        let bare = TargetKey::new("", "Foo").unwrap();
        assert_eq!(bare.namespace_path(), "");
    }
}
