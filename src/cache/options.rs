//! Cache Options Module
//!
//! Deployment-scoped key prefix and default expiration.

use crate::store::ExpirationPolicy;

/// Separator between the deployment prefix and the logical cache name.
pub const KEY_SEPARATOR: char = '|';

// == Cache Options ==
/// Settings applied uniformly to every store operation of one manager.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheOptions {
    /// Namespace for store keys. `None` and `Some("")` are the same,
    /// unprefixed namespace.
    pub key_prefix: Option<String>,
    /// Expiration passed to every store write
    pub expiration: ExpirationPolicy,
}

impl CacheOptions {
    /// Creates options with the given prefix and expiration.
    pub fn new(key_prefix: Option<String>, expiration: ExpirationPolicy) -> Self {
        Self {
            key_prefix,
            expiration,
        }
    }

    /// Shorthand for options with a prefix and no expiration. An empty
    /// prefix yields unprefixed options.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let key_prefix = (!prefix.is_empty()).then_some(prefix);
        Self::new(key_prefix, ExpirationPolicy::Never)
    }

    // == Qualified Key ==
    /// Returns the store key for a logical cache name.
    pub fn qualified_key(&self, name: &str) -> String {
        match self.key_prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => format!("{}{}{}", prefix, KEY_SEPARATOR, name),
            _ => name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_prefix_leaves_name() {
        let options = CacheOptions::default();
        assert_eq!(options.qualified_key("TenantIds"), "TenantIds");
        assert_eq!(options.expiration, ExpirationPolicy::Never);
    }

    #[test]
    fn test_empty_prefix_leaves_name() {
        let options = CacheOptions::with_prefix("");
        assert_eq!(options.key_prefix, None);
        assert_eq!(options, CacheOptions::default());
        assert_eq!(options.qualified_key("TenantIds"), "TenantIds");

        let explicit = CacheOptions::new(Some(String::new()), ExpirationPolicy::Never);
        assert_eq!(explicit.qualified_key("TenantIds"), "TenantIds");
    }

    #[test]
    fn test_prefix_is_joined() {
        let options = CacheOptions::with_prefix("contoso");
        assert_eq!(options.qualified_key("TenantIds"), "contoso|TenantIds");
    }

    #[test]
    fn test_distinct_prefixes_distinct_keys() {
        let a = CacheOptions::with_prefix("a");
        let b = CacheOptions::with_prefix("b");
        assert_ne!(a.qualified_key("UsersByUpn"), b.qualified_key("UsersByUpn"));
    }
}
