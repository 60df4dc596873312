//! Logical cache names.

use std::fmt;
use std::str::FromStr;

use crate::error::CacheError;

// == Logical Cache ==
/// One named dictionary held by the cache manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalCache {
    SharePointVersions,
    ExactSharePointVersions,
    TenantIds,
    AssetTransfers,
    SiteComponents,
    BaseTemplate,
    FieldsToCopy,
    FieldMetadata,
    PublishingLibraryNames,
    BlogListNames,
    ResourceStrings,
    PageLayoutMappings,
    UsersByName,
    UsersById,
    UsersByUpn,
    ContentTypeIds,
    TermsById,
    TermsByName,
    TermSets,
    UrlMappings,
    UserMappings,
    TermMappings,
    LastUsedTransformer,
}

impl LogicalCache {
    /// Number of logical caches.
    pub const COUNT: usize = 23;

    /// Every logical cache, in declaration order.
    pub const ALL: [LogicalCache; Self::COUNT] = [
        LogicalCache::SharePointVersions,
        LogicalCache::ExactSharePointVersions,
        LogicalCache::TenantIds,
        LogicalCache::AssetTransfers,
        LogicalCache::SiteComponents,
        LogicalCache::BaseTemplate,
        LogicalCache::FieldsToCopy,
        LogicalCache::FieldMetadata,
        LogicalCache::PublishingLibraryNames,
        LogicalCache::BlogListNames,
        LogicalCache::ResourceStrings,
        LogicalCache::PageLayoutMappings,
        LogicalCache::UsersByName,
        LogicalCache::UsersById,
        LogicalCache::UsersByUpn,
        LogicalCache::ContentTypeIds,
        LogicalCache::TermsById,
        LogicalCache::TermsByName,
        LogicalCache::TermSets,
        LogicalCache::UrlMappings,
        LogicalCache::UserMappings,
        LogicalCache::TermMappings,
        LogicalCache::LastUsedTransformer,
    ];

    /// Stable store name of this logical cache.
    pub const fn name(self) -> &'static str {
        match self {
            LogicalCache::SharePointVersions => "SharePointVersions",
            LogicalCache::ExactSharePointVersions => "ExactSharePointVersions",
            LogicalCache::TenantIds => "TenantIds",
            LogicalCache::AssetTransfers => "AssetTransfers",
            LogicalCache::SiteComponents => "SiteComponents",
            LogicalCache::BaseTemplate => "BaseTemplate",
            LogicalCache::FieldsToCopy => "FieldsToCopy",
            LogicalCache::FieldMetadata => "FieldMetadata",
            LogicalCache::PublishingLibraryNames => "PublishingLibraryNames",
            LogicalCache::BlogListNames => "BlogListNames",
            LogicalCache::ResourceStrings => "ResourceStrings",
            LogicalCache::PageLayoutMappings => "PageLayoutMappings",
            LogicalCache::UsersByName => "UsersByName",
            LogicalCache::UsersById => "UsersById",
            LogicalCache::UsersByUpn => "UsersByUpn",
            LogicalCache::ContentTypeIds => "ContentTypeIds",
            LogicalCache::TermsById => "TermsById",
            LogicalCache::TermsByName => "TermsByName",
            LogicalCache::TermSets => "TermSets",
            LogicalCache::UrlMappings => "UrlMappings",
            LogicalCache::UserMappings => "UserMappings",
            LogicalCache::TermMappings => "TermMappings",
            LogicalCache::LastUsedTransformer => "LastUsedTransformer",
        }
    }

    /// Position in [`LogicalCache::ALL`].
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for LogicalCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogicalCache {
    type Err = CacheError;

    /// Parses a logical cache name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogicalCache::ALL
            .iter()
            .copied()
            .find(|cache| cache.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CacheError::UnknownCache(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<&str> = LogicalCache::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names.len(), LogicalCache::COUNT);
    }

    #[test]
    fn test_index_matches_position() {
        for (position, cache) in LogicalCache::ALL.iter().enumerate() {
            assert_eq!(cache.index(), position);
        }
    }

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!(
            "tenantids".parse::<LogicalCache>().unwrap(),
            LogicalCache::TenantIds
        );
        assert_eq!(
            "UsersByUpn".parse::<LogicalCache>().unwrap(),
            LogicalCache::UsersByUpn
        );
    }

    #[test]
    fn test_parse_unknown() {
        let result = "Nope".parse::<LogicalCache>();
        assert!(matches!(result, Err(CacheError::UnknownCache(_))));
    }
}
