//! Cache Module
//!
//! The lookup cache facade, its options, logical cache names and the value
//! records it holds.

mod logical;
mod lookup;
mod manager;
mod options;
mod types;


// Re-export public types
pub use logical::LogicalCache;
pub use lookup::Lookup;
pub use manager::{site_key, CacheManager};
pub use options::{CacheOptions, KEY_SEPARATOR};
pub use types::{
    AssetTransfer, BaseTemplate, ClientSideComponent, FieldData, ListTemplate, PrincipalType,
    ResolvedUser, SharePointVersion, TermData, TermMapping, TransformerHandle, UrlMapping,
    UserMapping,
};
