//! Cached value records.
//!
//! Plain data returned by remote lookups. None of them carry behavior beyond
//! small constructors.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product version of a source site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SharePointVersion {
    /// Version could not be determined
    #[default]
    Unknown,
    SharePoint2010,
    SharePoint2013,
    SharePoint2016,
    SharePoint2019,
    SharePointOnline,
}

impl fmt::Display for SharePointVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SharePointVersion::Unknown => "Unknown",
            SharePointVersion::SharePoint2010 => "SharePoint 2010",
            SharePointVersion::SharePoint2013 => "SharePoint 2013",
            SharePointVersion::SharePoint2016 => "SharePoint 2016",
            SharePointVersion::SharePoint2019 => "SharePoint 2019",
            SharePointVersion::SharePointOnline => "SharePoint Online",
        };
        f.write_str(label)
    }
}

/// Kind of principal a user lookup resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PrincipalType {
    #[default]
    User,
    SecurityGroup,
    SharePointGroup,
}

/// A user (or group) resolved against a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedUser {
    /// Site-local numeric id, when known
    pub id: Option<i32>,
    pub login_name: String,
    pub display_name: String,
    pub email: Option<String>,
    pub upn: Option<String>,
    #[serde(default)]
    pub principal_type: PrincipalType,
}

impl ResolvedUser {
    pub fn new(login_name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: None,
            login_name: login_name.into(),
            display_name: display_name.into(),
            email: None,
            upn: None,
            principal_type: PrincipalType::User,
        }
    }
}

/// A taxonomy term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermData {
    pub term_id: Uuid,
    pub term_set_id: Uuid,
    pub label: String,
    /// Full `|`-separated path from the term set root
    pub path: String,
    #[serde(default)]
    pub is_source_term: bool,
}

/// Field descriptor used both for copy plans and field metadata lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldData {
    pub field_id: Uuid,
    pub field_name: String,
    pub field_type: String,
}

impl FieldData {
    pub fn new(field_id: Uuid, field_name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            field_id,
            field_name: field_name.into(),
            field_type: field_type.into(),
        }
    }
}

/// Ledger record of an asset copied to the target site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetTransfer {
    pub source_asset_url: String,
    pub target_asset_folder_url: String,
    pub target_asset_transferred_url: String,
}

impl AssetTransfer {
    /// True when this record is for the same source asset and target folder.
    /// URLs compare case-insensitively.
    pub fn matches(&self, source_asset_url: &str, target_asset_folder_url: &str) -> bool {
        self.source_asset_url.eq_ignore_ascii_case(source_asset_url)
            && self
                .target_asset_folder_url
                .eq_ignore_ascii_case(target_asset_folder_url)
    }
}

/// A client-side component registered on a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSideComponent {
    pub id: String,
    pub name: String,
    pub component_type: i32,
    /// Raw manifest JSON as returned by the site
    pub manifest: String,
}

/// A list in the base site template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTemplate {
    pub url: String,
    pub title: String,
    pub fields: Vec<String>,
}

/// Out-of-the-box site definition used to tell built-in artifacts from
/// customizations. Built once and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseTemplate {
    pub name: String,
    pub lists: Vec<ListTemplate>,
    pub content_types: Vec<String>,
    pub site_fields: Vec<String>,
}

/// The transformer most recently used by the host, kept so follow-up
/// operations can reuse its settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformerHandle {
    pub name: String,
    pub source_site: String,
    pub target_site: Option<String>,
}

/// Source URL to target URL rewrite rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlMapping {
    pub source_url: String,
    pub target_url: String,
}

/// Source principal to target principal rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMapping {
    pub source_user: String,
    pub target_user: String,
}

/// Source term (id or path) to target term rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermMapping {
    pub source_term: String,
    pub target_term: String,
}
