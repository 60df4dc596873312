//! Cache Manager Module
//!
//! The facade callers go through. Every logical cache is one dictionary
//! stored whole under one store key; accessors read it, look up or insert a
//! sub-key, and write the dictionary back. Each logical cache has its own
//! mutex so a read-modify-write cycle never loses a concurrent writer's entry.

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::cache::{
    AssetTransfer, BaseTemplate, CacheOptions, ClientSideComponent, FieldData, LogicalCache,
    Lookup, ResolvedUser, SharePointVersion, TermData, TermMapping, TransformerHandle,
    UrlMapping, UserMapping,
};
use crate::codec::{self, GuidMap, KeyedMap, MapKey};
use crate::error::Result;
use crate::mapping;
use crate::store::KeyValueStore;

/// Bound shared by everything the manager stores.
trait CacheValue: Clone + Serialize + DeserializeOwned {}
impl<T: Clone + Serialize + DeserializeOwned> CacheValue for T {}

// == Key Normalization ==
/// Normalizes a site URL for use as a sub-key: trimmed, lower-cased and
/// without a trailing slash.
pub fn site_key(url: &str) -> String {
    url.trim().trim_end_matches('/').to_lowercase()
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

// == Cache Manager ==
/// Typed, process-wide lookup cache over a [`KeyValueStore`].
pub struct CacheManager {
    store: Arc<dyn KeyValueStore>,
    options: CacheOptions,
    locks: [Mutex<()>; LogicalCache::COUNT],
}

impl fmt::Debug for CacheManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheManager")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl CacheManager {
    // == Constructor ==
    /// Creates a manager writing through `store` with the given options.
    pub fn new(store: Arc<dyn KeyValueStore>, options: CacheOptions) -> Self {
        Self {
            store,
            options,
            locks: std::array::from_fn(|_| Mutex::new(())),
        }
    }

    pub fn options(&self) -> &CacheOptions {
        &self.options
    }

    /// Store key holding the given logical cache.
    pub fn key_for(&self, cache: LogicalCache) -> String {
        self.options.qualified_key(cache.name())
    }

    // ========================================================================
    // Generic plumbing
    // ========================================================================

    fn load<T: DeserializeOwned + Default>(&self, cache: LogicalCache) -> Result<T> {
        let key = self.key_for(cache);
        let bytes = self.store.get(&key);
        codec::decode_or_default(&key, bytes.as_deref()).inspect_err(|e| {
            error!(cache = %cache, error = %e, "Discarding read of undecodable logical cache");
        })
    }

    fn save<T: Serialize>(&self, cache: LogicalCache, value: &T) -> Result<()> {
        let bytes = codec::encode(value)?;
        self.store
            .set(&self.key_for(cache), bytes, &self.options.expiration);
        Ok(())
    }

    /// Reads a logical cache under its lock.
    fn read<T, R>(&self, cache: LogicalCache, f: impl FnOnce(&T) -> R) -> Result<R>
    where
        T: DeserializeOwned + Default,
    {
        let _guard = self.locks[cache.index()].lock();
        let value = self.load::<T>(cache)?;
        Ok(f(&value))
    }

    /// Read-modify-write of a logical cache under its lock. The closure
    /// returns its result and whether the dictionary changed; unchanged
    /// dictionaries are not written back.
    fn update<T, R>(&self, cache: LogicalCache, f: impl FnOnce(&mut T) -> (R, bool)) -> Result<R>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        let _guard = self.locks[cache.index()].lock();
        let mut value = self.load::<T>(cache)?;
        let (result, changed) = f(&mut value);
        if changed {
            self.save(cache, &value)?;
        }
        Ok(result)
    }

    fn get_entry<K: MapKey, V: CacheValue>(&self, cache: LogicalCache, key: &K) -> Result<Option<V>> {
        self.read(cache, |map: &KeyedMap<K, V>| map.get(key).cloned())
    }

    /// Inserts `value` unless `key` is present. Returns the value now cached
    /// and whether this call inserted it.
    fn insert_if_absent<K: MapKey, V: CacheValue>(
        &self,
        cache: LogicalCache,
        key: K,
        value: V,
    ) -> Result<(V, bool)> {
        self.update(cache, |map: &mut KeyedMap<K, V>| match map.get(&key) {
            Some(existing) => ((existing.clone(), false), false),
            None => {
                map.insert(key, value.clone());
                ((value, true), true)
            }
        })
    }

    fn get_nested<K1: MapKey, K2: MapKey, V: CacheValue>(
        &self,
        cache: LogicalCache,
        outer: &K1,
        inner: &K2,
    ) -> Result<Option<V>> {
        self.read(cache, |map: &KeyedMap<K1, KeyedMap<K2, V>>| {
            map.get(outer).and_then(|nested| nested.get(inner)).cloned()
        })
    }

    fn insert_nested_if_absent<K1: MapKey, K2: MapKey, V: CacheValue>(
        &self,
        cache: LogicalCache,
        outer: K1,
        inner: K2,
        value: V,
    ) -> Result<(V, bool)> {
        self.update(cache, |map: &mut KeyedMap<K1, KeyedMap<K2, V>>| {
            let nested = map.entry(outer).or_default();
            match nested.get(&inner) {
                Some(existing) => ((existing.clone(), false), false),
                None => {
                    nested.insert(inner, value.clone());
                    ((value, true), true)
                }
            }
        })
    }

    fn get_singleton<V: CacheValue>(&self, cache: LogicalCache) -> Result<Option<V>> {
        self.read(cache, |slot: &Option<V>| slot.clone())
    }

    fn set_singleton_if_absent<V: CacheValue>(&self, cache: LogicalCache, value: V) -> Result<(V, bool)> {
        self.update(cache, |slot: &mut Option<V>| {
            if let Some(existing) = slot {
                return ((existing.clone(), false), false);
            }
            *slot = Some(value.clone());
            ((value, true), true)
        })
    }

    /// Shared miss path of the computed accessors: use `cached` if present,
    /// otherwise run `compute` outside any lock and store what it found.
    fn resolve<V, E: fmt::Display>(
        &self,
        cache: LogicalCache,
        sub_key: &dyn fmt::Display,
        cached: Option<V>,
        compute: impl FnOnce() -> std::result::Result<Option<V>, E>,
        store: impl FnOnce(V) -> Result<(V, bool)>,
    ) -> Result<Lookup<V>> {
        if let Some(value) = cached {
            debug!(cache = %cache, key = %sub_key, "Cache hit");
            return Ok(Lookup::Found(value));
        }

        debug!(cache = %cache, key = %sub_key, "Cache miss, computing");
        match compute() {
            Ok(Some(value)) => {
                let (winner, _) = store(value)?;
                Ok(Lookup::Found(winner))
            }
            Ok(None) => Ok(Lookup::NotFound),
            Err(e) => {
                warn!(cache = %cache, key = %sub_key, error = %e, "Remote lookup failed");
                Ok(Lookup::Failed(e.to_string()))
            }
        }
    }

    fn get_or_compute<K, V, E>(
        &self,
        cache: LogicalCache,
        key: K,
        compute: impl FnOnce() -> std::result::Result<Option<V>, E>,
    ) -> Result<Lookup<V>>
    where
        K: MapKey + fmt::Display,
        V: CacheValue,
        E: fmt::Display,
    {
        let cached = self.get_entry::<K, V>(cache, &key)?;
        self.resolve(cache, &key, cached, compute, |value| {
            self.insert_if_absent(cache, key.clone(), value)
        })
    }

    fn get_or_compute_nested<K1, K2, V, E>(
        &self,
        cache: LogicalCache,
        outer: K1,
        inner: K2,
        compute: impl FnOnce() -> std::result::Result<Option<V>, E>,
    ) -> Result<Lookup<V>>
    where
        K1: MapKey + fmt::Display,
        K2: MapKey + fmt::Display,
        V: CacheValue,
        E: fmt::Display,
    {
        let cached = self.get_nested::<K1, K2, V>(cache, &outer, &inner)?;
        let label = format!("{}|{}", outer, inner);
        self.resolve(cache, &label, cached, compute, |value| {
            self.insert_nested_if_absent(cache, outer, inner, value)
        })
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    // == Clear ==
    /// Drops one logical cache; the next read sees it empty.
    pub fn clear(&self, cache: LogicalCache) {
        let _guard = self.locks[cache.index()].lock();
        self.store.remove(&self.key_for(cache));
        info!(cache = %cache, "Cleared logical cache");
    }

    // == Clear All ==
    /// Drops every logical cache.
    pub fn clear_all(&self) {
        for cache in LogicalCache::ALL {
            let _guard = self.locks[cache.index()].lock();
            self.store.remove(&self.key_for(cache));
        }
        info!(count = LogicalCache::COUNT, "Cleared all logical caches");
    }

    /// True when the store currently holds data for `cache`.
    pub fn is_populated(&self, cache: LogicalCache) -> bool {
        self.store.get(&self.key_for(cache)).is_some()
    }

    /// Stored contents of a logical cache as JSON, for inspection.
    pub fn raw_entry(&self, cache: LogicalCache) -> Result<Option<serde_json::Value>> {
        let key = self.key_for(cache);
        self.store
            .get(&key)
            .map(|bytes| codec::decode(&key, &bytes))
            .transpose()
    }

    // ========================================================================
    // Site version and identity
    // ========================================================================

    /// Cached product version of a site, `Unknown` on miss.
    pub fn sharepoint_version(&self, site_url: &str) -> Result<SharePointVersion> {
        Ok(self
            .get_entry(LogicalCache::SharePointVersions, &site_key(site_url))?
            .unwrap_or_default())
    }

    /// Caches a site's version. `Unknown` is never stored, so a later
    /// detection can still fill the slot.
    pub fn set_sharepoint_version(&self, site_url: &str, version: SharePointVersion) -> Result<bool> {
        if version == SharePointVersion::Unknown {
            return Ok(false);
        }
        let (_, inserted) =
            self.insert_if_absent(LogicalCache::SharePointVersions, site_key(site_url), version)?;
        Ok(inserted)
    }

    /// Cached version, or the result of `detect` on miss. A detected
    /// `Unknown` is reported as not found.
    pub fn sharepoint_version_or_detect<E: fmt::Display>(
        &self,
        site_url: &str,
        detect: impl FnOnce() -> std::result::Result<SharePointVersion, E>,
    ) -> Result<Lookup<SharePointVersion>> {
        self.get_or_compute(LogicalCache::SharePointVersions, site_key(site_url), || {
            detect().map(|version| Some(version).filter(|v| *v != SharePointVersion::Unknown))
        })
    }

    /// Cached exact build string of a site, empty on miss.
    pub fn exact_version(&self, site_url: &str) -> Result<String> {
        Ok(self
            .get_entry(LogicalCache::ExactSharePointVersions, &site_key(site_url))?
            .unwrap_or_default())
    }

    pub fn set_exact_version(&self, site_url: &str, version: impl Into<String>) -> Result<bool> {
        let (_, inserted) = self.insert_if_absent(
            LogicalCache::ExactSharePointVersions,
            site_key(site_url),
            version.into(),
        )?;
        Ok(inserted)
    }

    /// Cached tenant id of a site, nil GUID on miss.
    pub fn tenant_id(&self, site_url: &str) -> Result<Uuid> {
        Ok(self
            .get_entry(LogicalCache::TenantIds, &site_key(site_url))?
            .unwrap_or(Uuid::nil()))
    }

    /// Caches a site's tenant id. The nil GUID is never stored.
    pub fn set_tenant_id(&self, site_url: &str, tenant_id: Uuid) -> Result<bool> {
        if tenant_id.is_nil() {
            return Ok(false);
        }
        let (_, inserted) =
            self.insert_if_absent(LogicalCache::TenantIds, site_key(site_url), tenant_id)?;
        Ok(inserted)
    }

    pub fn tenant_id_or_resolve<E: fmt::Display>(
        &self,
        site_url: &str,
        resolve: impl FnOnce() -> std::result::Result<Option<Uuid>, E>,
    ) -> Result<Lookup<Uuid>> {
        self.get_or_compute(LogicalCache::TenantIds, site_key(site_url), || {
            resolve().map(|id| id.filter(|id| !id.is_nil()))
        })
    }

    // ========================================================================
    // Assets and components
    // ========================================================================

    /// Looks up a previous transfer of `source_asset_url` into `target_folder_url`.
    pub fn transferred_asset(
        &self,
        source_asset_url: &str,
        target_folder_url: &str,
    ) -> Result<Option<AssetTransfer>> {
        self.read(LogicalCache::AssetTransfers, |ledger: &Vec<AssetTransfer>| {
            ledger
                .iter()
                .find(|t| t.matches(source_asset_url, target_folder_url))
                .cloned()
        })
    }

    /// Adds a transfer to the ledger unless the same source and target folder
    /// are already recorded.
    pub fn record_asset_transfer(&self, transfer: AssetTransfer) -> Result<bool> {
        self.update(LogicalCache::AssetTransfers, |ledger: &mut Vec<AssetTransfer>| {
            let known = ledger.iter().any(|t| {
                t.matches(&transfer.source_asset_url, &transfer.target_asset_folder_url)
            });
            if known {
                (false, false)
            } else {
                ledger.push(transfer);
                (true, true)
            }
        })
    }

    /// Client-side components available on a site, empty on miss.
    pub fn site_components(&self, site_url: &str) -> Result<Vec<ClientSideComponent>> {
        Ok(self
            .get_entry(LogicalCache::SiteComponents, &site_key(site_url))?
            .unwrap_or_default())
    }

    pub fn set_site_components(
        &self,
        site_url: &str,
        components: Vec<ClientSideComponent>,
    ) -> Result<bool> {
        let (_, inserted) =
            self.insert_if_absent(LogicalCache::SiteComponents, site_key(site_url), components)?;
        Ok(inserted)
    }

    pub fn site_components_or_load<E: fmt::Display>(
        &self,
        site_url: &str,
        load: impl FnOnce() -> std::result::Result<Vec<ClientSideComponent>, E>,
    ) -> Result<Lookup<Vec<ClientSideComponent>>> {
        self.get_or_compute(LogicalCache::SiteComponents, site_key(site_url), || {
            load().map(Some)
        })
    }

    // ========================================================================
    // Templates and fields
    // ========================================================================

    /// The base site template, if it has been built.
    pub fn base_template(&self) -> Result<Option<BaseTemplate>> {
        self.get_singleton(LogicalCache::BaseTemplate)
    }

    /// Returns the base template, running `build` only if none is cached.
    pub fn base_template_or_build<E: fmt::Display>(
        &self,
        build: impl FnOnce() -> std::result::Result<BaseTemplate, E>,
    ) -> Result<Lookup<BaseTemplate>> {
        let cached = self.get_singleton(LogicalCache::BaseTemplate)?;
        self.resolve(
            LogicalCache::BaseTemplate,
            &"base",
            cached,
            || build().map(Some),
            |template| self.set_singleton_if_absent(LogicalCache::BaseTemplate, template),
        )
    }

    /// Field copy plan for a list, `None` on miss.
    pub fn fields_to_copy(&self, list_id: &str) -> Result<Option<Vec<FieldData>>> {
        self.get_entry(LogicalCache::FieldsToCopy, &name_key(list_id))
    }

    pub fn set_fields_to_copy(&self, list_id: &str, fields: Vec<FieldData>) -> Result<bool> {
        let (_, inserted) =
            self.insert_if_absent(LogicalCache::FieldsToCopy, name_key(list_id), fields)?;
        Ok(inserted)
    }

    /// Field copy plan for a list, computing it once on miss.
    pub fn fields_to_copy_or_compute<E: fmt::Display>(
        &self,
        list_id: &str,
        compute: impl FnOnce() -> std::result::Result<Vec<FieldData>, E>,
    ) -> Result<Lookup<Vec<FieldData>>> {
        self.get_or_compute(LogicalCache::FieldsToCopy, name_key(list_id), || {
            compute().map(Some)
        })
    }

    pub fn field_metadata(&self, field_id: Uuid) -> Result<Option<FieldData>> {
        self.get_entry(LogicalCache::FieldMetadata, &field_id)
    }

    pub fn set_field_metadata(&self, field: FieldData) -> Result<bool> {
        let (_, inserted) =
            self.insert_if_absent(LogicalCache::FieldMetadata, field.field_id, field)?;
        Ok(inserted)
    }

    // ========================================================================
    // Localized names and resource strings
    // ========================================================================

    /// Display name of the publishing pages library for a locale, empty on miss.
    pub fn publishing_library_name(&self, lcid: u32) -> Result<String> {
        Ok(self
            .get_entry(LogicalCache::PublishingLibraryNames, &lcid)?
            .unwrap_or_default())
    }

    pub fn set_publishing_library_name(&self, lcid: u32, name: impl Into<String>) -> Result<bool> {
        let (_, inserted) =
            self.insert_if_absent(LogicalCache::PublishingLibraryNames, lcid, name.into())?;
        Ok(inserted)
    }

    pub fn publishing_library_name_or_resolve<E: fmt::Display>(
        &self,
        lcid: u32,
        resolve: impl FnOnce() -> std::result::Result<Option<String>, E>,
    ) -> Result<Lookup<String>> {
        self.get_or_compute(LogicalCache::PublishingLibraryNames, lcid, resolve)
    }

    /// Display name of the blog posts list for a locale, empty on miss.
    pub fn blog_list_name(&self, lcid: u32) -> Result<String> {
        Ok(self
            .get_entry(LogicalCache::BlogListNames, &lcid)?
            .unwrap_or_default())
    }

    pub fn set_blog_list_name(&self, lcid: u32, name: impl Into<String>) -> Result<bool> {
        let (_, inserted) = self.insert_if_absent(LogicalCache::BlogListNames, lcid, name.into())?;
        Ok(inserted)
    }

    pub fn blog_list_name_or_resolve<E: fmt::Display>(
        &self,
        lcid: u32,
        resolve: impl FnOnce() -> std::result::Result<Option<String>, E>,
    ) -> Result<Lookup<String>> {
        self.get_or_compute(LogicalCache::BlogListNames, lcid, resolve)
    }

    /// Translated resource string for a locale.
    pub fn resource_string(&self, lcid: u32, resource_key: &str) -> Result<Option<String>> {
        self.get_nested::<u32, String, String>(
            LogicalCache::ResourceStrings,
            &lcid,
            &resource_key.to_string(),
        )
    }

    pub fn set_resource_string(
        &self,
        lcid: u32,
        resource_key: &str,
        value: impl Into<String>,
    ) -> Result<bool> {
        let (_, inserted) = self.insert_nested_if_absent::<u32, String, String>(
            LogicalCache::ResourceStrings,
            lcid,
            resource_key.to_string(),
            value.into(),
        )?;
        Ok(inserted)
    }

    pub fn resource_string_or_resolve<E: fmt::Display>(
        &self,
        lcid: u32,
        resource_key: &str,
        resolve: impl FnOnce() -> std::result::Result<Option<String>, E>,
    ) -> Result<Lookup<String>> {
        self.get_or_compute_nested(
            LogicalCache::ResourceStrings,
            lcid,
            resource_key.to_string(),
            resolve,
        )
    }

    /// Generated page layout mapping for a site.
    pub fn page_layout_mapping(&self, site_url: &str) -> Result<Option<String>> {
        self.get_entry(LogicalCache::PageLayoutMappings, &site_key(site_url))
    }

    pub fn set_page_layout_mapping(&self, site_url: &str, mapping: impl Into<String>) -> Result<bool> {
        let (_, inserted) = self.insert_if_absent(
            LogicalCache::PageLayoutMappings,
            site_key(site_url),
            mapping.into(),
        )?;
        Ok(inserted)
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub fn user_by_name(&self, site_url: &str, user_name: &str) -> Result<Option<ResolvedUser>> {
        self.get_nested::<String, String, ResolvedUser>(
            LogicalCache::UsersByName,
            &site_key(site_url),
            &name_key(user_name),
        )
    }

    pub fn set_user_by_name(&self, site_url: &str, user_name: &str, user: ResolvedUser) -> Result<bool> {
        let (_, inserted) = self.insert_nested_if_absent(
            LogicalCache::UsersByName,
            site_key(site_url),
            name_key(user_name),
            user,
        )?;
        Ok(inserted)
    }

    /// Resolves a user by login or display name, caching successful results.
    pub fn resolve_user_by_name<E: fmt::Display>(
        &self,
        site_url: &str,
        user_name: &str,
        resolve: impl FnOnce() -> std::result::Result<Option<ResolvedUser>, E>,
    ) -> Result<Lookup<ResolvedUser>> {
        self.get_or_compute_nested(
            LogicalCache::UsersByName,
            site_key(site_url),
            name_key(user_name),
            resolve,
        )
    }

    pub fn user_by_id(&self, site_url: &str, user_id: i32) -> Result<Option<ResolvedUser>> {
        self.get_nested::<String, i32, ResolvedUser>(
            LogicalCache::UsersById,
            &site_key(site_url),
            &user_id,
        )
    }

    pub fn set_user_by_id(&self, site_url: &str, user_id: i32, user: ResolvedUser) -> Result<bool> {
        let (_, inserted) =
            self.insert_nested_if_absent(LogicalCache::UsersById, site_key(site_url), user_id, user)?;
        Ok(inserted)
    }

    pub fn resolve_user_by_id<E: fmt::Display>(
        &self,
        site_url: &str,
        user_id: i32,
        resolve: impl FnOnce() -> std::result::Result<Option<ResolvedUser>, E>,
    ) -> Result<Lookup<ResolvedUser>> {
        self.get_or_compute_nested(LogicalCache::UsersById, site_key(site_url), user_id, resolve)
    }

    pub fn user_by_upn(&self, upn: &str) -> Result<Option<ResolvedUser>> {
        self.get_entry(LogicalCache::UsersByUpn, &name_key(upn))
    }

    pub fn set_user_by_upn(&self, upn: &str, user: ResolvedUser) -> Result<bool> {
        let (_, inserted) = self.insert_if_absent(LogicalCache::UsersByUpn, name_key(upn), user)?;
        Ok(inserted)
    }

    pub fn resolve_user_by_upn<E: fmt::Display>(
        &self,
        upn: &str,
        resolve: impl FnOnce() -> std::result::Result<Option<ResolvedUser>, E>,
    ) -> Result<Lookup<ResolvedUser>> {
        self.get_or_compute(LogicalCache::UsersByUpn, name_key(upn), resolve)
    }

    // ========================================================================
    // Content types and taxonomy
    // ========================================================================

    fn content_type_key(site_url: &str, content_type_name: &str) -> String {
        format!("{}|{}", site_key(site_url), name_key(content_type_name))
    }

    pub fn content_type_id(&self, site_url: &str, content_type_name: &str) -> Result<Option<String>> {
        self.get_entry(
            LogicalCache::ContentTypeIds,
            &Self::content_type_key(site_url, content_type_name),
        )
    }

    pub fn set_content_type_id(
        &self,
        site_url: &str,
        content_type_name: &str,
        content_type_id: impl Into<String>,
    ) -> Result<bool> {
        let (_, inserted) = self.insert_if_absent(
            LogicalCache::ContentTypeIds,
            Self::content_type_key(site_url, content_type_name),
            content_type_id.into(),
        )?;
        Ok(inserted)
    }

    pub fn term_by_id(&self, term_id: Uuid) -> Result<Option<TermData>> {
        self.get_entry(LogicalCache::TermsById, &term_id)
    }

    pub fn set_term_by_id(&self, term: TermData) -> Result<bool> {
        let (_, inserted) = self.insert_if_absent(LogicalCache::TermsById, term.term_id, term)?;
        Ok(inserted)
    }

    pub fn resolve_term_by_id<E: fmt::Display>(
        &self,
        term_id: Uuid,
        resolve: impl FnOnce() -> std::result::Result<Option<TermData>, E>,
    ) -> Result<Lookup<TermData>> {
        self.get_or_compute(LogicalCache::TermsById, term_id, resolve)
    }

    /// Term by label or `|`-separated path, case-insensitive.
    pub fn term_by_name(&self, term_name: &str) -> Result<Option<TermData>> {
        self.get_entry(LogicalCache::TermsByName, &name_key(term_name))
    }

    pub fn set_term_by_name(&self, term_name: &str, term: TermData) -> Result<bool> {
        let (_, inserted) =
            self.insert_if_absent(LogicalCache::TermsByName, name_key(term_name), term)?;
        Ok(inserted)
    }

    pub fn resolve_term_by_name<E: fmt::Display>(
        &self,
        term_name: &str,
        resolve: impl FnOnce() -> std::result::Result<Option<TermData>, E>,
    ) -> Result<Lookup<TermData>> {
        self.get_or_compute(LogicalCache::TermsByName, name_key(term_name), resolve)
    }

    /// All cached terms of a term set.
    pub fn term_set(&self, term_set_id: Uuid) -> Result<Option<GuidMap<TermData>>> {
        self.get_entry(LogicalCache::TermSets, &term_set_id)
    }

    pub fn term_in_set(&self, term_set_id: Uuid, term_id: Uuid) -> Result<Option<TermData>> {
        self.get_nested::<Uuid, Uuid, TermData>(LogicalCache::TermSets, &term_set_id, &term_id)
    }

    /// Loads a term set once; later calls return the cached terms.
    pub fn populate_term_set<E: fmt::Display>(
        &self,
        term_set_id: Uuid,
        load: impl FnOnce() -> std::result::Result<Option<GuidMap<TermData>>, E>,
    ) -> Result<Lookup<GuidMap<TermData>>> {
        self.get_or_compute(LogicalCache::TermSets, term_set_id, load)
    }

    /// Replaces the cached terms of a term set outright.
    pub fn replace_term_set(&self, term_set_id: Uuid, terms: GuidMap<TermData>) -> Result<()> {
        self.update(LogicalCache::TermSets, |sets: &mut GuidMap<GuidMap<TermData>>| {
            sets.insert(term_set_id, terms);
            ((), true)
        })
    }

    // ========================================================================
    // Mapping files
    // ========================================================================

    fn mappings_or_load<T: CacheValue>(
        &self,
        cache: LogicalCache,
        path: &Path,
        loader: fn(&Path) -> Result<Vec<T>>,
    ) -> Result<Vec<T>> {
        let path_key = fs::canonicalize(path)
            .unwrap_or_else(|_| path.to_path_buf())
            .to_string_lossy()
            .into_owned();

        if let Some(mappings) = self.get_entry::<String, Vec<T>>(cache, &path_key)? {
            debug!(cache = %cache, path = %path_key, "Cache hit");
            return Ok(mappings);
        }

        let mappings = loader(path)?;
        info!(cache = %cache, path = %path_key, count = mappings.len(), "Loaded mapping file");
        let (winner, _) = self.insert_if_absent(cache, path_key, mappings)?;
        Ok(winner)
    }

    /// URL mappings from `path`, read from disk only on first use.
    pub fn url_mappings(&self, path: &Path) -> Result<Vec<UrlMapping>> {
        self.mappings_or_load(LogicalCache::UrlMappings, path, mapping::load_url_mapping)
    }

    pub fn user_mappings(&self, path: &Path) -> Result<Vec<UserMapping>> {
        self.mappings_or_load(LogicalCache::UserMappings, path, mapping::load_user_mapping)
    }

    pub fn term_mappings(&self, path: &Path) -> Result<Vec<TermMapping>> {
        self.mappings_or_load(LogicalCache::TermMappings, path, mapping::load_term_mapping)
    }

    // ========================================================================
    // Transformer handle
    // ========================================================================

    pub fn last_used_transformer(&self) -> Result<Option<TransformerHandle>> {
        self.get_singleton(LogicalCache::LastUsedTransformer)
    }

    /// Records the most recent transformer, replacing any earlier one.
    pub fn set_last_used_transformer(&self, handle: TransformerHandle) -> Result<()> {
        self.update(
            LogicalCache::LastUsedTransformer,
            |slot: &mut Option<TransformerHandle>| {
                *slot = Some(handle);
                ((), true)
            },
        )
    }
}
