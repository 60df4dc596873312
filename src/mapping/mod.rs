//! Mapping File Loaders
//!
//! Reads URL, user and term mapping tables. Each file holds one
//! `source,target` pair per line; blank lines and `#` comments are ignored.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::cache::{TermMapping, UrlMapping, UserMapping};
use crate::error::{CacheError, Result};

/// Field separator inside a mapping line.
pub const MAPPING_DELIMITER: char = ',';

// == Loaders ==
/// Loads a URL mapping file.
pub fn load_url_mapping(path: &Path) -> Result<Vec<UrlMapping>> {
    load_pairs(path, |source_url, target_url| UrlMapping {
        source_url,
        target_url,
    })
}

/// Loads a user mapping file.
pub fn load_user_mapping(path: &Path) -> Result<Vec<UserMapping>> {
    load_pairs(path, |source_user, target_user| UserMapping {
        source_user,
        target_user,
    })
}

/// Loads a term mapping file.
pub fn load_term_mapping(path: &Path) -> Result<Vec<TermMapping>> {
    load_pairs(path, |source_term, target_term| TermMapping {
        source_term,
        target_term,
    })
}

fn load_pairs<T>(path: &Path, build: impl Fn(String, String) -> T) -> Result<Vec<T>> {
    let content = fs::read_to_string(path).map_err(|source| CacheError::MappingFile {
        path: path.to_path_buf(),
        source,
    })?;

    let pairs = parse_pairs(&content, &path.display().to_string());
    debug!(path = %path.display(), count = pairs.len(), "Loaded mapping file");

    Ok(pairs
        .into_iter()
        .map(|(source, target)| build(source, target))
        .collect())
}

// == Parsing ==
/// Parses mapping lines into `(source, target)` pairs.
///
/// Malformed lines are skipped with a warning; `origin` names the input in
/// that warning.
pub fn parse_pairs(content: &str, origin: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(MAPPING_DELIMITER).map(str::trim).collect();
        match fields.as_slice() {
            [source, target] if !source.is_empty() && !target.is_empty() => {
                pairs.push((source.to_string(), target.to_string()));
            }
            _ => {
                warn!(origin, line = index + 1, "Skipping malformed mapping line");
            }
        }
    }

    pairs
}
