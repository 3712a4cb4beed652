//! # Catalog Identifier Newtypes
//!
//! Domain-primitive newtypes for the identifiers that appear in a metadata
//! import file. Each identifier is a distinct type; you cannot pass an
//! [`EntryTypeName`] where an [`EntryName`] is expected.
//!
//! ## Validation
//!
//! All identifiers validate their format at construction time and keep the
//! original string verbatim. Entry names and entry types are prefix-checked:
//! connectors append hierarchy after the entry id
//! (`…/entries/db-host/databases/sales/tables/orders`), so only the leading
//! `projects/…/entries/<id>` structure is enforced.
//!
//! | Type                   | Format |
//! |------------------------|--------|
//! | [`EntryName`]          | `projects/<p>/locations/<l>/entryGroups/<g>/entries/<id>…` |
//! | [`EntryTypeName`]      | `projects/<p>/locations/<l>/entryTypes/<id>…` |
//! | [`FullyQualifiedName`] | `<scheme>:`<host>`(.<segment>)*` |
//! | [`AspectKey`]          | `<project>.<location>.<id>` |

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// Character classes
// ---------------------------------------------------------------------------

fn is_project_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'
}

fn is_location_char(c: char) -> bool {
    is_project_char(c) || c == '_'
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_host_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '.' | '-')
}

fn is_segment_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '#' | '-')
}

fn non_empty_all(s: &str, pred: fn(char) -> bool) -> bool {
    !s.is_empty() && s.chars().all(pred)
}

/// Split `rest` at the first `/`, returning `(segment, remainder)`.
fn next_segment(rest: &str) -> (&str, Option<&str>) {
    match rest.split_once('/') {
        Some((head, tail)) => (head, Some(tail)),
        None => (rest, None),
    }
}

// ---------------------------------------------------------------------------
// EntryName
// ---------------------------------------------------------------------------

/// Hierarchical catalog entry name.
///
/// Format: `projects/<project>/locations/<location>/entryGroups/<group>/entries/<id>`
/// where project and group are lowercase alphanumerics and hyphens, location
/// additionally allows underscores, and the entry id starts with at least one
/// alphanumeric or underscore character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryName {
    value: String,
    project: String,
    location: String,
    entry_group: String,
    entry: String,
}

impl EntryName {
    /// Parse an entry name, validating the catalog hierarchy prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEntryName`] if any segment of the
    /// `projects/…/entries/<id>` prefix is missing or malformed.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let invalid = || ValidationError::InvalidEntryName(value.clone());

        let rest = value.strip_prefix("projects/").ok_or_else(invalid)?;
        let (project, rest) = next_segment(rest);
        let rest = rest
            .and_then(|r| r.strip_prefix("locations/"))
            .ok_or_else(invalid)?;
        let (location, rest) = next_segment(rest);
        let rest = rest
            .and_then(|r| r.strip_prefix("entryGroups/"))
            .ok_or_else(invalid)?;
        let (entry_group, rest) = next_segment(rest);
        let entry = rest
            .and_then(|r| r.strip_prefix("entries/"))
            .ok_or_else(invalid)?;

        if !non_empty_all(project, is_project_char)
            || !non_empty_all(location, is_location_char)
            || !non_empty_all(entry_group, is_project_char)
            || !entry.chars().next().is_some_and(is_id_char)
        {
            return Err(invalid());
        }

        Ok(Self {
            project: project.to_string(),
            location: location.to_string(),
            entry_group: entry_group.to_string(),
            entry: entry.to_string(),
            value,
        })
    }

    /// The full entry name as it appeared in the import file.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The project segment.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// The location segment.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The entry group id.
    pub fn entry_group(&self) -> &str {
        &self.entry_group
    }

    /// Everything after `entries/`, including any trailing hierarchy.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// The entry group resource path:
    /// `projects/<project>/locations/<location>/entryGroups/<group>`.
    pub fn entry_group_path(&self) -> String {
        format!(
            "projects/{}/locations/{}/entryGroups/{}",
            self.project, self.location, self.entry_group
        )
    }
}

impl TryFrom<String> for EntryName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntryName> for String {
    fn from(name: EntryName) -> Self {
        name.value
    }
}

impl std::fmt::Display for EntryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// Extract the `…/entryGroups/<group>` prefix from an arbitrary string.
///
/// Lenient counterpart of [`EntryName::entry_group_path`] for values that
/// fail strict parsing: takes everything up to and including the group id
/// that follows the last `/entryGroups/` marker.
pub fn entry_group_path(value: &str) -> Option<&str> {
    const MARKER: &str = "/entryGroups/";
    let start = value.rfind(MARKER)? + MARKER.len();
    let group_len = value[start..].find('/').unwrap_or(value.len() - start);
    if group_len == 0 {
        return None;
    }
    Some(&value[..start + group_len])
}

// ---------------------------------------------------------------------------
// EntryTypeName
// ---------------------------------------------------------------------------

/// Catalog entry type reference.
///
/// Format: `projects/<project>/locations/<location>/entryTypes/<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryTypeName {
    value: String,
    project: String,
    location: String,
    entry_type: String,
}

impl EntryTypeName {
    /// Parse an entry type reference.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEntryType`] if the string does not
    /// follow the entry-type resource path.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let invalid = || ValidationError::InvalidEntryType(value.clone());

        let rest = value.strip_prefix("projects/").ok_or_else(invalid)?;
        let (project, rest) = next_segment(rest);
        let rest = rest
            .and_then(|r| r.strip_prefix("locations/"))
            .ok_or_else(invalid)?;
        let (location, rest) = next_segment(rest);
        let entry_type = rest
            .and_then(|r| r.strip_prefix("entryTypes/"))
            .ok_or_else(invalid)?;

        if !non_empty_all(project, is_location_char)
            || !non_empty_all(location, is_location_char)
            || !entry_type.chars().next().is_some_and(is_id_char)
        {
            return Err(invalid());
        }

        Ok(Self {
            project: project.to_string(),
            location: location.to_string(),
            entry_type: entry_type.to_string(),
            value,
        })
    }

    /// The full entry type reference.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The project that owns the entry type.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// The location of the entry type.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The entry type id.
    pub fn entry_type(&self) -> &str {
        &self.entry_type
    }
}

impl TryFrom<String> for EntryTypeName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntryTypeName> for String {
    fn from(name: EntryTypeName) -> Self {
        name.value
    }
}

impl std::fmt::Display for EntryTypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

// ---------------------------------------------------------------------------
// FullyQualifiedName
// ---------------------------------------------------------------------------

/// Source-system-scoped fully qualified name.
///
/// Format: `<scheme>:`<host>`(.<segment>)*` where the scheme is lowercase
/// letters, the host is backtick-quoted, and each dotted segment is either a
/// bare run of alphanumerics, `_`, `#`, `-` or itself backtick-quoted.
///
/// ```text
/// mysql:`db-host.internal`.sales.orders
/// postgresql:`10.0.0.4:5432`.`billing#2024`.invoices
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FullyQualifiedName {
    value: String,
    scheme: String,
    host: String,
    segments: Vec<String>,
}

impl FullyQualifiedName {
    /// Parse a fully qualified name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidFullyQualifiedName`] if the scheme,
    /// host quoting, or any segment is malformed.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let invalid = || ValidationError::InvalidFullyQualifiedName(value.clone());

        let (scheme, rest) = value.split_once(':').ok_or_else(invalid)?;
        if !non_empty_all(scheme, |c| c.is_ascii_lowercase()) {
            return Err(invalid());
        }

        let rest = rest.strip_prefix('`').ok_or_else(invalid)?;
        let (host, mut rest) = rest.split_once('`').ok_or_else(invalid)?;
        if !non_empty_all(host, is_host_char) {
            return Err(invalid());
        }

        let mut segments = Vec::new();
        while !rest.is_empty() {
            let after_dot = rest.strip_prefix('.').ok_or_else(invalid)?;
            if let Some(quoted) = after_dot.strip_prefix('`') {
                let (segment, tail) = quoted.split_once('`').ok_or_else(invalid)?;
                if segment.is_empty() {
                    return Err(invalid());
                }
                segments.push(segment.to_string());
                rest = tail;
            } else {
                let end = after_dot.find('.').unwrap_or(after_dot.len());
                let segment = &after_dot[..end];
                if !non_empty_all(segment, is_segment_char) {
                    return Err(invalid());
                }
                segments.push(segment.to_string());
                rest = &after_dot[end..];
            }
        }

        Ok(Self {
            scheme: scheme.to_string(),
            host: host.to_string(),
            segments,
            value,
        })
    }

    /// The full name as it appeared in the import file.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The source-system scheme (e.g. `mysql`).
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The host, without the surrounding backticks.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The dotted segments after the host, unquoted.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl TryFrom<String> for FullyQualifiedName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FullyQualifiedName> for String {
    fn from(name: FullyQualifiedName) -> Self {
        name.value
    }
}

impl std::fmt::Display for FullyQualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

// ---------------------------------------------------------------------------
// AspectKey
// ---------------------------------------------------------------------------

/// Key of an aspect attached to an entry: `<project>.<location>.<id>`.
///
/// Each section must be non-empty. The key maps onto an aspect type resource
/// via [`AspectKey::aspect_type_path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AspectKey(String);

impl AspectKey {
    /// Parse an aspect key.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAspectKey`] unless the key has
    /// exactly three non-empty dot-separated sections.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let sections: Vec<&str> = value.split('.').collect();
        if sections.len() != 3 || sections.iter().any(|s| s.is_empty()) {
            return Err(ValidationError::InvalidAspectKey(value));
        }
        Ok(Self(value))
    }

    /// The key as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn sections(&self) -> (&str, &str, &str) {
        let mut parts = self.0.splitn(3, '.');
        let project = parts.next().unwrap_or_default();
        let location = parts.next().unwrap_or_default();
        let id = parts.next().unwrap_or_default();
        (project, location, id)
    }

    /// The aspect type resource path:
    /// `projects/<project>/locations/<location>/aspectTypes/<id>`.
    pub fn aspect_type_path(&self) -> String {
        let (project, location, id) = self.sections();
        format!("projects/{project}/locations/{location}/aspectTypes/{id}")
    }
}

impl TryFrom<String> for AspectKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AspectKey> for String {
    fn from(key: AspectKey) -> Self {
        key.0
    }
}

impl std::fmt::Display for AspectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
