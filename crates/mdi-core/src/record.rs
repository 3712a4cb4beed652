//! # Import Record View
//!
//! A typed, read-only view over one parsed import line. Extraction never
//! fails: each field the cross-line checks need is recorded as a [`Field`]
//! so that absence, an empty value, and a real value are three distinct
//! states rather than a lookup that may throw.
//!
//! Extraction is deliberately independent of schema conformance. A line that
//! violates the schema still contributes whichever of its identifying fields
//! are present.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Aspect type of the column-schema aspect attached to tables and views.
pub const SCHEMA_ASPECT_TYPE: &str = "dataplex-types.global.schema";

/// Metadata type assigned upstream when no specific mapping exists for a
/// source column type.
pub const UNMAPPED_METADATA_TYPE: &str = "OTHER";

/// Presence state of a string field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Field<T> {
    /// The key is absent, or its value is not extractable as the expected type.
    #[default]
    Missing,
    /// The key is present with an empty value.
    Empty,
    /// The key is present with a non-empty value.
    Present(T),
}

impl<T> Field<T> {
    /// True when the key is absent or unusable.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// True when the key is present but empty.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The value, if present and non-empty.
    pub fn present(&self) -> Option<&T> {
        match self {
            Self::Present(v) => Some(v),
            _ => None,
        }
    }
}

impl Field<String> {
    /// Read `key` from a JSON object as a string field.
    pub fn from_json(obj: Option<&Value>, key: &str) -> Self {
        match obj.and_then(|o| o.get(key)).and_then(Value::as_str) {
            None => Self::Missing,
            Some("") => Self::Empty,
            Some(s) => Self::Present(s.to_string()),
        }
    }

    /// The value as `&str`, if present and non-empty.
    pub fn as_str(&self) -> Option<&str> {
        self.present().map(String::as_str)
    }
}

/// One column descriptor of a schema aspect.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Column name.
    pub name: Field<String>,
    /// `REQUIRED` or `NULLABLE`.
    pub mode: Field<String>,
    /// Native data type in the source system.
    pub data_type: Field<String>,
    /// Catalog metadata type the native type was mapped to.
    pub metadata_type: Field<String>,
}

impl FieldDescriptor {
    fn from_value(value: &Value) -> Self {
        let obj = Some(value);
        Self {
            name: Field::from_json(obj, "name"),
            mode: Field::from_json(obj, "mode"),
            data_type: Field::from_json(obj, "dataType"),
            metadata_type: Field::from_json(obj, "metadataType"),
        }
    }

    /// True when the column carries the generic fallback metadata type.
    pub fn is_unmapped(&self) -> bool {
        self.metadata_type.as_str() == Some(UNMAPPED_METADATA_TYPE)
    }
}

/// A column-schema aspect found on an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaAspect {
    /// Key of the aspect within `entry.aspects`.
    pub key: String,
    /// Column descriptors from `data.fields`, in file order.
    pub fields: Vec<FieldDescriptor>,
}

/// Identifying fields of one import line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportRecord {
    /// `entry.name`.
    pub name: Field<String>,
    /// `entry.parentEntry`; empty denotes a root entry.
    pub parent_entry: Field<String>,
    /// `entry.entryType`.
    pub entry_type: Field<String>,
    /// `entry.fullyQualifiedName`.
    pub fully_qualified_name: Field<String>,
    /// Keys of `entry.aspects`, in map order.
    pub aspect_keys: Vec<String>,
    /// Column-schema aspects, in map order.
    pub schema_aspects: Vec<SchemaAspect>,
}

impl ImportRecord {
    /// Extract the identifying fields from a parsed line.
    ///
    /// Any shape is accepted; whatever cannot be found is `Missing`.
    pub fn from_value(line: &Value) -> Self {
        let entry = line.get("entry");
        let mut record = Self {
            name: Field::from_json(entry, "name"),
            parent_entry: Field::from_json(entry, "parentEntry"),
            entry_type: Field::from_json(entry, "entryType"),
            fully_qualified_name: Field::from_json(entry, "fullyQualifiedName"),
            ..Self::default()
        };

        let Some(aspects) = entry.and_then(|e| e.get("aspects")).and_then(Value::as_object) else {
            return record;
        };
        for (key, aspect) in aspects {
            record.aspect_keys.push(key.clone());
            if !is_schema_aspect(key, aspect) {
                continue;
            }
            let fields = aspect
                .get("data")
                .and_then(|d| d.get("fields"))
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter(|item| item.is_object())
                        .map(FieldDescriptor::from_value)
                        .collect()
                })
                .unwrap_or_default();
            record.schema_aspects.push(SchemaAspect {
                key: key.clone(),
                fields,
            });
        }
        record
    }

    /// True when `parentEntry` is present and empty.
    pub fn is_root(&self) -> bool {
        self.parent_entry.is_blank()
    }
}

fn is_schema_aspect(key: &str, aspect: &Value) -> bool {
    match aspect.get("aspectType").and_then(Value::as_str) {
        Some(aspect_type) => aspect_type == SCHEMA_ASPECT_TYPE,
        None => key == SCHEMA_ASPECT_TYPE,
    }
}
