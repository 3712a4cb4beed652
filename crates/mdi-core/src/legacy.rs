//! # Legacy Field-Name Adapter
//!
//! Earlier revisions of the catalog import API used snake_case keys
//! (`parent_entry`, `entry_type`, `fully_qualified_name`, …). The current
//! format is camelCase. Rather than carrying two extraction paths, older
//! records are translated in place at the parse boundary and then handled
//! exactly like current ones.
//!
//! Translation is structural: only the keys the import format defines are
//! renamed, at the positions where the format defines them. Aspect payloads
//! are left alone apart from the schema field descriptors. An existing
//! camelCase key always wins over its snake_case counterpart.

use serde_json::{Map, Value};

type KeyTable = &'static [(&'static str, &'static str)];

const TOP_LEVEL_KEYS: KeyTable = &[("aspect_keys", "aspectKeys"), ("update_mask", "updateMask")];

const ENTRY_KEYS: KeyTable = &[
    ("parent_entry", "parentEntry"),
    ("entry_type", "entryType"),
    ("fully_qualified_name", "fullyQualifiedName"),
    ("entry_source", "entrySource"),
    ("create_time", "createTime"),
    ("update_time", "updateTime"),
];

const ENTRY_SOURCE_KEYS: KeyTable = &[
    ("display_name", "displayName"),
    ("create_time", "createTime"),
    ("update_time", "updateTime"),
];

const ASPECT_KEYS: KeyTable = &[("aspect_type", "aspectType")];

const FIELD_KEYS: KeyTable = &[("data_type", "dataType"), ("metadata_type", "metadataType")];

/// Rename legacy snake_case keys of one import line to camelCase, in place.
///
/// Returns the dotted paths of the keys that were translated, e.g.
/// `entry.parent_entry`. An empty result means the line already used the
/// canonical naming (or is not an object at all).
pub fn translate_legacy_keys(line: &mut Value) -> Vec<String> {
    let mut translated = Vec::new();
    let Some(top) = line.as_object_mut() else {
        return translated;
    };
    rename_keys(top, TOP_LEVEL_KEYS, "", &mut translated);

    let Some(entry) = top.get_mut("entry").and_then(Value::as_object_mut) else {
        return translated;
    };
    rename_keys(entry, ENTRY_KEYS, "entry.", &mut translated);

    if let Some(source) = entry.get_mut("entrySource").and_then(Value::as_object_mut) {
        rename_keys(source, ENTRY_SOURCE_KEYS, "entry.entrySource.", &mut translated);
    }

    if let Some(aspects) = entry.get_mut("aspects").and_then(Value::as_object_mut) {
        for (key, aspect) in aspects.iter_mut() {
            let Some(aspect) = aspect.as_object_mut() else {
                continue;
            };
            let prefix = format!("entry.aspects.{key}.");
            rename_keys(aspect, ASPECT_KEYS, &prefix, &mut translated);

            let fields = aspect
                .get_mut("data")
                .and_then(|d| d.get_mut("fields"))
                .and_then(Value::as_array_mut);
            if let Some(fields) = fields {
                for (i, field) in fields.iter_mut().enumerate() {
                    if let Some(field) = field.as_object_mut() {
                        let prefix = format!("{prefix}data.fields[{i}].");
                        rename_keys(field, FIELD_KEYS, &prefix, &mut translated);
                    }
                }
            }
        }
    }

    translated
}

fn rename_keys(
    obj: &mut Map<String, Value>,
    table: KeyTable,
    path: &str,
    translated: &mut Vec<String>,
) {
    for (legacy, canonical) in table {
        if obj.contains_key(*canonical) {
            continue;
        }
        if let Some(value) = obj.remove(*legacy) {
            obj.insert((*canonical).to_string(), value);
            translated.push(format!("{path}{legacy}"));
        }
    }
}
