//! # Cross-Reference Checks
//!
//! Whole-file checks that run once the scan has consumed every line:
//! uniqueness of entry names, resolution of parent references, and presence
//! of at least one root. Also hosts the per-record quality checks (missing
//! fields, unmapped column types) that need the typed record view rather than
//! the schema.

use mdi_core::{FullyQualifiedName, ImportRecord};

use crate::accumulator::Accumulator;
use crate::report::{Defect, DefectKind};

/// Whole-file defects, in sorted value order: duplicates, then dangling
/// parents, then the missing-root warning.
pub fn check_cross_references(acc: &Accumulator) -> Vec<Defect> {
    let mut defects: Vec<Defect> = acc
        .name_counts()
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(name, count)| {
            Defect::file(DefectKind::DuplicateName {
                name: name.clone(),
                count: *count,
            })
        })
        .collect();

    defects.extend(
        acc.parent_counts()
            .keys()
            .filter(|parent| !parent.is_empty() && !acc.has_name(parent))
            .map(|parent| {
                Defect::file(DefectKind::UnknownParent {
                    parent: parent.clone(),
                })
            }),
    );

    if acc.records() > 0 && acc.root_entries() == 0 {
        defects.push(Defect::file(DefectKind::NoRootEntries));
    }
    defects
}

/// Warnings for identifying entry fields that are absent altogether.
///
/// An empty `parentEntry` marks a root and is not reported; only a missing
/// key is.
pub fn missing_field_warnings(line: usize, record: &ImportRecord) -> Vec<Defect> {
    let fields = [
        ("name", record.name.is_missing()),
        ("parentEntry", record.parent_entry.is_missing()),
        ("entryType", record.entry_type.is_missing()),
        ("fullyQualifiedName", record.fully_qualified_name.is_missing()),
    ];
    fields
        .into_iter()
        .filter(|(_, missing)| *missing)
        .map(|(field, _)| {
            Defect::at(
                line,
                DefectKind::MissingField {
                    field: field.to_string(),
                    entry_name: record.name.as_str().map(str::to_string),
                },
            )
        })
        .collect()
}

/// Notes for schema columns whose metadata type is the `OTHER` fallback.
///
/// The source system is taken from the FQN scheme so the note points at the
/// connector whose type mapping lacks the column type.
pub fn unmapped_type_notes(line: usize, record: &ImportRecord) -> Vec<Defect> {
    let fqn = record.fully_qualified_name.as_str();
    let system = fqn
        .and_then(|raw| FullyQualifiedName::new(raw).ok())
        .map(|name| name.scheme().to_string());
    record
        .schema_aspects
        .iter()
        .flat_map(|aspect| aspect.fields.iter())
        .filter(|field| field.is_unmapped())
        .map(|field| {
            Defect::at(
                line,
                DefectKind::UnmappedMetadataType {
                    fully_qualified_name: fqn.map(str::to_string),
                    system: system.clone(),
                    column: field.name.as_str().map(str::to_string),
                    data_type: field.data_type.as_str().map(str::to_string),
                },
            )
        })
        .collect()
}
