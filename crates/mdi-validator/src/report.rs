//! # Validation Report
//!
//! The outcome of one run: counters, the distinct identifier listings, the
//! content digest, and every defect found in discovery order. The verdict is
//! derived from the report, never stored separately.

use std::fmt;

use serde::Serialize;

/// How much a defect matters. Only [`Severity::Error`] affects the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational note.
    Info,
    /// Suspicious but importable.
    Warning,
    /// Makes the file NOT VALID.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// What was wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DefectKind {
    /// The line is not valid JSON.
    MalformedLine {
        /// Offending line text.
        raw: String,
        /// Parser diagnostic.
        reason: String,
    },
    /// The line does not conform to the import-entry schema.
    SchemaViolation {
        /// JSON pointer into the line.
        instance_path: String,
        /// JSON pointer into the schema.
        schema_path: String,
        /// Constraint that failed.
        message: String,
    },
    /// An expected entry field is absent (as opposed to empty).
    MissingField {
        /// Field name, e.g. `parentEntry`.
        field: String,
        /// Name of the entry lacking it, when known.
        entry_name: Option<String>,
    },
    /// An entry name occurs more than once.
    DuplicateName {
        /// The repeated name.
        name: String,
        /// Number of occurrences.
        count: usize,
    },
    /// A non-empty parent reference matches no entry name in the file.
    UnknownParent {
        /// The dangling reference.
        parent: String,
    },
    /// A schema column was mapped to the generic `OTHER` metadata type.
    UnmappedMetadataType {
        /// FQN of the owning entry, when known.
        fully_qualified_name: Option<String>,
        /// Source system from the FQN scheme, when the FQN is well-formed.
        system: Option<String>,
        /// Column name, when known.
        column: Option<String>,
        /// Native data type, when known.
        data_type: Option<String>,
    },
    /// No parsed entry has an empty `parentEntry`.
    NoRootEntries,
    /// The line is empty or whitespace.
    BlankLine,
    /// Older snake_case field names were translated.
    LegacyFieldNames {
        /// Paths of the translated keys.
        keys: Vec<String>,
    },
    /// Content line count differs from the required exact count.
    LineCountMismatch {
        /// Required count.
        expected: usize,
        /// Observed count.
        actual: usize,
    },
    /// Content line count is below the required minimum.
    LineCountBelowMinimum {
        /// Required minimum.
        minimum: usize,
        /// Observed count.
        actual: usize,
    },
}

impl DefectKind {
    /// Severity of this kind of defect.
    pub fn severity(&self) -> Severity {
        match self {
            Self::MalformedLine { .. }
            | Self::SchemaViolation { .. }
            | Self::DuplicateName { .. }
            | Self::UnknownParent { .. }
            | Self::LineCountMismatch { .. }
            | Self::LineCountBelowMinimum { .. } => Severity::Error,
            Self::MissingField { .. } | Self::NoRootEntries => Severity::Warning,
            Self::UnmappedMetadataType { .. }
            | Self::BlankLine
            | Self::LegacyFieldNames { .. } => Severity::Info,
        }
    }
}

impl fmt::Display for DefectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLine { raw, reason } => {
                write!(f, "malformed JSON ({reason}): {raw}")
            }
            Self::SchemaViolation {
                instance_path,
                message,
                ..
            } => {
                let at = if instance_path.is_empty() {
                    "(root)"
                } else {
                    instance_path.as_str()
                };
                write!(f, "schema violation at {at}: {message}")
            }
            Self::MissingField { field, entry_name } => match entry_name {
                Some(name) => write!(f, "entry {name} has no '{field}' field"),
                None => write!(f, "entry has no '{field}' field"),
            },
            Self::DuplicateName { name, count } => {
                write!(f, "duplicate entry name {name} occurs {count} times")
            }
            Self::UnknownParent { parent } => {
                write!(f, "parent entry {parent} matches no entry name in the file")
            }
            Self::UnmappedMetadataType {
                fully_qualified_name,
                system,
                column,
                data_type,
            } => write!(
                f,
                "column {} of {} has {} data type {} mapped to OTHER",
                column.as_deref().unwrap_or("<unnamed>"),
                fully_qualified_name.as_deref().unwrap_or("<unknown entry>"),
                system.as_deref().unwrap_or("source"),
                data_type.as_deref().unwrap_or("<unknown>"),
            ),
            Self::NoRootEntries => f.write_str("no root entry (empty parentEntry) found"),
            Self::BlankLine => f.write_str("blank line"),
            Self::LegacyFieldNames { keys } => {
                write!(f, "translated legacy field names: {}", keys.join(", "))
            }
            Self::LineCountMismatch { expected, actual } => {
                write!(f, "expected exactly {expected} lines, found {actual}")
            }
            Self::LineCountBelowMinimum { minimum, actual } => {
                write!(f, "expected at least {minimum} lines, found {actual}")
            }
        }
    }
}

/// One finding, anchored to a physical line when it has one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Defect {
    /// 1-based physical line number; `None` for whole-file findings.
    pub line: Option<usize>,
    /// Derived from `kind`.
    pub severity: Severity,
    /// The finding itself.
    #[serde(flatten)]
    pub kind: DefectKind,
}

impl Defect {
    /// A finding on a specific line.
    pub fn at(line: usize, kind: DefectKind) -> Self {
        Self {
            line: Some(line),
            severity: kind.severity(),
            kind,
        }
    }

    /// A whole-file finding.
    pub fn file(kind: DefectKind) -> Self {
        Self {
            line: None,
            severity: kind.severity(),
            kind,
        }
    }
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "[{}] line {line}: {}", self.severity, self.kind),
            None => write!(f, "[{}] {}", self.severity, self.kind),
        }
    }
}

/// Whether the run validated or only listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Full validation.
    Validate,
    /// Parse and echo only; schema and cross-reference checks skipped.
    List,
}

/// Pass/fail outcome of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// No error-severity defect.
    Valid,
    /// At least one error-severity defect.
    NotValid,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => f.write_str("File is VALID"),
            Self::NotValid => f.write_str("File is NOT VALID"),
        }
    }
}

/// Everything one run found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Input label, usually the file path.
    pub source: String,
    /// Validate or list.
    pub mode: RunMode,
    /// Name of the schema lines were checked against; `None` in list mode.
    pub schema: Option<String>,
    /// Non-blank lines processed.
    pub content_lines: usize,
    /// Blank lines skipped.
    pub blank_lines: usize,
    /// Lines that were not valid JSON.
    pub malformed_lines: usize,
    /// Parsed lines with at least one schema violation.
    pub invalid_entries: usize,
    /// Entries with an empty `parentEntry`.
    pub root_entries: usize,
    /// Set to the line limit when the scan stopped early because of it.
    pub stopped_at_top: Option<usize>,
    /// Hex SHA-256 of the bytes scanned.
    pub sha256: String,
    /// Distinct entry names, sorted.
    pub entry_names: Vec<String>,
    /// Distinct entry types, sorted.
    pub entry_types: Vec<String>,
    /// Distinct fully qualified names, sorted.
    pub fully_qualified_names: Vec<String>,
    /// All findings in discovery order.
    pub defects: Vec<Defect>,
}

impl ValidationReport {
    /// True when nothing invalidates the file.
    pub fn is_valid(&self) -> bool {
        self.malformed_lines == 0
            && self.invalid_entries == 0
            && self.duplicate_names().next().is_none()
            && self.unknown_parents().next().is_none()
            && !self.defects.iter().any(|d| {
                matches!(
                    d.kind,
                    DefectKind::LineCountMismatch { .. } | DefectKind::LineCountBelowMinimum { .. }
                )
            })
    }

    /// The verdict line.
    pub fn verdict(&self) -> Verdict {
        if self.is_valid() {
            Verdict::Valid
        } else {
            Verdict::NotValid
        }
    }

    /// Defects of the given severity, in order.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Defect> {
        self.defects.iter().filter(move |d| d.severity == severity)
    }

    /// Number of defects of the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.with_severity(severity).count()
    }

    /// Duplicated names with their counts.
    pub fn duplicate_names(&self) -> impl Iterator<Item = (&str, usize)> {
        self.defects.iter().filter_map(|d| match &d.kind {
            DefectKind::DuplicateName { name, count } => Some((name.as_str(), *count)),
            _ => None,
        })
    }

    /// Dangling parent references.
    pub fn unknown_parents(&self) -> impl Iterator<Item = &str> {
        self.defects.iter().filter_map(|d| match &d.kind {
            DefectKind::UnknownParent { parent } => Some(parent.as_str()),
            _ => None,
        })
    }

    /// Schema violations, in order.
    pub fn schema_violations(&self) -> impl Iterator<Item = &Defect> {
        self.defects
            .iter()
            .filter(|d| matches!(d.kind, DefectKind::SchemaViolation { .. }))
    }
}
