//! # Error Types
//!
//! Structured rejections for the catalog identifier newtypes, built with
//! `thiserror`. Each variant carries the offending input so that operators
//! can see exactly which value in an import file was wrong.

use thiserror::Error;

/// Validation errors for catalog identifier newtypes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Entry name does not follow the catalog entry hierarchy.
    #[error(
        "invalid entry name: \"{0}\" (expected projects/<project>/locations/<location>/entryGroups/<group>/entries/<id>)"
    )]
    InvalidEntryName(String),

    /// Entry type does not follow the catalog entry-type path.
    #[error(
        "invalid entry type: \"{0}\" (expected projects/<project>/locations/<location>/entryTypes/<id>)"
    )]
    InvalidEntryType(String),

    /// Fully qualified name does not follow `<scheme>:`<host>`(.<segment>)*`.
    #[error("invalid fully qualified name: \"{0}\" (expected <scheme>:`<host>`(.<segment>)*)")]
    InvalidFullyQualifiedName(String),

    /// Aspect key is not made of three dot-separated sections.
    #[error("invalid aspect key: \"{0}\" (expected <project>.<location>.<aspect type id>)")]
    InvalidAspectKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_entry_name_display_carries_input() {
        let err = ValidationError::InvalidEntryName("tables/t1".to_string());
        let msg = err.to_string();
        assert!(msg.contains("tables/t1"));
        assert!(msg.contains("entryGroups"));
    }

    #[test]
    fn invalid_entry_type_display() {
        let err = ValidationError::InvalidEntryType("mysql-table".to_string());
        assert!(err.to_string().contains("entryTypes"));
    }

    #[test]
    fn invalid_fqn_display() {
        let err = ValidationError::InvalidFullyQualifiedName("mysql:host".to_string());
        assert!(err.to_string().contains("mysql:host"));
    }

    #[test]
    fn invalid_aspect_key_display() {
        let err = ValidationError::InvalidAspectKey("schema".to_string());
        assert!(err.to_string().contains("<project>.<location>"));
    }
}
