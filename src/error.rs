//! Error types with error codes and fix suggestions
//!
//! Error code ranges:
//! - DOC-000-009: definition/compile errors
//! - DOC-010-019: encoding errors
//! - DOC-020-029: registry/publish errors
//! - DOC-030-039: configuration errors

use thiserror::Error;

use crate::registry::RegistryError;

pub type Result<T> = std::result::Result<T, DocpubError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// All error variants are part of the public API.
#[derive(Error, Debug)]
pub enum DocpubError {
    #[error("[DOC-001] Failed to parse definition: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("[DOC-002] Failed to read definition '{path}': {source}")]
    DefinitionRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("[DOC-003] Failed to read command script '{path}': {source}")]
    ScriptRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("[DOC-010] Failed to encode document payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("[DOC-020] Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error(
        "[DOC-021] Updated '{name}' to version {version} but failed to promote it to default: {source}"
    )]
    Promotion {
        name: String,
        version: String,
        #[source]
        source: RegistryError,
    },

    #[error("[DOC-030] Config error: {reason}")]
    Config { reason: String },
}

impl DocpubError {
    /// Get the error code (e.g., "DOC-001")
    pub fn code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "DOC-001",
            Self::DefinitionRead { .. } => "DOC-002",
            Self::ScriptRead { .. } => "DOC-003",
            Self::Encode(_) => "DOC-010",
            Self::Registry(_) => "DOC-020",
            Self::Promotion { .. } => "DOC-021",
            Self::Config { .. } => "DOC-030",
        }
    }
}

impl FixSuggestion for DocpubError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            DocpubError::Parse(_) => Some("Check YAML syntax: indentation and quoting"),
            DocpubError::DefinitionRead { .. } => Some("Check the definition file path exists"),
            DocpubError::ScriptRead { .. } => {
                Some("Script paths are resolved relative to the definition file's directory")
            }
            DocpubError::Encode(_) => Some("Check parameter and step values are encodable"),
            DocpubError::Registry(_) => {
                Some("Check registry endpoint, credentials, and document name")
            }
            DocpubError::Promotion { .. } => {
                Some("The new version is registered but not the default; re-run to promote it")
            }
            DocpubError::Config { .. } => {
                Some("Set DOCPUB_REGISTRY_URL / DOCPUB_REGISTRY_TOKEN or pass --endpoint/--token")
            }
        }
    }
}
