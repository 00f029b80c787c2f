//! # Document-registry client seam
//!
//! Trait and implementations for the remote document registry.
//!
//! - [`Registry`] - Core trait consumed by the publisher
//! - [`HttpRegistry`] - Production client over the registry's HTTP API
//! - [`MockRegistry`] - In-memory test double with registry semantics
//!
//! Two registry failures are protocol signals rather than errors:
//! [`RegistryError::AlreadyExists`] (a create lost to an existing name) and
//! [`RegistryError::DuplicateContent`] (an update carrying byte-identical
//! content). The publisher branches on those variants; everything else is
//! opaque and fatal. Classification is by variant, never by message text.

mod http;
mod mock;

pub use http::HttpRegistry;
pub use mock::{MockRegistry, RegistryCall};

use async_trait::async_trait;
use thiserror::Error;

/// Wire error codes the registry uses for the two protocol sentinels.
pub mod codes {
    pub const ALREADY_EXISTS: &str = "DocumentAlreadyExists";
    pub const DUPLICATE_CONTENT: &str = "DuplicateDocumentContent";
}

/// Failure from a registry operation.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Sentinel: create refused because the name is already registered.
    #[error("document already exists")]
    AlreadyExists,

    /// Sentinel: update refused because the content is byte-identical to the
    /// latest registered version.
    #[error("duplicate document content")]
    DuplicateContent,

    /// Any other failure reported by the registry. Opaque and fatal.
    #[error("{code}: {message}")]
    Api { code: String, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl RegistryError {
    /// Map a wire error code onto the sentinel variants, keeping everything
    /// else opaque.
    pub fn from_code(code: String, message: String) -> Self {
        match code.as_str() {
            codes::ALREADY_EXISTS => Self::AlreadyExists,
            codes::DUPLICATE_CONTENT => Self::DuplicateContent,
            _ => Self::Api { code, message },
        }
    }
}

/// Create operation parameters.
#[derive(Debug, Clone, Copy)]
pub struct CreateDocument<'a> {
    pub name: &'a str,
    pub content: &'a str,
    pub format: &'a str,
    pub kind: &'a str,
    pub target_type: &'a str,
}

/// Update operation parameters. `version` selects the version to replace.
#[derive(Debug, Clone, Copy)]
pub struct UpdateDocument<'a> {
    pub name: &'a str,
    pub content: &'a str,
    pub format: &'a str,
    pub target_type: &'a str,
    pub version: &'a str,
}

/// The three registry operations the publisher drives.
///
/// Implementations must report the two sentinel conditions through the
/// dedicated [`RegistryError`] variants so the publisher can branch on them.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Register a new named document.
    async fn create_document(&self, request: CreateDocument<'_>) -> Result<(), RegistryError>;

    /// Register new content for an existing document, returning the new
    /// version identifier.
    async fn update_document(&self, request: UpdateDocument<'_>) -> Result<String, RegistryError>;

    /// Make `version` the active default for `name`. Returns the registry's
    /// description of the promoted version, when it supplies one.
    async fn set_default_version(
        &self,
        name: &str,
        version: &str,
    ) -> Result<Option<String>, RegistryError>;
}
