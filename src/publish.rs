//! Idempotent create-or-update publishing
//!
//! Drives the registry through create → (on already-exists) update → (on
//! duplicate-content) unchanged → (on real update) promote-new-default.
//! Each call is attempted exactly once per branch; the create→update
//! fallback is a protocol step, not error recovery. Any registry failure
//! other than the two sentinels aborts immediately.

use crate::document::Document;
use crate::error::{DocpubError, Result};
use crate::registry::{CreateDocument, Registry, RegistryError, UpdateDocument};

/// Document format tag sent with every create/update call.
const FORMAT_JSON: &str = "JSON";
/// Registry document kind for command documents.
const KIND_COMMAND: &str = "Command";
/// Target type accepted for any resource.
const TARGET_TYPE_ANY: &str = "/";
/// Version selector naming the most recently registered version.
const VERSION_LATEST: &str = "$LATEST";

/// Terminal publish status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The document did not exist and was created.
    Created,
    /// A new version was registered and promoted to the default.
    Updated { version: String },
    /// The registry already holds byte-identical content.
    Unchanged,
}

/// Publish `document` under `name`, creating it if absent, updating it if
/// its content changed, and doing nothing if the registered content is
/// byte-identical.
///
/// A successful update that cannot be promoted to the default version is an
/// error: the new version exists in the registry but is not active.
pub async fn publish(
    registry: &dyn Registry,
    document: &Document,
    name: &str,
) -> Result<PublishOutcome> {
    for step in &document.main_steps {
        if step.precondition.is_empty() {
            tracing::debug!(step = %step.name, "step has no precondition and always runs");
        }
    }

    let payload = document.to_payload()?;

    match registry
        .create_document(CreateDocument {
            name,
            content: &payload,
            format: FORMAT_JSON,
            kind: KIND_COMMAND,
            target_type: TARGET_TYPE_ANY,
        })
        .await
    {
        Ok(()) => {
            tracing::info!(name, "document created");
            return Ok(PublishOutcome::Created);
        }
        Err(RegistryError::AlreadyExists) => {
            tracing::debug!(name, "document exists, falling back to update");
        }
        Err(err) => return Err(err.into()),
    }

    let version = match registry
        .update_document(UpdateDocument {
            name,
            content: &payload,
            format: FORMAT_JSON,
            target_type: TARGET_TYPE_ANY,
            version: VERSION_LATEST,
        })
        .await
    {
        Ok(version) => version,
        Err(RegistryError::DuplicateContent) => {
            tracing::info!(name, "registered content is identical, nothing to do");
            return Ok(PublishOutcome::Unchanged);
        }
        Err(err) => return Err(err.into()),
    };

    match registry.set_default_version(name, &version).await {
        Ok(description) => {
            tracing::info!(name, version = %version, "document updated");
            if let Some(description) = description {
                tracing::debug!(name, %description, "registry description");
            }
            Ok(PublishOutcome::Updated { version })
        }
        Err(source) => Err(DocpubError::Promotion {
            name: name.to_string(),
            version,
            source,
        }),
    }
}
