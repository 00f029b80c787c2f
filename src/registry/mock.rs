//! Mock registry for testing
//!
//! Carries real registry semantics in memory: create fails for a taken name,
//! update fails for byte-identical content, versions are numbered from "1".
//! Scripted errors can be queued per operation for fault injection, and every
//! call is recorded for assertions.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CreateDocument, Registry, RegistryError, UpdateDocument};

/// A recorded registry call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryCall {
    Create {
        name: String,
        content: String,
        format: String,
        kind: String,
        target_type: String,
    },
    Update {
        name: String,
        content: String,
        format: String,
        target_type: String,
        version: String,
    },
    SetDefault {
        name: String,
        version: String,
    },
}

#[derive(Debug, Default)]
struct StoredDocument {
    /// Content per version; index 0 holds version "1".
    versions: Vec<String>,
    /// 1-based default version number.
    default_version: usize,
}

/// In-memory registry test double.
#[derive(Default)]
pub struct MockRegistry {
    documents: Mutex<HashMap<String, StoredDocument>>,
    calls: Mutex<Vec<RegistryCall>>,
    create_errors: Mutex<VecDeque<RegistryError>>,
    update_errors: Mutex<VecDeque<RegistryError>>,
    promote_errors: Mutex<VecDeque<RegistryError>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document as if it had been published before, with `content` as
    /// version "1" and as the default.
    pub fn with_document(self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.documents.lock().unwrap().insert(
            name.into(),
            StoredDocument {
                versions: vec![content.into()],
                default_version: 1,
            },
        );
        self
    }

    /// Queue a failure for the next create call.
    pub fn with_create_error(self, error: RegistryError) -> Self {
        self.create_errors.lock().unwrap().push_back(error);
        self
    }

    /// Queue a failure for the next update call.
    pub fn with_update_error(self, error: RegistryError) -> Self {
        self.update_errors.lock().unwrap().push_back(error);
        self
    }

    /// Queue a failure for the next promote call.
    pub fn with_promote_error(self, error: RegistryError) -> Self {
        self.promote_errors.lock().unwrap().push_back(error);
        self
    }

    /// All calls made to this registry, in order.
    pub fn calls(&self) -> Vec<RegistryCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of create calls made.
    pub fn create_count(&self) -> usize {
        self.count(|call| matches!(call, RegistryCall::Create { .. }))
    }

    /// Number of update calls made.
    pub fn update_count(&self) -> usize {
        self.count(|call| matches!(call, RegistryCall::Update { .. }))
    }

    /// Number of promote calls made.
    pub fn promote_count(&self) -> usize {
        self.count(|call| matches!(call, RegistryCall::SetDefault { .. }))
    }

    /// The latest registered content for `name`.
    pub fn latest_content(&self, name: &str) -> Option<String> {
        self.documents
            .lock()
            .unwrap()
            .get(name)
            .and_then(|doc| doc.versions.last().cloned())
    }

    /// The default version number for `name`.
    pub fn default_version(&self, name: &str) -> Option<String> {
        self.documents
            .lock()
            .unwrap()
            .get(name)
            .map(|doc| doc.default_version.to_string())
    }

    fn count(&self, matcher: impl Fn(&RegistryCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| matcher(c)).count()
    }

    fn record(&self, call: RegistryCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Registry for MockRegistry {
    async fn create_document(&self, request: CreateDocument<'_>) -> Result<(), RegistryError> {
        self.record(RegistryCall::Create {
            name: request.name.to_string(),
            content: request.content.to_string(),
            format: request.format.to_string(),
            kind: request.kind.to_string(),
            target_type: request.target_type.to_string(),
        });

        if let Some(error) = self.create_errors.lock().unwrap().pop_front() {
            return Err(error);
        }

        let mut documents = self.documents.lock().unwrap();
        if documents.contains_key(request.name) {
            return Err(RegistryError::AlreadyExists);
        }
        documents.insert(
            request.name.to_string(),
            StoredDocument {
                versions: vec![request.content.to_string()],
                default_version: 1,
            },
        );
        Ok(())
    }

    async fn update_document(&self, request: UpdateDocument<'_>) -> Result<String, RegistryError> {
        self.record(RegistryCall::Update {
            name: request.name.to_string(),
            content: request.content.to_string(),
            format: request.format.to_string(),
            target_type: request.target_type.to_string(),
            version: request.version.to_string(),
        });

        if let Some(error) = self.update_errors.lock().unwrap().pop_front() {
            return Err(error);
        }

        let mut documents = self.documents.lock().unwrap();
        let document = documents.get_mut(request.name).ok_or(RegistryError::Api {
            code: "InvalidDocument".to_string(),
            message: format!("document '{}' does not exist", request.name),
        })?;

        if document.versions.last().map(String::as_str) == Some(request.content) {
            return Err(RegistryError::DuplicateContent);
        }

        document.versions.push(request.content.to_string());
        Ok(document.versions.len().to_string())
    }

    async fn set_default_version(
        &self,
        name: &str,
        version: &str,
    ) -> Result<Option<String>, RegistryError> {
        self.record(RegistryCall::SetDefault {
            name: name.to_string(),
            version: version.to_string(),
        });

        if let Some(error) = self.promote_errors.lock().unwrap().pop_front() {
            return Err(error);
        }

        let mut documents = self.documents.lock().unwrap();
        let document = documents.get_mut(name).ok_or(RegistryError::Api {
            code: "InvalidDocument".to_string(),
            message: format!("document '{}' does not exist", name),
        })?;

        let number: usize = version.parse().map_err(|_| RegistryError::Api {
            code: "InvalidDocumentVersion".to_string(),
            message: format!("'{}' is not a version number", version),
        })?;
        if number == 0 || number > document.versions.len() {
            return Err(RegistryError::Api {
                code: "InvalidDocumentVersion".to_string(),
                message: format!("document '{}' has no version {}", name, version),
            });
        }

        document.default_version = number;
        Ok(Some(format!("{} default version is now {}", name, version)))
    }
}
