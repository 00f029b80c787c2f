//! HTTP registry client
//!
//! Talks to the document registry's JSON API:
//!
//! - `POST {base}/v1/documents` - create
//! - `POST {base}/v1/documents/{name}/versions` - update
//! - `PUT  {base}/v1/documents/{name}/default-version` - promote
//!
//! Failure responses carry `{ "code": "...", "message": "..." }`; the two
//! sentinel codes are mapped onto their [`RegistryError`] variants. No
//! client-side deadline is imposed; the transport's own behavior applies.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{CreateDocument, Registry, RegistryError, UpdateDocument};

/// Registry client over HTTP with optional bearer-token auth.
pub struct HttpRegistry {
    /// HTTP client
    client: reqwest::Client,
    /// Registry base URL, no trailing slash
    base_url: String,
    /// Bearer token, sent when present
    api_token: Option<String>,
}

impl HttpRegistry {
    /// Create a client for the registry at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_token: None,
        }
    }

    /// Attach a bearer token to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.request(method, format!("{}{}", self.base_url, path));
        if let Some(ref token) = self.api_token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        builder
    }

    /// Turn a non-success response into a classified error.
    async fn fail(response: reqwest::Response) -> RegistryError {
        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => return RegistryError::Transport(err),
        };
        match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => RegistryError::from_code(body.code, body.message),
            Err(_) => RegistryError::Api {
                code: status.as_u16().to_string(),
                message: text,
            },
        }
    }
}

#[async_trait]
impl Registry for HttpRegistry {
    async fn create_document(&self, request: CreateDocument<'_>) -> Result<(), RegistryError> {
        tracing::debug!(name = request.name, "creating document");

        let response = self
            .request(reqwest::Method::POST, "/v1/documents")
            .json(&CreateDocumentBody {
                name: request.name,
                content: request.content,
                document_format: request.format,
                document_type: request.kind,
                target_type: request.target_type,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }
        Ok(())
    }

    async fn update_document(&self, request: UpdateDocument<'_>) -> Result<String, RegistryError> {
        tracing::debug!(name = request.name, version = request.version, "updating document");

        let response = self
            .request(
                reqwest::Method::POST,
                &format!("/v1/documents/{}/versions", request.name),
            )
            .json(&UpdateDocumentBody {
                content: request.content,
                document_format: request.format,
                target_type: request.target_type,
                document_version: request.version,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }

        let body: UpdateDocumentResponse = response.json().await?;
        Ok(body.document_version)
    }

    async fn set_default_version(
        &self,
        name: &str,
        version: &str,
    ) -> Result<Option<String>, RegistryError> {
        tracing::debug!(name, version, "promoting default version");

        let response = self
            .request(
                reqwest::Method::PUT,
                &format!("/v1/documents/{}/default-version", name),
            )
            .json(&SetDefaultVersionBody {
                document_version: version,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }

        let body: SetDefaultVersionResponse = response.json().await?;
        Ok(body.description)
    }
}

// ============================================================================
// API TYPES
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDocumentBody<'a> {
    name: &'a str,
    content: &'a str,
    document_format: &'a str,
    document_type: &'a str,
    target_type: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateDocumentBody<'a> {
    content: &'a str,
    document_format: &'a str,
    target_type: &'a str,
    document_version: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SetDefaultVersionBody<'a> {
    document_version: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateDocumentResponse {
    document_version: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetDefaultVersionResponse {
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    #[serde(default)]
    message: String,
}
