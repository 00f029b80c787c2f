//! HTTP registry client tests using wiremock
//!
//! Covers the wire protocol: endpoint shapes, auth header, error-code
//! classification, and the full publish flow over HTTP.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use docpub::document::{Document, Precondition, Step, StepInputs};
use docpub::publish::{publish, PublishOutcome};
use docpub::registry::{CreateDocument, HttpRegistry, Registry, RegistryError, UpdateDocument};

// =============================================================================
// HELPERS
// =============================================================================

fn create_request<'a>(name: &'a str, content: &'a str) -> CreateDocument<'a> {
    CreateDocument {
        name,
        content,
        format: "JSON",
        kind: "Command",
        target_type: "/",
    }
}

fn update_request<'a>(name: &'a str, content: &'a str) -> UpdateDocument<'a> {
    UpdateDocument {
        name,
        content,
        format: "JSON",
        target_type: "/",
        version: "$LATEST",
    }
}

fn sample_document() -> Document {
    Document {
        schema_version: "2.2".to_string(),
        description: "sample".to_string(),
        main_steps: vec![Step {
            precondition: Precondition::default(),
            action: "aws:runShellScript".to_string(),
            name: "run".to_string(),
            inputs: StepInputs {
                run_command: vec!["echo hello".to_string()],
                ..Default::default()
            },
        }],
        ..Default::default()
    }
}

fn error_body(code: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(409).set_body_json(json!({ "code": code, "message": message }))
}

// =============================================================================
// CREATE
// =============================================================================

#[tokio::test]
async fn test_create_document_posts_wire_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/documents"))
        .and(body_json(json!({
            "name": "demo",
            "content": "{}",
            "documentFormat": "JSON",
            "documentType": "Command",
            "targetType": "/"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let registry = HttpRegistry::new(mock_server.uri());
    let result = registry.create_document(create_request("demo", "{}")).await;

    assert!(result.is_ok(), "create should succeed: {:?}", result.err());
}

#[tokio::test]
async fn test_create_classifies_already_exists() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/documents"))
        .respond_with(error_body("DocumentAlreadyExists", "demo is taken"))
        .mount(&mock_server)
        .await;

    let registry = HttpRegistry::new(mock_server.uri());
    let err = registry
        .create_document(create_request("demo", "{}"))
        .await
        .unwrap_err();

    assert!(matches!(err, RegistryError::AlreadyExists));
}

#[tokio::test]
async fn test_create_keeps_unknown_errors_opaque() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/documents"))
        .respond_with(error_body("AccessDeniedException", "not allowed"))
        .mount(&mock_server)
        .await;

    let registry = HttpRegistry::new(mock_server.uri());
    let err = registry
        .create_document(create_request("demo", "{}"))
        .await
        .unwrap_err();

    match err {
        RegistryError::Api { code, message } => {
            assert_eq!(code, "AccessDeniedException");
            assert_eq!(message, "not allowed");
        }
        other => panic!("expected Api variant, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_handles_non_json_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/documents"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let registry = HttpRegistry::new(mock_server.uri());
    let err = registry
        .create_document(create_request("demo", "{}"))
        .await
        .unwrap_err();

    match err {
        RegistryError::Api { code, .. } => assert_eq!(code, "502"),
        other => panic!("expected Api variant, got {:?}", other),
    }
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/documents"))
        .and(header("Authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let registry = HttpRegistry::new(mock_server.uri()).with_token("secret-token");
    let result = registry.create_document(create_request("demo", "{}")).await;

    assert!(result.is_ok());
}

// =============================================================================
// UPDATE / PROMOTE
// =============================================================================

#[tokio::test]
async fn test_update_returns_new_version() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/documents/demo/versions"))
        .and(body_json(json!({
            "content": "{}",
            "documentFormat": "JSON",
            "targetType": "/",
            "documentVersion": "$LATEST"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"documentVersion": "4"})))
        .mount(&mock_server)
        .await;

    let registry = HttpRegistry::new(mock_server.uri());
    let version = registry
        .update_document(update_request("demo", "{}"))
        .await
        .unwrap();

    assert_eq!(version, "4");
}

#[tokio::test]
async fn test_update_classifies_duplicate_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/documents/demo/versions"))
        .respond_with(error_body("DuplicateDocumentContent", "no changes"))
        .mount(&mock_server)
        .await;

    let registry = HttpRegistry::new(mock_server.uri());
    let err = registry
        .update_document(update_request("demo", "{}"))
        .await
        .unwrap_err();

    assert!(matches!(err, RegistryError::DuplicateContent));
}

#[tokio::test]
async fn test_set_default_version_returns_description() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/documents/demo/default-version"))
        .and(body_json(json!({"documentVersion": "4"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"description": "demo v4 active"})),
        )
        .mount(&mock_server)
        .await;

    let registry = HttpRegistry::new(mock_server.uri());
    let description = registry.set_default_version("demo", "4").await.unwrap();

    assert_eq!(description.as_deref(), Some("demo v4 active"));
}

// =============================================================================
// FULL PUBLISH FLOW OVER HTTP
// =============================================================================

#[tokio::test]
async fn test_publish_create_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let registry = HttpRegistry::new(mock_server.uri());
    let outcome = publish(&registry, &sample_document(), "demo").await.unwrap();

    assert_eq!(outcome, PublishOutcome::Created);
}

#[tokio::test]
async fn test_publish_update_path_promotes_new_version() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/documents"))
        .respond_with(error_body("DocumentAlreadyExists", "taken"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/documents/demo/versions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"documentVersion": "3"})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/documents/demo/default-version"))
        .and(body_json(json!({"documentVersion": "3"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let registry = HttpRegistry::new(mock_server.uri());
    let outcome = publish(&registry, &sample_document(), "demo").await.unwrap();

    assert_eq!(
        outcome,
        PublishOutcome::Updated {
            version: "3".to_string()
        }
    );
}

#[tokio::test]
async fn test_publish_unchanged_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/documents"))
        .respond_with(error_body("DocumentAlreadyExists", "taken"))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/documents/demo/versions"))
        .respond_with(error_body("DuplicateDocumentContent", "no changes"))
        .mount(&mock_server)
        .await;

    let registry = HttpRegistry::new(mock_server.uri());
    let outcome = publish(&registry, &sample_document(), "demo").await.unwrap();

    assert_eq!(outcome, PublishOutcome::Unchanged);
}

#[tokio::test]
async fn test_publish_cli_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let file = temp_dir.path().join("demo.yaml");
        std::fs::write(
            &file,
            "schemaVersion: \"2.2\"\nmainSteps:\n  - action: aws:runShellScript\n    name: run\n    inputs:\n      runCommand: [\"echo hello\"]\n",
        )
        .unwrap();

        let mut cmd = assert_cmd::Command::cargo_bin("docpub").unwrap();
        cmd.env_remove("DOCPUB_REGISTRY_TOKEN");
        cmd.args(["publish", file.to_str().unwrap(), "--endpoint", &uri])
            .assert()
            .success()
            .stdout(predicates::str::contains("created demo"))
    })
    .await;

    assert!(result.is_ok());
}
