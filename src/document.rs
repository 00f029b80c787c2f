//! Automation-document model
//!
//! Two-stage typing: [`Definition`] is the shape decoded from a source file,
//! whose steps may reference an external command script. [`Document`] is the
//! compiled form, whose step inputs can only carry inline command lines, so a
//! published payload cannot contain a script reference by construction.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A declared document parameter, passed through to the registry unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// Precondition gating a step. An empty `StringEquals` list means the step
/// always runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Precondition {
    #[serde(rename = "StringEquals", default, skip_serializing_if = "Vec::is_empty")]
    pub string_equals: Vec<String>,
}

impl Precondition {
    pub fn is_empty(&self) -> bool {
        self.string_equals.is_empty()
    }
}

/// One unit of work within a document, generic over the input stage.
///
/// `action` names the execution plugin at the consumer end and is opaque
/// here; the set of allowed actions is not validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "I: Deserialize<'de> + Default"))]
pub struct Step<I> {
    #[serde(default, skip_serializing_if = "Precondition::is_empty")]
    pub precondition: Precondition,

    pub action: String,

    pub name: String,

    #[serde(default)]
    pub inputs: I,
}

/// Step inputs as they may appear in a source definition.
///
/// `run_command_script` exists only pre-compilation: it names a script file,
/// relative to the definition's directory, whose lines supply `run_command`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInputs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub run_command: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_command_script: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_parameters: Option<String>,
}

/// Step inputs in the compiled document. Command bodies are always inline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepInputs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub run_command: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_parameters: Option<String>,
}

/// A document definition as parsed from YAML (pre-compilation).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    #[serde(default)]
    pub schema_version: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, ParameterSpec>,

    #[serde(default)]
    pub main_steps: Vec<Step<SourceInputs>>,
}

/// The canonical compiled document: what gets serialized and published.
///
/// Field declaration order fixes the serialized key order, and `parameters`
/// preserves insertion order, so encoding the same document twice yields
/// byte-identical payloads. The publisher relies on that byte identity to
/// detect "no changes" via the registry's duplicate-content signal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub schema_version: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, ParameterSpec>,

    #[serde(default)]
    pub main_steps: Vec<Step<StepInputs>>,
}

impl Document {
    /// Encode the document as its canonical compact JSON payload.
    pub fn to_payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
