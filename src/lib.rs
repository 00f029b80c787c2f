//! docpub - compile and publish automation documents
//!
//! ## Module Responsibilities
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`document`] | YAML definition → canonical `Document` model |
//! | [`compile`] | Script inlining and canonical payload encoding |
//! | [`publish`] | Idempotent create-or-update publish state machine |
//! | [`registry`] | Document-registry client seam (HTTP + mock) |
//! | [`config`] | Registry endpoint and credential resolution |
//! | [`error`] | Error types with fix suggestions |

pub mod compile;
pub mod config;
pub mod document;
pub mod error;
pub mod publish;
pub mod registry;

pub use compile::{compile, compile_file, compile_source, document_name, parse_definition};
pub use config::RegistryConfig;
pub use document::{
    Definition, Document, ParameterSpec, Precondition, SourceInputs, Step, StepInputs,
};
pub use error::{DocpubError, FixSuggestion};
pub use publish::{publish, PublishOutcome};
pub use registry::{HttpRegistry, MockRegistry, Registry, RegistryError};
