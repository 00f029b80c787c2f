//! Source definition → canonical [`Document`]
//!
//! Compilation decodes a YAML definition and inlines referenced command
//! scripts, so the published document is self-contained: the registry never
//! needs access to the script files themselves.

use std::fs;
use std::path::Path;

use crate::document::{Definition, Document, SourceInputs, Step, StepInputs};
use crate::error::{DocpubError, Result};

/// Decode a YAML definition.
pub fn parse_definition(source: &str) -> Result<Definition> {
    Ok(serde_yaml::from_str(source)?)
}

/// Compile a definition, resolving script references against `source_dir`
/// (the directory containing the definition file).
///
/// Script files are split on `'\n'` literally: a file ending in a newline
/// yields a trailing empty command line. Compiling unchanged inputs twice
/// produces byte-identical payloads.
pub fn compile(definition: Definition, source_dir: &Path) -> Result<Document> {
    let main_steps = definition
        .main_steps
        .into_iter()
        .map(|step| compile_step(step, source_dir))
        .collect::<Result<Vec<_>>>()?;

    Ok(Document {
        schema_version: definition.schema_version,
        description: definition.description,
        parameters: definition.parameters,
        main_steps,
    })
}

/// Decode and compile in one go.
pub fn compile_source(source: &str, source_dir: &Path) -> Result<Document> {
    compile(parse_definition(source)?, source_dir)
}

/// Read, decode, and compile the definition at `path`.
pub fn compile_file(path: &Path) -> Result<Document> {
    let source = fs::read_to_string(path).map_err(|source| DocpubError::DefinitionRead {
        path: path.display().to_string(),
        source,
    })?;
    let source_dir = path.parent().unwrap_or_else(|| Path::new("."));
    compile_source(&source, source_dir)
}

/// The published document name for a definition file: its base name with the
/// extension removed.
pub fn document_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn compile_step(step: Step<SourceInputs>, source_dir: &Path) -> Result<Step<StepInputs>> {
    let Step {
        precondition,
        action,
        name,
        inputs,
    } = step;
    let SourceInputs {
        timeout_seconds,
        run_command,
        run_command_script,
        document_type,
        document_path,
        document_parameters,
    } = inputs;

    let run_command = match run_command_script {
        Some(script) if !script.is_empty() => {
            let content = fs::read_to_string(source_dir.join(&script)).map_err(|source| {
                DocpubError::ScriptRead {
                    path: script.clone(),
                    source,
                }
            })?;
            tracing::debug!(step = %name, script = %script, "inlined command script");
            split_lines(&content)
        }
        _ => run_command,
    };

    Ok(Step {
        precondition,
        action,
        name,
        inputs: StepInputs {
            timeout_seconds,
            run_command,
            document_type,
            document_path,
            document_parameters,
        },
    })
}

fn split_lines(content: &str) -> Vec<String> {
    content.split('\n').map(str::to_string).collect()
}
