//! docpub CLI - compile and publish automation documents

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

use docpub::compile::{compile_file, document_name};
use docpub::config::RegistryConfig;
use docpub::error::{DocpubError, FixSuggestion};
use docpub::publish::{publish, PublishOutcome};
use docpub::registry::HttpRegistry;

#[derive(Parser)]
#[command(name = "docpub")]
#[command(about = "docpub - compile and publish automation documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a definition and publish it to the document registry
    Publish {
        /// Path to the definition file
        file: PathBuf,

        /// Override the published document name (default: file name without extension)
        #[arg(short, long)]
        name: Option<String>,

        /// Registry endpoint (default: $DOCPUB_REGISTRY_URL)
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Registry API token (default: $DOCPUB_REGISTRY_TOKEN)
        #[arg(short, long)]
        token: Option<String>,
    },

    /// Compile a definition and print the canonical JSON payload
    Compile {
        /// Path to the definition file
        file: PathBuf,
    },

    /// Parse and compile a definition without publishing
    Validate {
        /// Path to the definition file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (ignore if not present)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Publish {
            file,
            name,
            endpoint,
            token,
        } => publish_definition(&file, name, endpoint, token).await,
        Commands::Compile { file } => compile_definition(&file),
        Commands::Validate { file } => validate_definition(&file),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

async fn publish_definition(
    file: &Path,
    name_override: Option<String>,
    endpoint: Option<String>,
    token: Option<String>,
) -> Result<(), DocpubError> {
    let config = RegistryConfig::from_env().with_overrides(endpoint, token);
    let endpoint = config.endpoint()?.to_string();

    let document = compile_file(file)?;
    let name = name_override.unwrap_or_else(|| document_name(file));

    let mut registry = HttpRegistry::new(endpoint);
    if let Some(token) = config.api_token {
        registry = registry.with_token(token);
    }

    match publish(&registry, &document, &name).await? {
        PublishOutcome::Created => println!("created {}", name.green().bold()),
        PublishOutcome::Updated { version } => println!(
            "updated {} (default version {})",
            name.green().bold(),
            version.cyan()
        ),
        PublishOutcome::Unchanged => println!("No changes to document."),
    }

    Ok(())
}

fn compile_definition(file: &Path) -> Result<(), DocpubError> {
    let document = compile_file(file)?;
    println!("{}", document.to_payload()?);
    Ok(())
}

fn validate_definition(file: &Path) -> Result<(), DocpubError> {
    let document = compile_file(file)?;

    println!("{} Definition '{}' is valid", "✓".green(), file.display());
    println!("  Schema version: {}", document.schema_version);
    println!("  Parameters: {}", document.parameters.len());
    println!("  Steps: {}", document.main_steps.len());

    Ok(())
}
