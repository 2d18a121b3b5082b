// crates/routing-render-cli/src/main.rs
// ============================================================================
// Module: Routing Render CLI Entry Point
// Description: Command dispatcher for rendering job configuration templates.
// Purpose: Load properties and links from disk and materialize job artifacts.
// Dependencies: clap, routing-render-core, routing-render-jobs, serde_json,
//               serde_yaml, thiserror, toml
// ============================================================================

//! ## Overview
//! The `routing-render` binary renders the configuration templates of the
//! `route_registrar` and `routing-api` jobs outside a full deployment.
//! Properties and links are loaded from JSON, YAML, or TOML files selected
//! by extension, the instance address is supplied explicitly (the renderer
//! performs no interface discovery), and artifacts are written under an
//! output directory or, for a single template, to stdout.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use routing_render_core::LinkSet;
use routing_render_core::NetworkContext;
use routing_render_core::PropertyTree;
use routing_render_core::RenderInputs;
use routing_render_jobs::Job;
use routing_render_jobs::registry;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a properties or links input file.
const MAX_INPUT_BYTES: u64 = 1024 * 1024;
/// Address used when the orchestrator does not supply one.
const DEFAULT_ADDRESS: &str = "127.0.0.1";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "routing-render", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a job's templates to an output directory or stdout.
    Render(RenderCommand),
    /// List the templates known to the registry.
    Templates(TemplatesCommand),
    /// Run a job's render pipeline without writing artifacts.
    Validate(ValidateCommand),
}

/// Job selector argument.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum JobArg {
    /// The route_registrar job.
    #[value(name = "route_registrar")]
    RouteRegistrar,
    /// The routing-api job.
    #[value(name = "routing-api")]
    RoutingApi,
}

impl JobArg {
    /// Converts the argument into the registry job.
    const fn job(self) -> Job {
        match self {
            Self::RouteRegistrar => Job::RouteRegistrar,
            Self::RoutingApi => Job::RoutingApi,
        }
    }
}

/// Arguments for the `render` command.
#[derive(Args, Debug)]
struct RenderCommand {
    /// Job whose templates should be rendered.
    #[arg(long, value_enum, value_name = "JOB")]
    job: JobArg,
    /// Path to the properties file (.json, .yml, .yaml, or .toml).
    #[arg(long, value_name = "PATH")]
    properties: PathBuf,
    /// Optional path to the links file (same formats as properties).
    #[arg(long, value_name = "PATH")]
    links: Option<PathBuf>,
    /// Resolved instance address for the job.
    #[arg(long, value_name = "ADDR", default_value = DEFAULT_ADDRESS)]
    address: String,
    /// Render only this job-relative template path.
    #[arg(long, value_name = "TEMPLATE")]
    template: Option<String>,
    /// Output directory for whole-job renders.
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
    /// Output file for single-template renders (defaults to stdout).
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

/// Arguments for the `templates` command.
#[derive(Args, Debug)]
struct TemplatesCommand {
    /// Restrict the listing to one job.
    #[arg(long, value_enum, value_name = "JOB")]
    job: Option<JobArg>,
}

/// Arguments for the `validate` command.
#[derive(Args, Debug)]
struct ValidateCommand {
    /// Job whose templates should be validated.
    #[arg(long, value_enum, value_name = "JOB")]
    job: JobArg,
    /// Path to the properties file (.json, .yml, .yaml, or .toml).
    #[arg(long, value_name = "PATH")]
    properties: PathBuf,
    /// Optional path to the links file (same formats as properties).
    #[arg(long, value_name = "PATH")]
    links: Option<PathBuf>,
    /// Resolved instance address for the job.
    #[arg(long, value_name = "ADDR", default_value = DEFAULT_ADDRESS)]
    address: String,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&format!("routing-render {version}"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Render(command) => command_render(&command),
        Commands::Templates(command) => command_templates(&command),
        Commands::Validate(command) => command_validate(&command),
    }
}

// ============================================================================
// SECTION: Render Command
// ============================================================================

/// Executes the `render` command.
fn command_render(command: &RenderCommand) -> CliResult<ExitCode> {
    let job = command.job.job();
    let inputs = load_inputs(&command.properties, command.links.as_deref(), &command.address)?;

    if let Some(template) = &command.template {
        let artifact = registry::render_template(job, template, &inputs)
            .map_err(|err| CliError::new(err.to_string()))?;
        match &command.output {
            Some(path) => {
                fs::write(path, artifact.content.as_bytes()).map_err(|err| {
                    CliError::new(format!("write {}: {err}", path.display()))
                })?;
            }
            None => {
                write_stdout_bytes(artifact.content.as_bytes())
                    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    let Some(output_dir) = &command.output_dir else {
        return Err(CliError::new(
            "render requires --output-dir unless --template is given".to_string(),
        ));
    };
    let bundle =
        registry::render_job(job, &inputs).map_err(|err| CliError::new(err.to_string()))?;
    bundle.write_to(output_dir).map_err(|err| CliError::new(err.to_string()))?;
    for artifact in bundle.artifacts() {
        write_stdout_line(&format!("wrote {}", artifact.path))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Templates Command
// ============================================================================

/// Executes the `templates` command.
fn command_templates(command: &TemplatesCommand) -> CliResult<ExitCode> {
    let filter = command.job.map(JobArg::job);
    for template in registry::TEMPLATES {
        if filter.is_some_and(|job| job != template.job) {
            continue;
        }
        write_stdout_line(&format!("{}\t{}", template.job.name(), template.path))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Validate Command
// ============================================================================

/// Executes the `validate` command.
fn command_validate(command: &ValidateCommand) -> CliResult<ExitCode> {
    let job = command.job.job();
    let inputs = load_inputs(&command.properties, command.links.as_deref(), &command.address)?;
    let bundle =
        registry::render_job(job, &inputs).map_err(|err| CliError::new(err.to_string()))?;
    write_stdout_line(&format!("ok: {} artifacts", bundle.artifacts().len()))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Input Loading
// ============================================================================

/// Loads properties, links, and the address into render inputs.
fn load_inputs(
    properties: &Path,
    links: Option<&Path>,
    address: &str,
) -> CliResult<RenderInputs> {
    let properties = load_property_tree(properties)?;
    let links = match links {
        Some(path) => load_links(path)?,
        None => LinkSet::empty(),
    };
    Ok(RenderInputs::new(properties, links, NetworkContext::new(address)))
}

/// Loads a property tree from a JSON, YAML, or TOML file.
fn load_property_tree(path: &Path) -> CliResult<PropertyTree> {
    let document = load_document(path)?;
    PropertyTree::from_value(document)
        .map_err(|err| CliError::new(format!("{}: {err}", path.display())))
}

/// Loads a link set from a JSON, YAML, or TOML file.
fn load_links(path: &Path) -> CliResult<LinkSet> {
    let document = load_document(path)?;
    LinkSet::from_value(document)
        .map_err(|err| CliError::new(format!("{}: {err}", path.display())))
}

/// Reads and parses an input file selected by extension.
fn load_document(path: &Path) -> CliResult<Value> {
    let text = read_limited(path)?;
    parse_document(&text, &input_extension(path)?)
        .map_err(|message| CliError::new(format!("{}: {message}", path.display())))
}

/// Returns the lowercase extension of an input file.
fn input_extension(path: &Path) -> CliResult<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .ok_or_else(|| {
            CliError::new(format!("{}: input files need an extension", path.display()))
        })
}

/// Parses input text into a JSON value according to the extension.
fn parse_document(text: &str, extension: &str) -> Result<Value, String> {
    match extension {
        "json" => serde_json::from_str(text).map_err(|err| err.to_string()),
        "yml" | "yaml" => serde_yaml::from_str(text).map_err(|err| err.to_string()),
        "toml" => {
            let parsed: toml::Value = toml::from_str(text).map_err(|err| err.to_string())?;
            serde_json::to_value(parsed).map_err(|err| err.to_string())
        }
        other => Err(format!("unsupported input extension: {other}")),
    }
}

/// Reads an input file, enforcing the size limit before the read.
fn read_limited(path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(path)
        .map_err(|err| CliError::new(format!("read {}: {err}", path.display())))?;
    if metadata.len() > MAX_INPUT_BYTES {
        return Err(CliError::new(format!(
            "{}: input exceeds {MAX_INPUT_BYTES} bytes",
            path.display()
        )));
    }
    fs::read_to_string(path)
        .map_err(|err| CliError::new(format!("read {}: {err}", path.display())))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Shows top-level help when no subcommand is given.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output stream failure.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed writing to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
