//! Command-line interface for jx
//!
//! Usage:
//!   jx parse `<path>` [--format `<format>`] [--config `<config>`]  - Print the parsed tree
//!   jx check `<path>` [--config `<config>`]                       - Report diagnostics only
//!   jx list-formats                                              - List output formats
//!   jx list-configs                                              - List option presets
//!
//! `-v` raises the log level (repeatable); `JX_LOG` takes a full tracing filter instead.

use clap::{ArgAction, Parser, Subcommand};
use jx::jx::ast::{format_source_context, Diagnostic, ParseError};
use jx::jx::formats::FormatRegistry;
use jx::jx::{ConfigRegistry, JxParser, ParseOptions, ParseOutput, SourceFile};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jx", version, about = "A tool for inspecting jx source files")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a file and print the tree
    Parse {
        path: PathBuf,
        /// Output format (see list-formats)
        #[arg(short, long, default_value = "treeviz")]
        format: String,
        /// Option preset (see list-configs)
        #[arg(short, long, default_value = "default")]
        config: String,
    },
    /// Parse a file and report diagnostics; exits with 1 on errors
    Check {
        path: PathBuf,
        #[arg(short, long, default_value = "default")]
        config: String,
    },
    /// List available output formats
    ListFormats,
    /// List available option presets
    ListConfigs,
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env("JX_LOG").unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Parse {
            path,
            format,
            config,
        } => handle_parse_command(&path, &format, &config),
        Commands::Check { path, config } => handle_check_command(&path, &config),
        Commands::ListFormats => {
            handle_list_formats_command();
            ExitCode::SUCCESS
        }
        Commands::ListConfigs => {
            handle_list_configs_command();
            ExitCode::SUCCESS
        }
    }
}

fn options_for(config: &str) -> Result<ParseOptions, String> {
    ConfigRegistry::with_defaults()
        .get(config)
        .map(|preset| preset.options)
        .ok_or_else(|| format!("unknown configuration '{}' (see list-configs)", config))
}

/// Read and parse; on failure the error has already been printed
fn load(path: &Path, config: &str) -> Result<(String, ParseOutput<SourceFile>), ExitCode> {
    let options = options_for(config).map_err(|message| {
        eprintln!("Error: {}", message);
        ExitCode::from(2)
    })?;
    let source = std::fs::read_to_string(path).map_err(|err| {
        eprintln!("Error reading {}: {}", path.display(), err);
        ExitCode::from(2)
    })?;
    debug!(path = %path.display(), bytes = source.len(), config, "loaded source");

    match JxParser::new().with_options(options).parse_source(&source) {
        Ok(output) => Ok((source, output)),
        Err(err) => {
            report_fatal(path, &source, &err);
            Err(ExitCode::FAILURE)
        }
    }
}

fn report_fatal(path: &Path, source: &str, err: &ParseError) {
    eprintln!("{}: error: {}", path.display(), err);
    eprintln!("{}", format_source_context(source, err.location()));
}

fn report_diagnostics(path: &Path, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{}:{}", path.display(), diagnostic);
    }
}

fn handle_parse_command(path: &Path, format: &str, config: &str) -> ExitCode {
    let (_, output) = match load(path, config) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    match FormatRegistry::with_defaults().serialize(&output.value, format) {
        Ok(text) => print!("{}", text),
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::from(2);
        }
    }
    report_diagnostics(path, &output.diagnostics);
    ExitCode::SUCCESS
}

fn handle_check_command(path: &Path, config: &str) -> ExitCode {
    let (source, output) = match load(path, config) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    report_diagnostics(path, &output.diagnostics);
    for error in output.errors() {
        eprintln!("{}", format_source_context(&source, &error.range));
    }
    if output.has_errors() {
        ExitCode::FAILURE
    } else {
        println!("{}: ok ({} diagnostics)", path.display(), output.diagnostics.len());
        ExitCode::SUCCESS
    }
}

fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available formats:\n");
    for name in registry.list_formats() {
        let description = registry.get(&name).map(|f| f.description()).unwrap_or("");
        println!("  {}", name);
        println!("    {}", description);
    }
}

fn handle_list_configs_command() {
    println!("Available processing configurations:\n");
    for config in ConfigRegistry::with_defaults().list_all() {
        println!("  {}", config.name);
        println!("    {}", config.description);
    }
}
