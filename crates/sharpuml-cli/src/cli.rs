//! Command-line interface for the sharpuml utility
//!
//! Analyzes a C# solution and writes its PlantUML diagram to a file.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use sharpuml::core::logging::init_logging;
use sharpuml::plugins::orchestrator::Orchestrator;
use sharpuml::{CancellationToken, Config, ProjectDependency};

/// Sharpuml - Turn C# solutions into PlantUML diagrams
#[derive(Parser)]
#[command(name = "sharpuml")]
#[command(about = "Generate PlantUML class and project diagrams from a C# solution")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    /// Solution (.sln) or project (.csproj) file to analyze
    pub solution: PathBuf,

    /// Output file for the PlantUML diagram (use - for stdout)
    pub output: PathBuf,

    /// TOML file with classifier rules
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Also write the analyzed model as JSON
    #[arg(long, value_name = "FILE")]
    pub model_json: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Main CLI application
#[derive(Default)]
pub struct SharpumlApp;

impl SharpumlApp {
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var("SHARPUML_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());

        let log_format_str = std::env::var("SHARPUML_LOG_FORMAT")
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level_str), Some(&log_format_str)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Sharpuml v{}", env!("CARGO_PKG_VERSION"));
        }

        let config = self.load_config(cli.rules.as_deref())?;
        let orchestrator = Orchestrator::with_config(config.classifier);

        let projects = orchestrator.analyze(&cli.solution, &CancellationToken::new())?;
        if cli.verbose {
            let classes: usize = projects.iter().map(ProjectDependency::class_count).sum();
            eprintln!("Analyzed {} projects, {} classes", projects.len(), classes);
        }

        let diagram = orchestrator.render(&projects);
        let model = match &cli.model_json {
            Some(path) => Some((path, self.model_json(&projects)?)),
            None => None,
        };

        // The model file is only written once the diagram is on disk
        self.write_output(&cli.output, &diagram)?;
        if let Some((path, json)) = model {
            fs::write(path, json)
                .map_err(|e| anyhow!("Failed to write model file '{}': {}", path.display(), e))?;
        }

        info!(output = %cli.output.display(), "Wrote diagram");
        Ok(())
    }

    /// Load classifier rules, or the defaults when no file is given
    pub fn load_config(&self, rules: Option<&Path>) -> Result<Config> {
        match rules {
            Some(path) => Ok(Config::load(path)?),
            None => Ok(Config::default()),
        }
    }

    /// Serialize the analyzed model as pretty JSON
    pub fn model_json(&self, projects: &[ProjectDependency]) -> Result<String> {
        serde_json::to_string_pretty(projects).context("Failed to serialize model")
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: &Path, content: &str) -> Result<()> {
        if output.to_string_lossy() == "-" {
            println!("{}", content);
            io::stdout().flush()?;
            return Ok(());
        }

        fs::write(output, content)
            .map_err(|e| anyhow!("Failed to write output file '{}': {}", output.display(), e))
    }
}
