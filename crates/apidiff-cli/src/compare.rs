//! # Compare Subcommand
//!
//! Prints a diff report of the schema definitions of two API description
//! versions.
//!
//! ```bash
//! apidiff compare catalog_v4_swagger.yaml catalog_v5.oas.yaml
//! apidiff compare old.json new.yaml --old-dialect auto --format json
//! ```
//!
//! Settings resolve in three layers: built-in defaults, then the
//! `--config` file, then flags given on the command line.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use apidiff_schema::{
    compare_files, render_json, render_text, ComparisonConfig, DialectSelection,
};

/// Old document compared when none is given.
pub const DEFAULT_OLD: &str = "TMF620_Product_Catalog_Management_API_v4.1.0_swagger.yaml";

/// New document compared when none is given.
pub const DEFAULT_NEW: &str = "TMF620-Product_Catalog_Management-v5.0.0.oas.yaml";

/// Arguments for the `apidiff compare` subcommand.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Old API description (JSON or YAML).
    #[arg(default_value = DEFAULT_OLD)]
    pub old: PathBuf,

    /// New API description (JSON or YAML).
    #[arg(default_value = DEFAULT_NEW)]
    pub new: PathBuf,

    /// Dialect of the old document.
    #[arg(long, value_enum)]
    pub old_dialect: Option<DialectArg>,

    /// Dialect of the new document.
    #[arg(long, value_enum)]
    pub new_dialect: Option<DialectArg>,

    /// Label of the old version in the report.
    #[arg(long)]
    pub old_label: Option<String>,

    /// Label of the new version in the report.
    #[arg(long)]
    pub new_label: Option<String>,

    /// Report heading.
    #[arg(long)]
    pub title: Option<String>,

    /// Report format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: ReportFormat,
}

/// Dialect selection on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DialectArg {
    /// Detect from the `swagger` / `openapi` version field.
    Auto,
    /// Swagger 2.0 (`definitions`).
    Swagger2,
    /// OpenAPI 3.x (`components.schemas`).
    Openapi3,
}

impl From<DialectArg> for DialectSelection {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Auto => Self::Auto,
            DialectArg::Swagger2 => Self::Swagger2,
            DialectArg::Openapi3 => Self::OpenApi3,
        }
    }
}

/// Output format of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable text.
    Text,
    /// Structured JSON.
    Json,
}

/// Resolve the effective comparison settings.
pub fn resolve_config(args: &CompareArgs, config_path: Option<&Path>) -> Result<ComparisonConfig> {
    let mut config = match config_path {
        Some(path) => ComparisonConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ComparisonConfig::default(),
    };

    if let Some(dialect) = args.old_dialect {
        config.old_dialect = dialect.into();
    }
    if let Some(dialect) = args.new_dialect {
        config.new_dialect = dialect.into();
    }
    if let Some(label) = &args.old_label {
        config.old_label = label.clone();
    }
    if let Some(label) = &args.new_label {
        config.new_label = label.clone();
    }
    if let Some(title) = &args.title {
        config.title = title.clone();
    }

    Ok(config)
}

/// Build the report and render it in the requested format.
pub fn render_comparison(args: &CompareArgs, config_path: Option<&Path>) -> Result<String> {
    let config = resolve_config(args, config_path)?;
    let report = compare_files(&args.old, &args.new, &config).with_context(|| {
        format!(
            "failed to compare {} with {}",
            args.old.display(),
            args.new.display()
        )
    })?;

    match args.format {
        ReportFormat::Text => Ok(render_text(&report, &config)),
        ReportFormat::Json => render_json(&report).context("failed to render JSON report"),
    }
}

/// Execute the compare subcommand.
pub fn run_compare(args: &CompareArgs, config_path: Option<&Path>) -> Result<u8> {
    let rendered = render_comparison(args, config_path)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", rendered.trim_end_matches('\n'))
        .context("failed to write report to stdout")?;

    Ok(0)
}
