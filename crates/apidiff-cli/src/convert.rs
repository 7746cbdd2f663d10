//! # Convert Subcommand
//!
//! Rewrites a JSON API description as YAML.
//!
//! ```bash
//! apidiff convert catalog_swagger.json catalog_swagger.yaml
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use apidiff_core::convert_file;

/// Input file converted when none is given.
pub const DEFAULT_INPUT: &str = "TMF620_Product_Catalog_Management_API_v4.1.0_swagger.json";

/// Output file written when none is given.
pub const DEFAULT_OUTPUT: &str = "TMF620_Product_Catalog_Management_API_v4.1.0_swagger.yaml";

/// Arguments for the `apidiff convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// JSON document to read.
    #[arg(default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// YAML document to write.
    #[arg(default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
}

/// Execute the convert subcommand.
pub fn run_convert(args: &ConvertArgs) -> Result<u8> {
    let summary = convert_file(&args.input, &args.output).with_context(|| {
        format!(
            "failed to convert {} to {}",
            args.input.display(),
            args.output.display()
        )
    })?;

    tracing::debug!(
        input_bytes = summary.input_bytes,
        output_bytes = summary.output_bytes,
        "conversion finished"
    );
    println!("Conversion completed successfully!");
    Ok(0)
}
