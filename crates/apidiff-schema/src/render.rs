//! # Report Rendering
//!
//! Text rendering reproduces the layout engineers read in a terminal:
//! a boxed header, summary counts, the one-sided listings, and a property
//! table per common schema. JSON rendering is the serde form of
//! [`ComparisonReport`].
//!
//! Descriptions are cut by characters, not bytes. The one-sided listings
//! always append an ellipsis; the side-by-side block appends one only
//! when text was actually cut.

use std::fmt::{self, Write as _};

use crate::config::ComparisonConfig;
use crate::error::SchemaError;
use crate::report::{ComparisonReport, PropertyChange, SchemaComparison, SchemaListing};

/// Width of the `=` and `─` rules.
pub const RULE_WIDTH: usize = 100;

const PROPERTY_COLUMN: usize = 40;
const TYPE_COLUMN: usize = 25;
const ELLIPSIS: &str = "...";

/// When to append the ellipsis marker to a truncated description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ellipsis {
    /// Always, even if the text fit.
    Always,
    /// Only when characters were dropped.
    WhenTruncated,
}

/// Cut `text` to at most `limit` characters.
pub fn truncate(text: &str, limit: usize, ellipsis: Ellipsis) -> String {
    let cut = text.char_indices().nth(limit).map(|(byte, _)| &text[..byte]);
    match (cut, ellipsis) {
        (Some(head), _) => format!("{head}{ELLIPSIS}"),
        (None, Ellipsis::Always) => format!("{text}{ELLIPSIS}"),
        (None, Ellipsis::WhenTruncated) => text.to_string(),
    }
}

/// Render the report as plain text.
pub fn render_text(report: &ComparisonReport, config: &ComparisonConfig) -> String {
    TextReport { report, config }.to_string()
}

/// Render the report as pretty-printed JSON.
pub fn render_json(report: &ComparisonReport) -> Result<String, SchemaError> {
    Ok(serde_json::to_string_pretty(report)?)
}

struct TextReport<'r> {
    report: &'r ComparisonReport,
    config: &'r ComparisonConfig,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let (old, new) = (&report.old, &report.new);

        rule(f, '=')?;
        writeln!(f, "{}", report.title)?;
        writeln!(
            f,
            "{} ({}) vs {} ({})",
            old.label, old.dialect, new.label, new.dialect
        )?;
        rule(f, '=')?;
        writeln!(f)?;

        writeln!(f, "Summary:")?;
        writeln!(f, "  {} base schemas: {}", old.label, old.base_schemas)?;
        writeln!(f, "  {} base schemas: {}", new.label, new.base_schemas)?;
        writeln!(f, "  Common schemas: {}", report.summary.common)?;
        writeln!(f, "  Only in {}: {}", old.label, report.summary.only_in_old)?;
        writeln!(f, "  Only in {}: {}", new.label, report.summary.only_in_new)?;
        writeln!(f)?;

        if !report.only_in_old.is_empty() {
            section(f, &format!("SCHEMAS ONLY IN {}", old.label))?;
            for listing in &report.only_in_old {
                self.listing(f, listing, Some("No description"))?;
            }
            writeln!(f)?;
        }

        if !report.only_in_new.is_empty() {
            section(f, &format!("SCHEMAS ONLY IN {}", new.label))?;
            for listing in &report.only_in_new {
                self.listing(f, listing, None)?;
            }
            writeln!(f)?;
        }

        section(f, "SIDE-BY-SIDE COMPARISON OF COMMON SCHEMAS")?;
        for comparison in &report.common {
            self.comparison(f, comparison)?;
        }

        writeln!(f)?;
        section(f, "END OF COMPARISON")
    }
}

impl TextReport<'_> {
    fn listing(
        &self,
        f: &mut fmt::Formatter<'_>,
        listing: &SchemaListing,
        fallback: Option<&str>,
    ) -> fmt::Result {
        writeln!(f, "\n• {}", listing.name)?;
        if let Some(desc) = listing.description.as_deref().or(fallback) {
            let desc = truncate(desc, self.config.listing_description_limit, Ellipsis::Always);
            writeln!(f, "  Description: {desc}")?;
        }
        Ok(())
    }

    fn comparison(&self, f: &mut fmt::Formatter<'_>, comparison: &SchemaComparison) -> fmt::Result {
        let (old, new) = (&self.report.old, &self.report.new);

        writeln!(f)?;
        rule(f, '─')?;
        writeln!(f, "Schema: {}", comparison.name)?;
        rule(f, '─')?;

        let new_desc = comparison.new_description.as_deref().unwrap_or("");
        if comparison.old_description.is_some() || !new_desc.is_empty() {
            let limit = self.config.comparison_description_limit;
            let old_desc = comparison.old_description.as_deref().unwrap_or("N/A");
            writeln!(f, "\nDescription:")?;
            writeln!(f, "  {}: {}", old.label, truncate(old_desc, limit, Ellipsis::WhenTruncated))?;
            writeln!(f, "  {}: {}", new.label, truncate(new_desc, limit, Ellipsis::WhenTruncated))?;
        }

        writeln!(f, "\nProperties Comparison:")?;
        writeln!(
            f,
            "  {:<pw$} {:<tw$} {:<tw$}",
            "Property",
            format!("{} Type", old.label),
            format!("{} Type", new.label),
            pw = PROPERTY_COLUMN,
            tw = TYPE_COLUMN,
        )?;
        writeln!(
            f,
            "  {} {} {}",
            "-".repeat(PROPERTY_COLUMN),
            "-".repeat(TYPE_COLUMN),
            "-".repeat(TYPE_COLUMN)
        )?;

        for row in &comparison.properties {
            let (old_cell, new_cell, marker) = match &row.change {
                PropertyChange::Unchanged { type_tag } => {
                    (type_tag.to_string(), type_tag.to_string(), "")
                }
                PropertyChange::TypeChanged { old: o, new: n } => {
                    (o.to_string(), n.to_string(), " ⚠️")
                }
                PropertyChange::Removed { old: o } => {
                    (o.to_string(), "REMOVED".to_string(), " ❌")
                }
                PropertyChange::Added { new: n } => {
                    (format!("NEW IN {}", new.label), n.to_string(), " ✨")
                }
            };
            writeln!(
                f,
                "  {:<pw$} {:<tw$} {:<tw$}{marker}",
                row.name,
                old_cell,
                new_cell,
                pw = PROPERTY_COLUMN,
                tw = TYPE_COLUMN,
            )?;
        }

        if !comparison.old_variants.is_empty() || !comparison.new_variants.is_empty() {
            writeln!(f, "\n  Variants:")?;
            if !comparison.old_variants.is_empty() {
                writeln!(f, "    {}: {}", old.label, comparison.old_variants.join(", "))?;
            }
            if !comparison.new_variants.is_empty() {
                writeln!(f, "    {}: {}", new.label, comparison.new_variants.join(", "))?;
            }
        }

        Ok(())
    }
}

fn rule(f: &mut fmt::Formatter<'_>, ch: char) -> fmt::Result {
    for _ in 0..RULE_WIDTH {
        f.write_char(ch)?;
    }
    f.write_char('\n')
}

fn section(f: &mut fmt::Formatter<'_>, heading: &str) -> fmt::Result {
    rule(f, '=')?;
    writeln!(f, "{heading}")?;
    rule(f, '=')
}
