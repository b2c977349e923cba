use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::batch::BatchReport;
use crate::enrich::{Origin, Quote};
use crate::rules::Rules;


/// Everything written to a JSON report file.
#[derive(Debug, Serialize)]
struct Report<'a> {
    source: &'a str,
    generated_at: String,
    batch: &'a BatchReport,
    quote: &'a Quote,
}

/// Renders the human-readable batch summary.
pub fn summary(report: &BatchReport, quote: &Quote) -> String {
    let mut out = String::new();
    let stats = &report.stats;

    out.push_str("Components:\n");
    for result in &report.results {
        let c = &result.classification;
        out.push_str(&format!(
            "  - {:<32} {:<14} {:>5.1}%  {}\n",
            result.name,
            c.detected_type,
            c.confidence * 100.0,
            c.reason
        ));
    }

    out.push_str(&format!(
        "Statistics:
  - Total: {}
  - Valid: {}
  - Woodwork: {}
  - Non-woodwork: {}
  - Undetermined: {}
  - Mean confidence: {:.1}% (min {:.1}%, max {:.1}%)
",
        stats.total,
        stats.valid,
        stats.woodwork,
        stats.non_woodwork,
        stats.undetermined,
        stats.mean_confidence * 100.0,
        stats.min_confidence * 100.0,
        stats.max_confidence * 100.0,
    ));
    for t in &stats.type_counts {
        out.push_str(&format!("    {}: {}\n", t.name, t.count));
    }

    out.push_str("Insights:\n");
    for insight in &report.insights {
        out.push_str(&format!("  - {}\n", insight));
    }

    if !report.recommendations.is_empty() {
        out.push_str("Recommendations:\n");
        for rec in &report.recommendations {
            out.push_str(&format!("  - {}\n", rec));
        }
    }

    let overridden = quote
        .components
        .iter()
        .filter(|c| c.origin == Origin::Classifier && c.final_type != c.baseline_type);
    out.push_str(&format!(
        "Quote: {} components, {:.2} m²\n",
        quote.components.len(),
        quote.total_area_m2
    ));
    for c in overridden {
        out.push_str(&format!(
            "  - {}: {} -> {}\n",
            c.name, c.baseline_type, c.final_type
        ));
    }

    out
}

pub fn print_summary(report: &BatchReport, quote: &Quote) {
    print!("{}", summary(report, quote));
}

/// Serialises the full report, stamped with the current time.
pub fn report_json(source: &str, report: &BatchReport, quote: &Quote) -> Result<String> {
    let report = Report {
        source,
        generated_at: Utc::now().to_rfc3339(),
        batch: report,
        quote,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Writes the JSON report to `path`.
pub fn write_report(
    path: impl AsRef<Path>,
    source: &str,
    report: &BatchReport,
    quote: &Quote,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("failed to create report file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writer.write_all(report_json(source, report, quote)?.as_bytes())?;
    writeln!(writer)?;
    writer.flush()?;

    tracing::info!(path = %path.display(), "report written");
    Ok(())
}

/// Prints the active rule tables as TOML.
pub fn dump_rules(rules: &Rules) -> Result<()> {
    println!("{}", rules.to_toml()?);
    Ok(())
}
