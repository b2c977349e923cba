use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::fmt;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_load() {
        let settings = load_default_config().unwrap();
        assert_eq!(settings.override_threshold, 0.6);
        assert!(settings.parallel);
        assert!(!settings.progress);
        assert_eq!(settings.format, ReportFormat::Text);
        assert!(settings.output.is_none());
        assert!(settings.rules.is_none());
    }

    #[test]
    fn cli_flags_override_defaults() {
        let args = CliArgs::try_parse_from([
            "joinery",
            "-i",
            "kitchen.obj",
            "--threshold",
            "0.75",
            "--serial",
            "--format",
            "json",
            "-o",
            "report.json",
        ])
        .unwrap();
        let mut settings = load_default_config().unwrap();
        args.apply(&mut settings);

        assert_eq!(settings.input, "kitchen.obj");
        assert_eq!(settings.override_threshold, 0.75);
        assert!(!settings.parallel);
        assert_eq!(settings.format, ReportFormat::Json);
        assert_eq!(settings.output.as_deref(), Some("report.json"));
        validate_settings(&settings).unwrap();
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let mut settings = load_default_config().unwrap();
        settings.override_threshold = 1.5;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn display_lists_the_resolved_values() {
        let mut settings = load_default_config().unwrap();
        settings.input = "kitchen.obj".to_string();
        let text = settings.to_string();
        assert!(text.contains("Input: kitchen.obj"));
        assert!(text.contains("Override Threshold: 0.60"));
        assert!(text.contains("Rules: built-in"));
    }
}

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// How the batch report is printed to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
}

/// Runtime configuration for the application.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    /// Model file to classify (`.obj` or `.json`).
    pub input: String,
    /// Classifier confidence above which the baseline type is replaced.
    pub override_threshold: f64,
    pub parallel: bool,
    pub progress: bool,
    pub format: ReportFormat,
    /// Where to write the JSON report, if anywhere.
    #[serde(default)]
    pub output: Option<String>,
    /// Replacement rule tables in TOML.
    #[serde(default)]
    pub rules: Option<String>,
    #[serde(default)]
    pub dump_rules: bool,
}

/// Loads only the defaults compiled into the binary.
pub fn load_default_config() -> Result<Settings> {
    let settings: Settings = Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        .build()?
        .try_deserialize()
        .context("failed to deserialize default configuration")?;

    validate_settings(&settings)?;
    Ok(settings)
}

/// Loads settings from, in increasing precedence: the compiled-in defaults, an
/// optional `joinery.toml` in the working directory, `JOINERY_*` environment
/// variables and the command line.
pub fn load_config() -> Result<Settings> {
    let mut settings: Settings = Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        .add_source(File::with_name("joinery").required(false))
        .add_source(Environment::with_prefix("joinery").try_parsing(true))
        .build()
        .context("failed to load configuration")?
        .try_deserialize()
        .context("failed to deserialize configuration")?;

    let args = CliArgs::parse();
    args.apply(&mut settings);

    validate_settings(&settings)?;
    tracing::debug!("{}", settings);
    Ok(settings)
}

pub fn validate_settings(settings: &Settings) -> Result<()> {
    if !(0.0..=1.0).contains(&settings.override_threshold) {
        bail!(
            "override threshold must lie in [0, 1], got {}",
            settings.override_threshold
        );
    }
    if settings.input.trim().is_empty() && !settings.dump_rules {
        bail!("no input model given");
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(version, about = "Joinery - furniture classification for 3D models")]
pub struct CliArgs {
    /// Model file to classify. Wavefront .obj or a .json list of component records.
    #[arg(short, long)]
    input: Option<String>,

    /// Confidence above which a classification replaces the name-based baseline type.
    #[arg(long)]
    threshold: Option<f64>,

    /// Classify components one at a time instead of in parallel.
    #[arg(long)]
    serial: bool,

    /// Show a progress bar while classifying.
    #[arg(long)]
    progress: bool,

    /// Terminal report format.
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,

    /// Write the full JSON report to this path.
    #[arg(short, long)]
    output: Option<String>,

    /// TOML file replacing the built-in rule tables.
    #[arg(long)]
    rules: Option<String>,

    /// Print the active rule tables as TOML and exit.
    #[arg(long)]
    dump_rules: bool,
}

impl CliArgs {
    /// Overrides `settings` with every flag that was given.
    pub fn apply(self, settings: &mut Settings) {
        if let Some(input) = self.input {
            settings.input = input;
        }
        if let Some(threshold) = self.threshold {
            settings.override_threshold = threshold;
        }
        if self.serial {
            settings.parallel = false;
        }
        if self.progress {
            settings.progress = true;
        }
        if let Some(format) = self.format {
            settings.format = format;
        }
        if let Some(output) = self.output {
            settings.output = Some(output);
        }
        if let Some(rules) = self.rules {
            settings.rules = Some(rules);
        }
        if self.dump_rules {
            settings.dump_rules = true;
        }
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settings:
  - Input: {}
  - Override Threshold: {:.2}
  - Parallel: {}
  - Format: {:?}
  - Output: {}
  - Rules: {}
  ",
            self.input,
            self.override_threshold,
            self.parallel,
            self.format,
            self.output.as_deref().unwrap_or("-"),
            self.rules.as_deref().unwrap_or("built-in"),
        )
    }
}
