use anyhow::Result;
use tracing_subscriber::EnvFilter;

use joinery::batch::{analyze_batch, BatchOptions};
use joinery::classifier::Classifier;
use joinery::enrich::enrich;
use joinery::geom::load_components;
use joinery::output;
use joinery::rules::Rules;
use joinery::settings::{self, ReportFormat};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let settings = settings::load_config()?;

    let custom_rules = settings.rules.as_ref().map(Rules::from_file).transpose()?;
    let rules: &Rules = match &custom_rules {
        Some(rules) => rules,
        None => Rules::builtin(),
    };

    if settings.dump_rules {
        return output::dump_rules(rules);
    }

    let components = load_components(&settings.input)?;
    let classifier = Classifier::new(rules);
    let options = BatchOptions {
        parallel: settings.parallel,
        progress: settings.progress,
    };

    let report = analyze_batch(&classifier, &components, &options);
    let quote = enrich(&components, &report, rules, settings.override_threshold);

    match settings.format {
        ReportFormat::Text => output::print_summary(&report, &quote),
        ReportFormat::Json => println!("{}", output::report_json(&settings.input, &report, &quote)?),
    }

    if let Some(path) = &settings.output {
        output::write_report(path, &settings.input, &report, &quote)?;
    }

    Ok(())
}
