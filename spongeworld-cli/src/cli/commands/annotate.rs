use clap::Args;
use colored::*;

use super::QueryArgs;
use crate::cli::output::{empty, section_header, tree_item, tree_list};
use crate::cli::settings::Settings;
use spongeworld_core::OutputFormat;
use spongeworld_query::{annotate, SequenceAnnotations};

#[derive(Args)]
pub struct AnnotateArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Significance cutoff for the binomial test
    #[arg(short, long = "p-value", value_name = "P")]
    pub p_value: Option<f64>,

    /// Summarise this field instead of the configured highlight fields
    /// (repeatable)
    #[arg(short, long = "field", value_name = "FIELD")]
    pub fields: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

fn print_report(report: &SequenceAnnotations) {
    section_header("Sequence Annotations");
    tree_item(false, "Sequence", Some(&report.name));
    tree_item(false, "Taxonomy", Some(&report.taxonomy));
    tree_item(
        true,
        "Present in",
        Some(&format!(
            "{:.6} of samples ({} / {})",
            report.presence_fraction, report.total_observed, report.total_samples
        )),
    );

    if !report.is_observed() {
        println!();
        empty("Sequence not observed in database");
        return;
    }

    for field in &report.fields {
        section_header(&format!(
            "{} ({} significant)",
            field.field,
            field.significant.len()
        ));
        let shares: Vec<String> = field
            .observed_shares
            .iter()
            .filter(|s| s.is_labelled())
            .map(|s| format!("{} {:.1}%", s.label, 100.0 * s.fraction))
            .collect();
        if !shares.is_empty() {
            println!("{} {}", "Observed in:".dimmed(), shares.join(", "));
        }
        tree_list(&field.significant, "No significant enrichment");
    }

    section_header(&format!("ALL ({} significant)", report.all.len()));
    tree_list(&report.all, "No significant enrichment");
}

pub fn run(args: AnnotateArgs, settings: &Settings) -> anyhow::Result<()> {
    let mut config = args.query.apply(&settings.config.query);
    if let Some(p_value) = args.p_value {
        config.p_value_cutoff = p_value;
    }
    if !args.fields.is_empty() {
        config.highlight_fields = args.fields.clone();
    }
    config.validate()?;

    let input = args.query.input()?;
    let store = settings.load_store()?;
    let report = annotate(&store, &input, &config)?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_report(&report),
    }
    Ok(())
}
