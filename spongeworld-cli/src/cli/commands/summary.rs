use clap::Args;

use crate::cli::output::{section_header, warning, MetricTable};
use crate::cli::settings::Settings;
use spongeworld_core::OutputFormat;

#[derive(Args)]
pub struct SummaryArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub fn run(args: SummaryArgs, settings: &Settings) -> anyhow::Result<()> {
    let store = settings.load_store()?;
    let summary = store.summary();

    if args.format.is_machine_readable() {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    section_header("Dataset Summary");
    let mut table = MetricTable::new("Dataset");
    table.add_metric("Samples", summary.samples);
    table.add_metric("Features", summary.features);
    table.add_metric("Sequence length", summary.seq_length);
    table.add_metric("Non-zero entries", summary.nonzero_entries);
    table.add_metric("Metadata fields", summary.fields.len());
    println!("{}", table.render());

    if summary.dropped_unmatched > 0 {
        warning(&format!(
            "{} samples without metadata were left out",
            summary.dropped_unmatched
        ));
    }
    if summary.dropped_empty > 0 {
        warning(&format!(
            "{} samples without reads were left out",
            summary.dropped_empty
        ));
    }
    Ok(())
}
