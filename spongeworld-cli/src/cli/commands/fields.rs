use clap::Args;
use std::collections::HashSet;

use crate::cli::settings::Settings;
use spongeworld_core::OutputFormat;

#[derive(Args)]
pub struct FieldsArgs {
    /// Include the sample id and configured hidden fields
    #[arg(long)]
    pub all: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub fn run(args: FieldsArgs, settings: &Settings) -> anyhow::Result<()> {
    let store = settings.load_store()?;

    let mut exclude: HashSet<&str> = HashSet::new();
    if !args.all {
        exclude.insert(store.id_field());
        exclude.extend(settings.config.query.exclude_fields.iter().map(String::as_str));
    }
    let fields = store.fields(&exclude);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&fields)?),
        OutputFormat::Text => {
            for field in &fields {
                println!("{}", field);
            }
        }
    }
    Ok(())
}
