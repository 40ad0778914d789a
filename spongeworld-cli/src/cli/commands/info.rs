use clap::Args;
use serde::Serialize;

use super::{into_input, QueryArgs};
use crate::cli::settings::Settings;
use spongeworld_core::{QueryResult, SequenceInput};
use spongeworld_query::{sequence_info, sequence_info_batch, QueryOptions};

#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Restrict the breakdown to this field (repeatable)
    #[arg(short, long = "field", value_name = "FIELD")]
    pub fields: Vec<String>,

    /// Query every sequence on its own, in parallel
    #[arg(long)]
    pub separately: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Serialize)]
struct SeparateAnswer {
    sequence: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<QueryResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

pub fn run(args: InfoArgs, settings: &Settings) -> anyhow::Result<()> {
    let config = args.query.apply(&settings.config.query);
    let mut options = QueryOptions::from_config(&config);
    if !args.fields.is_empty() {
        options = options.with_fields(args.fields.clone());
    }

    let sequences = args.query.sequences()?;
    let store = settings.load_store()?;

    if args.separately {
        let queries: Vec<SequenceInput> = sequences.iter().map(|s| s.as_str().into()).collect();
        let answers: Vec<SeparateAnswer> = sequence_info_batch(&store, &queries, &options)
            .into_iter()
            .zip(sequences)
            .map(|(result, sequence)| match result {
                Ok(result) => SeparateAnswer { sequence, result: Some(result), error: None },
                Err(e) => SeparateAnswer { sequence, result: None, error: Some(e.to_string()) },
            })
            .collect();
        return print_json(&answers, args.pretty);
    }

    let result = sequence_info(&store, &into_input(sequences), &options)?;
    print_json(&result, args.pretty)
}
