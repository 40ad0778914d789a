use clap::Args;
use std::io::Read;
use std::path::PathBuf;

use crate::cli::settings::Settings;
use spongeworld_core::OutputFormat;
use spongeworld_query::{handle_request, StoreGate};

#[derive(Args)]
pub struct RequestArgs {
    /// File holding the JSON request body; stdin when omitted or `-`
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

fn read_body(input: Option<&PathBuf>) -> anyhow::Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body)?;
            Ok(body)
        }
    }
}

pub fn run(args: RequestArgs, settings: &Settings) -> anyhow::Result<()> {
    let body = read_body(args.input.as_ref())?;

    let gate = StoreGate::new();
    gate.load(&settings.abundance, &settings.metadata)?;
    let response = handle_request(&gate, &body, &settings.config.query);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&response)?),
        OutputFormat::Text => {
            println!("{}", response.status);
            println!("{}", response.body);
        }
    }
    Ok(())
}
