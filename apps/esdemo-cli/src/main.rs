//! esdemo - configure an Elasticsearch client and exercise it.

mod cli;
mod demos;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use esdemo_client::{RequestOptions, SearchClient};
use esdemo_core::config::Config;

use cli::{Cli, Commands};
use demos::{FuzzyParams, HighlightParams};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    let settings = config.settings()?;
    let client = SearchClient::new(&settings.elasticsearch).context("creating search client")?;
    let options = RequestOptions::from_settings(&settings.request).context("building request options")?;
    let index = cli.index.clone().unwrap_or_else(|| settings.demo.index.clone());

    match &cli.command {
        Commands::Ping => {
            demos::health_check(&client, &options)?;
        }
        Commands::Index => {
            demos::index_user(&client, &options, &index)?;
        }
        Commands::Get { id } => {
            let id = id.as_deref().unwrap_or(&settings.demo.document_id);
            demos::fetch_by_id(&client, &options, &index, id)?;
        }
        Commands::Fuzzy(args) => {
            let params = FuzzyParams {
                field: args.field.clone(),
                text: args.text.clone(),
                fuzziness: args.fuzziness,
                prefix_length: args.prefix_length,
                max_expansions: args.max_expansions,
            };
            demos::fuzzy_search(&client, &options, &index, &params)?;
        }
        Commands::Highlight(args) => {
            let params = HighlightParams {
                field: args.field.clone(),
                text: args.text.clone(),
                from: args.from,
                size: args.size,
            };
            demos::highlight_search(&client, &options, &index, &params)?;
        }
        Commands::Seed => {
            demos::seed_sample(&client, &options, &index)?;
        }
        Commands::All => {
            demos::health_check(&client, &options)?;
            let written = demos::index_user(&client, &options, &index)?;
            demos::seed_sample(&client, &options, &index)?;
            demos::fetch_by_id(&client, &options, &index, &written.id)?;
            demos::fuzzy_search(&client, &options, &index, &FuzzyParams::default())?;
            demos::highlight_search(&client, &options, &index, &HighlightParams::default())?;
        }
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn,esdemo=info",
        1 => "info,esdemo=debug,esdemo_client=debug",
        _ => "debug",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
