use anyhow::{Context, Result};
use clap::Parser;
use indicatif::HumanCount;
use log::{debug, info};
use methylome::{parse_region, ModType};
use std::io;

use regmeth::{
    argparser::Args,
    data::MethylationTable,
    data_load::load_table,
    processing::{aggregate, TARGET_MOD_TYPE},
    report::{render, OutputMode},
};

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let region = parse_region(&args.region)?;
    debug!(
        "Region {} covers 0-based [{}, {})",
        region, region.start, region.end
    );

    info!("Loading bedMethyl file: {}", args.input);
    let table = load_table(&args.input)
        .with_context(|| format!("Error loading bedMethyl from path: '{}'", args.input))?;
    log_table_overview(&table);

    let result = aggregate(&table, &region)?;

    let mode = if args.simple {
        OutputMode::Simple
    } else {
        OutputMode::Full {
            verbose: args.verbose,
        }
    };
    render(&result, mode, &mut io::stdout().lock(), &mut io::stderr().lock())
        .context("Failed to write report")?;

    Ok(())
}

fn log_table_overview(table: &MethylationTable) {
    info!("Loaded {} total positions", HumanCount(table.len() as u64));
    info!(
        "Found {} 5mC positions",
        HumanCount(table.count_mod_type(TARGET_MOD_TYPE) as u64)
    );

    let mut counts: Vec<(String, usize)> = table.mod_type_counts().into_iter().collect();
    counts.sort();
    for (code, n) in counts {
        let label = ModType::from_str(&code)
            .map(|m| m.to_string())
            .unwrap_or(code);
        info!("  {}: {}", label, HumanCount(n as u64));
    }
}
