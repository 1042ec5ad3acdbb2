//! `find`: parse a grocery list and price every item.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use grocer_core::AppConfig;
use grocer_flyer::{FlyerClient, FlyerSearch, ResponseArchive};
use grocer_nutrition::NutritionStore;
use grocer_parser::ListParser;
use grocer_pricing::ListAggregator;

#[derive(Debug, Default)]
pub(crate) struct FindArgs {
    pub postal_code: Option<String>,
    pub list: Option<String>,
    pub file: Option<PathBuf>,
    pub json: bool,
}

/// Runs the full pipeline: parse, enrich, search, resolve, report.
///
/// # Errors
///
/// Returns an error if no postal code or list can be obtained, the list
/// cannot be parsed, or a client cannot be constructed. Per-item search and
/// lookup failures never abort the run.
pub(crate) async fn run_find(config: &AppConfig, args: FindArgs) -> anyhow::Result<()> {
    let postal_code = match non_blank(args.postal_code).or_else(|| config.postal_code.clone()) {
        Some(code) => code,
        None => prompt_line(
            &mut std::io::stdin().lock(),
            &mut std::io::stderr(),
            "Enter your postal code or zip code:",
        )?,
    };
    anyhow::ensure!(!postal_code.is_empty(), "a postal code is required");

    let list = match (non_blank(args.list), args.file) {
        (Some(list), _) => list,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read grocery list from {}", path.display()))?,
        (None, None) => prompt_block(
            &mut std::io::stdin().lock(),
            &mut std::io::stderr(),
            "Enter your grocery list (you can be as detailed as you like), then an empty line:",
        )?,
    };
    anyhow::ensure!(!list.trim().is_empty(), "the grocery list is empty");

    let parser = ListParser::from_config(config).context("failed to build list parser")?;
    let items = parser.parse_list(&list).await?;
    if items.is_empty() {
        println!("No items found in the grocery list.");
        return Ok(());
    }

    let resolver = crate::build_resolver(config)?;
    let nutrition = NutritionStore::open_or_disabled(&config.database_path).await;
    let client = FlyerClient::from_config(config).context("failed to build flyer client")?;
    let mut search = FlyerSearch::new(client, postal_code);
    if config.debug {
        search = search.with_archive(ResponseArchive::new(&config.responses_dir));
    }

    let aggregator = ListAggregator::new(search, nutrition, resolver)
        .with_max_concurrent_items(config.max_concurrent_items);
    let outcome = aggregator.process(items).await;

    crate::print_outcome(&outcome, args.json)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Asks for a single line of input.
fn prompt_line<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> anyhow::Result<String> {
    writeln!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_owned())
}

/// Reads lines until an empty line or end of input.
fn prompt_block<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> anyhow::Result<String> {
    writeln!(out, "{prompt}")?;
    out.flush()?;
    let mut lines = Vec::new();
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}
