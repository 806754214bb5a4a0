use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use deck_quota::fetch::{CachedSource, FileStore, KeyValueStore, MemoryStore, StaticSource, TableBuilder};
use deck_quota::rules::RuleFile;
use deck_quota::select::Selector;
use deck_quota::table::{self, AttributeTable};
use deck_quota::{report, AttributeKey, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod args;
use args::{Cli, Commands};

/// Exit status when a selection leaves minimums unmet.
const EXIT_UNSATISFIED: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_UNSATISFIED),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Returns `Ok(false)` when the run completed but did not satisfy its rules.
fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Build {
            cards,
            tags,
            types,
            catalog,
            cache,
            delay_ms,
            output,
        } => {
            let builder = TableBuilder::new(read_list(&tags)?, read_list(&types)?)
                .with_delay(Duration::from_millis(delay_ms));
            let cards = read_list(&cards)?;
            let source = StaticSource::load(&catalog)?;

            match cache {
                Some(path) => {
                    let store = FileStore::open(&path)?;
                    let store = handle_build(&builder, &cards, source, store, output.as_deref())?;
                    store.close()?;
                }
                None => {
                    handle_build(&builder, &cards, source, MemoryStore::new(), output.as_deref())?;
                }
            }
            Ok(true)
        }
        Commands::Count { table, attrs } => {
            let table = table::io::load(&table)?;
            handle_count(&table, attrs)?;
            Ok(true)
        }
        Commands::Select {
            table,
            rules,
            shuffle,
            trace,
            json,
        } => {
            let table = table::io::load(&table)?;
            handle_select(table, &rules, shuffle, trace, json)
        }
    }
}

fn handle_build<K: KeyValueStore>(
    builder: &TableBuilder,
    cards: &[String],
    source: StaticSource,
    store: K,
    output: Option<&Path>,
) -> Result<K> {
    let mut cached = CachedSource::new(source, store);
    let outcome = builder.build(cards, &mut cached);

    for failure in &outcome.failures {
        eprintln!("Error {}: {}", failure.card, failure.error);
    }
    info!(
        rows = outcome.table.len(),
        failed = outcome.failures.len(),
        duplicates = outcome.duplicates.len(),
        "table built"
    );

    match output {
        Some(path) => {
            table::io::save(path, &outcome.table, &outcome.columns)?;
            eprintln!("Table written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            table::io::write_tsv(&outcome.table, &outcome.columns, stdout.lock())?;
        }
    }

    let (_, store) = cached.into_parts();
    Ok(store)
}

fn handle_count(table: &AttributeTable, attrs: Vec<String>) -> Result<()> {
    let keys: Vec<AttributeKey> = if attrs.is_empty() {
        table.attributes()
    } else {
        attrs.into_iter().map(AttributeKey::from).collect()
    };
    let counts = table.count(&keys);

    let stdout = io::stdout();
    report::write_counts("Attribute tally", &counts, stdout.lock())?;
    Ok(())
}

fn handle_select(
    table: AttributeTable,
    rules_path: &Path,
    shuffle: Option<u64>,
    trace: bool,
    json: bool,
) -> Result<bool> {
    let file = RuleFile::load(rules_path)?;
    let rules = file.to_rule_set()?;

    let table = match shuffle {
        Some(seed) => table.shuffled(seed),
        None => table,
    };

    let config = file.selector.clone().with_trace(trace || json);
    let result = Selector::with_config(&rules, config).select(&table);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &result)?;
        writeln!(out)?;
    } else {
        report::write_deck_list(&result, &mut out)?;
        writeln!(out)?;
        writeln!(out, "Tally:")?;
        report::write_tally(&result, &rules, &mut out)?;
        if trace {
            writeln!(out)?;
            writeln!(out, "Trace:")?;
            report::write_trace(&result, &mut out)?;
        }
        writeln!(out)?;
        report::write_summary(&result, &mut out)?;
    }

    Ok(result.is_satisfied())
}

/// Non-blank, trimmed lines of a file.
fn read_list(path: &Path) -> Result<Vec<String>> {
    let file = io::BufReader::new(std::fs::File::open(path)?);
    let mut out = Vec::new();
    for line in file.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            out.push(line.to_owned());
        }
    }
    Ok(out)
}
