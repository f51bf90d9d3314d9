//! Fetch command implementation.
//!
//! Logs into an account, downloads ticks symbol by symbol and writes one
//! file per symbol under `<output_dir>/ticks_<format>/`.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tickgetter_lib::prelude::*;

use crate::config::Config;
use crate::prompt;

/// Arguments of the fetch command.
pub(crate) struct FetchArgs {
    pub(crate) symbols: Vec<String>,
    pub(crate) account: Option<String>,
    pub(crate) from: Option<String>,
    pub(crate) to: Option<String>,
    pub(crate) format: Option<String>,
    pub(crate) output_dir: Option<PathBuf>,
    pub(crate) quiet: bool,
}

/// Fetch ticks and save them.
pub(crate) fn fetch(config: &Config, args: FetchArgs) -> Result<()> {
    let range = prompt::date_range(args.from.as_deref(), args.to.as_deref())?;
    let format_key = args.format.as_deref().unwrap_or(&config.export.format);
    let output_dir = args
        .output_dir
        .unwrap_or_else(|| config.export.output_dir.clone());
    // Unknown formats fail before anything is downloaded
    let dispatcher = ExportDispatcher::from_key(output_dir, format_key)?;

    let key = prompt::account_key(&config.accounts, args.account.as_deref())?;
    let mut getter = TickGetter::new(ArchiveTerminal::new()).with_range(range);
    getter
        .login_key(&config.accounts, &key)
        .with_context(|| format!("Login to account '{key}' failed"))?;

    let available = getter
        .session()
        .symbols()
        .map(|symbol| symbol.name().to_string())
        .collect();
    let symbols = prompt::symbols(args.symbols, available)?;

    let progress = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(symbols.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} symbols {msg}",
            )?
            .progress_chars("=>-"),
        );
        pb.set_message(range.to_string());
        pb
    };

    let summary = getter.get_ticks_with(&symbols, |outcome| {
        progress.set_message(outcome.symbol().to_string());
        progress.inc(1);
    })?;
    progress.set_length(summary.requested as u64);
    progress.finish_with_message(format!(
        "{} ticks from {} of {} symbols",
        summary.ticks, summary.fetched, summary.requested
    ));

    if !args.quiet {
        print_summary(&summary);
    }

    let paths = getter.export(&dispatcher)?;
    getter.close_connection();

    if !args.quiet {
        for path in &paths {
            println!("Saved: {}", path.display());
        }
    }
    Ok(())
}

fn print_summary(summary: &FetchSummary) {
    if !summary.rejected.is_empty() {
        println!("Unknown symbols: {}", summary.rejected.join(", "));
    }
    if !summary.not_found.is_empty() {
        println!("No ticks for: {}", summary.not_found.join(", "));
    }
    for (symbol, status) in &summary.skipped {
        println!("Skipped {symbol}: {status}");
    }
}
