//! Symbol listing.

use anyhow::Result;
use tickgetter_lib::prelude::*;

use crate::config::Config;
use crate::prompt;

/// Logs into an account and prints its symbol paths.
pub(crate) fn list_symbols(config: &Config, account: Option<&str>, search: Option<&str>) -> Result<()> {
    let key = prompt::account_key(&config.accounts, account)?;
    let mut getter = TickGetter::new(ArchiveTerminal::new());
    getter.login_key(&config.accounts, &key)?;

    let needle = search.map(str::to_lowercase);
    let paths: Vec<_> = getter
        .session()
        .symbols()
        .filter(|symbol| {
            needle
                .as_deref()
                .is_none_or(|n| symbol.path.to_lowercase().contains(n))
        })
        .collect();

    println!(
        "{}",
        getter.session().company().unwrap_or("Unknown broker")
    );
    println!("{:<12} {}", "SYMBOL", "PATH");
    println!("{}", "-".repeat(50));
    for symbol in &paths {
        println!("{:<12} {}", symbol.name(), symbol.path);
    }
    println!("\nTotal: {} symbols", paths.len());

    getter.close_connection();
    Ok(())
}
