//! Account and format listing.

use anyhow::Result;
use tickgetter_lib::OutputFormat;

use crate::config::Config;

/// Prints the configured accounts without their passwords.
pub(crate) fn list_accounts(config: &Config) -> Result<()> {
    if config.accounts.is_empty() {
        println!("No accounts configured.");
        return Ok(());
    }

    println!("{:<12} {:<24} {:<12} {:<20}", "KEY", "NAME", "LOGIN", "SERVER");
    println!("{}", "-".repeat(70));

    for (key, credentials) in config.accounts.iter() {
        println!(
            "{:<12} {:<24} {:<12} {:<20}",
            key, credentials.name, credentials.login, credentials.server
        );
    }

    println!("\nTotal: {} accounts", config.accounts.len());
    Ok(())
}

/// Prints the supported export format keys and where each one writes.
pub(crate) fn list_formats() -> Result<()> {
    println!("{:<30} {}", "KEY", "OUTPUT");
    println!("{}", "-".repeat(56));
    for format in OutputFormat::all() {
        println!("{}", format_line(*format));
    }
    Ok(())
}

fn format_line(format: OutputFormat) -> String {
    let aliases = format.aliases();
    let keys = if aliases.is_empty() {
        format.to_string()
    } else {
        format!("{format} (aliases: {})", aliases.join(", "))
    };
    let ext = format.extension();
    format!("{keys:<30} ticks_{ext}/*.{ext}")
}
