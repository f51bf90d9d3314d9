//! tickgetter CLI - Download raw ticks from a trading terminal and export them.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod logging;
mod prompt;

use config::Config;

#[derive(Parser)]
#[command(name = "tickgetter")]
#[command(about = "Download raw ticks from a trading terminal and export them to files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file. Defaults to the user config directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured accounts
    Accounts,

    /// List supported export formats
    Formats,

    /// Log into an account and list its symbols
    Symbols {
        /// Account key from the config file (prompted if omitted)
        #[arg(short, long)]
        account: Option<String>,

        /// Only show symbols whose path contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Fetch ticks for symbols and save one file per symbol
    Fetch {
        /// Symbols to fetch (prompted if omitted)
        symbols: Vec<String>,

        /// Account key from the config file (prompted if omitted)
        #[arg(short, long)]
        account: Option<String>,

        /// Start date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End date, exclusive (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Export format key (csv, json, html, xml, xlsx, parquet; run `formats` for aliases)
        #[arg(short, long)]
        format: Option<String>,

        /// Directory the ticks_<format> folder is created in
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = Config::load(cli.config.as_deref())?;
    let log_path = logging::init(&config.logging, cli.verbose)?;
    tracing::debug!(path = %log_path.display(), "logging to file");

    match command {
        Commands::Accounts => commands::accounts::list_accounts(&config),
        Commands::Formats => commands::accounts::list_formats(),
        Commands::Symbols { account, search } => {
            commands::symbols::list_symbols(&config, account.as_deref(), search.as_deref())
        }
        Commands::Fetch {
            symbols,
            account,
            from,
            to,
            format,
            output_dir,
        } => commands::fetch::fetch(
            &config,
            commands::fetch::FetchArgs {
                symbols,
                account,
                from,
                to,
                format,
                output_dir,
                quiet: cli.quiet,
            },
        ),
    }
}
