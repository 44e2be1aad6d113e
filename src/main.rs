use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use finman::cli::{
    handle_budgets_command, handle_overview_command, handle_transactions_command, OverviewArgs,
    TransactionsArgs,
};
use finman::config::{logging::init_logging, FinmanPaths, Settings};
use finman::storage::Store;

#[derive(Parser)]
#[command(
    name = "finman",
    version,
    about = "Terminal-based monthly budgeting and transaction tracker",
    long_about = "Finman keeps monthly budgets with per-tag spending limits and \
                  tracks transactions against them, either in an interactive \
                  terminal interface or through plain table output."
)]
struct Cli {
    /// Budget document to open instead of the one in the data directory
    #[arg(long, global = true, env = "FINMAN_DATA_FILE", value_name = "PATH")]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI (the default)
    #[command(alias = "ui")]
    Tui,

    /// List transactions
    #[command(alias = "txn")]
    Transactions(TransactionsArgs),

    /// List every budget with its tag and subtag limits
    Budgets,

    /// Show spending against each limit for one month
    Overview(OverviewArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths, logging and settings
    let paths = FinmanPaths::new()?;
    paths.ensure_directories()?;
    init_logging(&paths)?;

    let settings = Settings::load_or_create(&paths)?;
    if !paths.settings_file().exists() {
        settings.save(&paths)?;
    }

    let data_file = cli.data_file.unwrap_or_else(|| paths.data_file());

    if let Some(Commands::Config) = cli.command {
        println!("Finman Configuration");
        println!("====================");
        println!("Data directory: {}", paths.base_dir().display());
        println!("Data file:      {}", data_file.display());
        println!("Settings file:  {}", paths.settings_file().display());
        println!("Log file:       {}", paths.log_file().display());
        println!();
        println!("Settings:");
        println!("  Tick rate:          {} ms", settings.tick_rate_ms);
        println!("  Currency symbol:    {}", settings.currency_symbol);
        println!("  Progress bar width: {}", settings.progress_bar_width);
        println!("  Mouse enabled:      {}", settings.mouse_enabled);
        return Ok(());
    }

    let store = Store::open(&data_file)
        .with_context(|| format!("Failed to open {}", data_file.display()))?;
    info!(path = %data_file.display(), "Opened budget document");

    match cli.command {
        None | Some(Commands::Tui) => finman::tui::run_tui(store, settings)?,
        Some(Commands::Transactions(args)) => {
            handle_transactions_command(&store, &settings, args)?;
        }
        Some(Commands::Budgets) => handle_budgets_command(&store, &settings)?,
        Some(Commands::Overview(args)) => handle_overview_command(&store, &settings, args)?,
        Some(Commands::Config) => {}
    }

    Ok(())
}
