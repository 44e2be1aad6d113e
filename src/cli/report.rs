//! Report CLI commands

use clap::Args;

use crate::config::Settings;
use crate::display::format_overview;
use crate::error::FinmanResult;
use crate::models::Period;
use crate::reports::BudgetOverviewReport;
use crate::storage::Store;

/// Period selection for the `overview` command
#[derive(Args, Debug, Default)]
pub struct OverviewArgs {
    /// Budget year (defaults to the current month's year)
    #[arg(short, long, requires = "month")]
    pub year: Option<i32>,

    /// Budget month, 1-12
    #[arg(short, long, requires = "year", value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,
}

impl OverviewArgs {
    pub fn period(&self) -> Period {
        match (self.year, self.month) {
            (Some(year), Some(month)) => Period::new(year, month),
            _ => Period::current(),
        }
    }
}

/// Handle the `overview` command
pub fn handle_overview_command(
    store: &Store,
    settings: &Settings,
    args: OverviewArgs,
) -> FinmanResult<()> {
    let report = BudgetOverviewReport::generate(store, args.period());
    print!(
        "{}",
        format_overview(
            &report,
            &settings.currency_symbol,
            settings.progress_bar_width
        )
    );
    Ok(())
}
