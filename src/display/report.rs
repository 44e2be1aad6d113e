//! Report formatting for terminal output

use tabled::{settings::Style, Table, Tabled};

use crate::reports::{progress_bar, BudgetOverviewReport, UsageRow};

#[derive(Tabled)]
struct OverviewRow {
    #[tabled(rename = "Tag")]
    name: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Usage")]
    bar: String,
    #[tabled(rename = "%")]
    percentage: String,
}

impl OverviewRow {
    fn new(row: &UsageRow, currency_symbol: &str, bar_width: usize) -> Self {
        let name = if row.is_subtag() {
            format!("  └─ {}", row.name)
        } else {
            row.name.clone()
        };
        Self {
            name,
            spent: row.spent.format_with_symbol(currency_symbol),
            limit: row.max_amount.format_with_symbol(currency_symbol),
            bar: progress_bar(row.percentage, bar_width),
            percentage: format_percentage(row.percentage),
        }
    }
}

/// Percentage with two decimals, as the overview shows it
pub fn format_percentage(pct: f64) -> String {
    format!("{:.2}%", pct)
}

/// Format the overview of one period as a table
pub fn format_overview(
    report: &BudgetOverviewReport,
    currency_symbol: &str,
    bar_width: usize,
) -> String {
    let mut output = format!("Budget Overview - {}\n", report.period);

    if report.groups.is_empty() {
        output.push_str("No budget for this period.\n");
        return output;
    }

    let rows = report
        .rows()
        .map(|row| OverviewRow::new(row, currency_symbol, bar_width));
    let mut table = Table::new(rows);
    table.with(Style::psql());
    output.push_str(&table.to_string());
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewTransaction, Period, Tag};
    use crate::storage::Store;
    use tempfile::TempDir;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(14.166), "14.17%");
        assert_eq!(format_percentage(0.0), "0.00%");
    }

    #[test]
    fn test_overview_table() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::open(temp.path().join("budget_data.json")).unwrap();
        store
            .add_budget(2024, 6, vec![Tag::new("food", "Food", Money::from_cents(30000))])
            .unwrap();
        store
            .add_transaction(NewTransaction {
                id: "txn_001".into(),
                year: 2024,
                month: 6,
                day: 1,
                amount: Money::from_cents(4250),
                description: "Groceries".into(),
                tag_id: "food".into(),
                subtag_id: None,
            })
            .unwrap();

        let report = BudgetOverviewReport::generate(&store, Period::new(2024, 6));
        let output = format_overview(&report, "$", 10);
        assert!(output.starts_with("Budget Overview - 2024-06"));
        assert!(output.contains("$42.50"));
        assert!(output.contains("$300.00"));
        assert!(output.contains("14.17%"));
        assert!(output.contains("[#         ]"));
    }

    #[test]
    fn test_overview_without_budget() {
        let temp = TempDir::new().unwrap();
        let store = Store::open(temp.path().join("budget_data.json")).unwrap();
        let report = BudgetOverviewReport::generate(&store, Period::new(2030, 1));
        assert!(format_overview(&report, "$", 4).contains("No budget for this period."));
    }
}
