//! Budget display formatting
//!
//! One table per budgeted month, subtags listed under their tag.

use tabled::{settings::Style, Table, Tabled};

use crate::models::Budget;

#[derive(Tabled)]
struct LimitRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Max Amount")]
    max_amount: String,
}

fn limit_rows(budget: &Budget, currency_symbol: &str) -> Vec<LimitRow> {
    budget
        .tags
        .iter()
        .flat_map(|tag| {
            let head = LimitRow {
                id: tag.id.clone(),
                name: tag.name.clone(),
                max_amount: tag.max_amount.format_with_symbol(currency_symbol),
            };
            let subs = tag.sub_tags.iter().map(move |sub| LimitRow {
                id: format!("{}/{}", tag.id, sub.id),
                name: format!("  └─ {}", sub.name),
                max_amount: sub.max_amount.format_with_symbol(currency_symbol),
            });
            std::iter::once(head).chain(subs)
        })
        .collect()
}

/// Format every budget in chronological order
pub fn format_budget_list(budgets: &[Budget], currency_symbol: &str) -> String {
    if budgets.is_empty() {
        return "No budgets found.\n".to_string();
    }

    let mut sorted: Vec<&Budget> = budgets.iter().collect();
    sorted.sort_by_key(|b| b.period());

    let mut output = String::new();
    for budget in sorted {
        output.push_str(&format!("Budget {}\n", budget.period()));
        if budget.tags.is_empty() {
            output.push_str("  (no tags)\n\n");
            continue;
        }
        let mut table = Table::new(limit_rows(budget, currency_symbol));
        table.with(Style::psql());
        output.push_str(&table.to_string());
        output.push_str("\n\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, SubTag, Tag};

    #[test]
    fn test_empty() {
        assert_eq!(format_budget_list(&[], "$"), "No budgets found.\n");
    }

    #[test]
    fn test_budgets_in_period_order() {
        let june = Budget::new(
            2024,
            6,
            vec![Tag::new("food", "Food", Money::from_cents(30000))
                .with_sub_tags(vec![SubTag::new("dining", "Dining", Money::from_cents(10000))])],
        );
        let may = Budget::new(2024, 5, vec![]);
        let output = format_budget_list(&[june, may], "$");

        assert!(output.find("Budget 2024-05").unwrap() < output.find("Budget 2024-06").unwrap());
        assert!(output.contains("(no tags)"));
        assert!(output.contains("food/dining"));
        assert!(output.contains("$300.00"));
        assert!(output.contains("$100.00"));
    }
}
