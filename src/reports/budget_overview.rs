//! Budget Overview Report
//!
//! Spent-to-date per tag and subtag for one period, with the usage percentage
//! that drives the progress bar and color tier.
//!
//! A parent tag counts only transactions that carry no subtag; a subtag counts
//! only transactions that name exactly that subtag under its parent.

use std::fmt;

use crate::models::{Money, Period, Transaction};
use crate::storage::Store;

/// Color classification of a usage percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageTier {
    /// Below 50%
    Low,
    /// 50% up to 80%
    Medium,
    /// 80% and above
    High,
}

impl UsageTier {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage < 50.0 {
            Self::Low
        } else if percentage < 80.0 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

impl fmt::Display for UsageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// `spent / max * 100`, or 0 when no limit is set
pub fn usage_percentage(spent: Money, max_amount: Money) -> f64 {
    if max_amount.is_zero() {
        return 0.0;
    }
    spent.cents() as f64 / max_amount.cents() as f64 * 100.0
}

/// Textual bar such as `[###         ]`; the fill is clamped to the width
pub fn progress_bar(percentage: f64, width: usize) -> String {
    let ratio = (percentage / 100.0).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64) as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), " ".repeat(width - filled))
}

/// Usage of a single tag or subtag
#[derive(Debug, Clone, PartialEq)]
pub struct UsageRow {
    pub id: String,
    pub name: String,
    /// Parent tag id when this row is a subtag
    pub parent_id: Option<String>,
    pub spent: Money,
    pub max_amount: Money,
    pub percentage: f64,
}

impl UsageRow {
    fn new(id: &str, name: &str, parent_id: Option<&str>, spent: Money, max_amount: Money) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            parent_id: parent_id.map(String::from),
            spent,
            max_amount,
            percentage: usage_percentage(spent, max_amount),
        }
    }

    pub fn is_subtag(&self) -> bool {
        self.parent_id.is_some()
    }

    pub fn tier(&self) -> UsageTier {
        UsageTier::from_percentage(self.percentage)
    }
}

/// A tag row followed by the rows of its subtags
#[derive(Debug, Clone, PartialEq)]
pub struct TagUsage {
    pub tag: UsageRow,
    pub sub_tags: Vec<UsageRow>,
}

/// Usage for every tag of one period's budget
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetOverviewReport {
    pub period: Period,
    pub groups: Vec<TagUsage>,
}

fn spent_on<'a, I>(transactions: I, tag_id: &str, subtag_id: Option<&str>) -> Money
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.tag_id == tag_id && t.subtag_id.as_deref() == subtag_id)
        .map(|t| t.amount)
        .sum()
}

impl BudgetOverviewReport {
    /// Build the report; a period without a budget yields no groups
    pub fn generate(store: &Store, period: Period) -> Self {
        let transactions = store.get_transactions_by_date(period.year, Some(period.month), None);

        let groups = store
            .get_budget(period.year, period.month)
            .map(|budget| {
                budget
                    .tags
                    .iter()
                    .map(|tag| {
                        let spent = spent_on(transactions.iter().copied(), &tag.id, None);
                        let sub_tags = tag
                            .sub_tags
                            .iter()
                            .map(|sub| {
                                let spent = spent_on(
                                    transactions.iter().copied(),
                                    &tag.id,
                                    Some(&sub.id),
                                );
                                UsageRow::new(&sub.id, &sub.name, Some(&tag.id), spent, sub.max_amount)
                            })
                            .collect();
                        TagUsage {
                            tag: UsageRow::new(&tag.id, &tag.name, None, spent, tag.max_amount),
                            sub_tags,
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self { period, groups }
    }

    pub fn find(&self, tag_id: &str, subtag_id: Option<&str>) -> Option<&UsageRow> {
        let group = self.groups.iter().find(|g| g.tag.id == tag_id)?;
        match subtag_id {
            None => Some(&group.tag),
            Some(sub) => group.sub_tags.iter().find(|r| r.id == sub),
        }
    }

    /// Tag rows with their subtags flattened beneath them
    pub fn rows(&self) -> impl Iterator<Item = &UsageRow> {
        self.groups
            .iter()
            .flat_map(|g| std::iter::once(&g.tag).chain(g.sub_tags.iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewTransaction, SubTag, Tag};
    use tempfile::TempDir;

    fn dollars(amount: i64) -> Money {
        Money::from_cents(amount * 100)
    }

    fn add_txn(store: &mut Store, id: &str, cents: i64, tag: &str, sub: Option<&str>) {
        store
            .add_transaction(NewTransaction {
                id: id.into(),
                year: 2024,
                month: 6,
                day: 15,
                amount: Money::from_cents(cents),
                description: "lunch".into(),
                tag_id: tag.into(),
                subtag_id: sub.map(String::from),
            })
            .unwrap();
    }

    fn setup() -> (TempDir, Store) {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open(temp_dir.path().join("budget_data.json")).unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_tiers() {
        assert_eq!(UsageTier::from_percentage(0.0), UsageTier::Low);
        assert_eq!(UsageTier::from_percentage(49.99), UsageTier::Low);
        assert_eq!(UsageTier::from_percentage(50.0), UsageTier::Medium);
        assert_eq!(UsageTier::from_percentage(79.9), UsageTier::Medium);
        assert_eq!(UsageTier::from_percentage(80.0), UsageTier::High);
        assert_eq!(UsageTier::from_percentage(250.0), UsageTier::High);
    }

    #[test]
    fn test_percentage_zero_limit() {
        assert_eq!(usage_percentage(dollars(10), Money::zero()), 0.0);
        assert_eq!(usage_percentage(dollars(50), dollars(200)), 25.0);
    }

    #[test]
    fn test_progress_bar_clamped() {
        assert_eq!(progress_bar(0.0, 4), "[    ]");
        assert_eq!(progress_bar(50.0, 4), "[##  ]");
        assert_eq!(progress_bar(180.0, 4), "[####]");
        assert_eq!(progress_bar(-20.0, 4), "[    ]");
    }

    #[test]
    fn test_add_then_query() {
        let (_temp, mut store) = setup();
        store.add_budget(2024, 6, vec![]).unwrap();
        store
            .add_tag(2024, 6, "food", "Food", dollars(300), vec![])
            .unwrap();
        add_txn(&mut store, "t1", 4250, "food", None);

        let by_tag = store.get_transactions_by_tag("food", None);
        assert_eq!(by_tag.len(), 1);
        assert_eq!(by_tag[0].id, "t1");

        let report = BudgetOverviewReport::generate(&store, Period::new(2024, 6));
        let row = report.find("food", None).unwrap();
        assert_eq!(row.spent.cents(), 4250);
        assert_eq!(format!("{:.2}", row.percentage), "14.17");
        assert_eq!(row.tier(), UsageTier::Low);
    }

    #[test]
    fn test_subtag_isolation() {
        let (_temp, mut store) = setup();
        store
            .add_budget(
                2024,
                6,
                vec![Tag::new("food", "Food", dollars(300))
                    .with_sub_tags(vec![SubTag::new("dining", "Dining", dollars(100))])],
            )
            .unwrap();
        add_txn(&mut store, "t1", 1000, "food", None);
        add_txn(&mut store, "t2", 2500, "food", Some("dining"));

        let report = BudgetOverviewReport::generate(&store, Period::new(2024, 6));
        assert_eq!(report.find("food", None).unwrap().spent.cents(), 1000);
        assert_eq!(report.find("food", Some("dining")).unwrap().spent.cents(), 2500);
    }

    #[test]
    fn test_other_periods_ignored() {
        let (_temp, mut store) = setup();
        store
            .add_budget(2024, 7, vec![Tag::new("food", "Food", dollars(300))])
            .unwrap();
        add_txn(&mut store, "t1", 1000, "food", None);

        let report = BudgetOverviewReport::generate(&store, Period::new(2024, 7));
        assert!(report.find("food", None).unwrap().spent.is_zero());
    }

    #[test]
    fn test_dangling_tag_yields_nothing() {
        let (_temp, mut store) = setup();
        store
            .add_budget(2024, 6, vec![Tag::new("food", "Food", dollars(300))])
            .unwrap();
        add_txn(&mut store, "t1", 1000, "food", None);
        store.remove_tag(2024, 6, "food").unwrap();

        let report = BudgetOverviewReport::generate(&store, Period::new(2024, 6));
        assert!(report.find("food", None).is_none());
        assert_eq!(report.rows().count(), 0);
        assert!(store.get_transaction("t1").is_some());
    }

    #[test]
    fn test_rows_flatten_subtags_after_parent() {
        let (_temp, mut store) = setup();
        store
            .add_budget(
                2024,
                6,
                vec![
                    Tag::new("food", "Food", dollars(300))
                        .with_sub_tags(vec![SubTag::new("dining", "Dining", dollars(100))]),
                    Tag::new("rent", "Rent", dollars(900)),
                ],
            )
            .unwrap();

        let report = BudgetOverviewReport::generate(&store, Period::new(2024, 6));
        let ids: Vec<&str> = report.rows().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["food", "dining", "rent"]);
    }

    #[test]
    fn test_huge_totals_saturate() {
        let (_temp, mut store) = setup();
        store
            .add_budget(2024, 6, vec![Tag::new("food", "Food", dollars(300))])
            .unwrap();
        let huge = Money::parse("90000000000000000").unwrap();
        add_txn(&mut store, "t1", huge.cents(), "food", None);
        add_txn(&mut store, "t2", huge.cents(), "food", None);

        let report = BudgetOverviewReport::generate(&store, Period::new(2024, 6));
        let food = report.find("food", None).unwrap();
        assert_eq!(food.spent, Money::from_cents(i64::MAX));
        assert_eq!(food.tier(), UsageTier::High);
    }
}
