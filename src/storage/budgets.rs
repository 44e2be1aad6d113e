//! Budget, tag and subtag operations on the [`Store`]

use tracing::info;

use super::Store;
use crate::error::{FinmanError, FinmanResult};
use crate::models::{Budget, Money, Period, SubTag, Tag};

/// Partial update of a tag; `None` fields are left as they are
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPatch {
    pub name: Option<String>,
    pub max_amount: Option<Money>,
}

/// Partial update of a subtag; `None` fields are left as they are
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubTagPatch {
    pub name: Option<String>,
    pub max_amount: Option<Money>,
}

/// A tag id offered by the editors, with the subtag ids seen under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagChoice {
    pub id: String,
    pub sub_tags: Vec<String>,
}

fn ensure_limit(max_amount: Money) -> FinmanResult<()> {
    if max_amount.is_negative() {
        return Err(FinmanError::Validation(
            "Max amount cannot be negative".into(),
        ));
    }
    Ok(())
}

impl Store {
    pub fn add_budget(&mut self, year: i32, month: u32, tags: Vec<Tag>) -> FinmanResult<()> {
        self.mutate(|doc| {
            if doc.find_budget(year, month).is_some() {
                return Err(FinmanError::duplicate(
                    "Budget",
                    Period::new(year, month).to_string(),
                ));
            }
            doc.budgets.push(Budget::new(year, month, tags));
            Ok(true)
        })?;
        info!(year, month, "Added budget");
        Ok(())
    }

    pub fn add_tag(
        &mut self,
        year: i32,
        month: u32,
        id: &str,
        name: &str,
        max_amount: Money,
        sub_tags: Vec<SubTag>,
    ) -> FinmanResult<()> {
        ensure_limit(max_amount)?;
        self.mutate(|doc| {
            let budget = doc
                .find_budget_mut(year, month)
                .ok_or_else(|| FinmanError::budget_not_found(year, month))?;
            if budget.find_tag(id).is_some() {
                return Err(FinmanError::duplicate("Tag", id));
            }
            budget
                .tags
                .push(Tag::new(id, name, max_amount).with_sub_tags(sub_tags));
            Ok(true)
        })?;
        info!(year, month, tag = id, "Added tag");
        Ok(())
    }

    /// Add a tag, creating the period's budget in the same write when it is
    /// missing. On error neither the budget nor the tag is stored.
    pub fn add_tag_creating_budget(
        &mut self,
        year: i32,
        month: u32,
        id: &str,
        name: &str,
        max_amount: Money,
    ) -> FinmanResult<()> {
        ensure_limit(max_amount)?;
        let mut created = false;
        self.mutate(|doc| {
            if doc.find_budget(year, month).is_none() {
                doc.budgets.push(Budget::new(year, month, Vec::new()));
                created = true;
            }
            let budget = doc
                .find_budget_mut(year, month)
                .ok_or_else(|| FinmanError::budget_not_found(year, month))?;
            if budget.find_tag(id).is_some() {
                return Err(FinmanError::duplicate("Tag", id));
            }
            budget.tags.push(Tag::new(id, name, max_amount));
            Ok(true)
        })?;
        if created {
            info!(year, month, "Added budget");
        }
        info!(year, month, tag = id, "Added tag");
        Ok(())
    }

    pub fn add_subtag(
        &mut self,
        year: i32,
        month: u32,
        parent_tag_id: &str,
        id: &str,
        name: &str,
        max_amount: Money,
    ) -> FinmanResult<()> {
        ensure_limit(max_amount)?;
        self.mutate(|doc| {
            let budget = doc
                .find_budget_mut(year, month)
                .ok_or_else(|| FinmanError::budget_not_found(year, month))?;
            let tag = budget
                .find_tag_mut(parent_tag_id)
                .ok_or_else(|| FinmanError::tag_not_found(parent_tag_id))?;
            if tag.find_subtag(id).is_some() {
                return Err(FinmanError::duplicate(
                    "Subtag",
                    format!("{}/{}", parent_tag_id, id),
                ));
            }
            tag.sub_tags.push(SubTag::new(id, name, max_amount));
            Ok(true)
        })?;
        info!(year, month, tag = parent_tag_id, subtag = id, "Added subtag");
        Ok(())
    }

    /// Remove a budget; a missing period is a no-op
    pub fn remove_budget(&mut self, year: i32, month: u32) -> FinmanResult<()> {
        let removed = self.mutate(|doc| {
            let before = doc.budgets.len();
            doc.budgets.retain(|b| !(b.year == year && b.month == month));
            Ok(doc.budgets.len() != before)
        })?;
        if removed {
            info!(year, month, "Removed budget");
        }
        Ok(())
    }

    /// Remove a tag; transactions referencing it are left as they are
    pub fn remove_tag(&mut self, year: i32, month: u32, tag_id: &str) -> FinmanResult<()> {
        let removed = self.mutate(|doc| {
            let Some(budget) = doc.find_budget_mut(year, month) else {
                return Ok(false);
            };
            let before = budget.tags.len();
            budget.tags.retain(|t| t.id != tag_id);
            Ok(budget.tags.len() != before)
        })?;
        if removed {
            info!(year, month, tag = tag_id, "Removed tag");
        }
        Ok(())
    }

    pub fn remove_subtag(
        &mut self,
        year: i32,
        month: u32,
        parent_tag_id: &str,
        subtag_id: &str,
    ) -> FinmanResult<()> {
        let removed = self.mutate(|doc| {
            let Some(tag) = doc
                .find_budget_mut(year, month)
                .and_then(|b| b.find_tag_mut(parent_tag_id))
            else {
                return Ok(false);
            };
            let before = tag.sub_tags.len();
            tag.sub_tags.retain(|s| s.id != subtag_id);
            Ok(tag.sub_tags.len() != before)
        })?;
        if removed {
            info!(year, month, tag = parent_tag_id, subtag = subtag_id, "Removed subtag");
        }
        Ok(())
    }

    /// Replace the whole tag list of a budget
    pub fn edit_budget(&mut self, year: i32, month: u32, tags: Vec<Tag>) -> FinmanResult<()> {
        self.mutate(|doc| {
            let budget = doc
                .find_budget_mut(year, month)
                .ok_or_else(|| FinmanError::budget_not_found(year, month))?;
            budget.tags = tags;
            Ok(true)
        })?;
        info!(year, month, "Edited budget");
        Ok(())
    }

    pub fn edit_tag(
        &mut self,
        year: i32,
        month: u32,
        tag_id: &str,
        patch: TagPatch,
    ) -> FinmanResult<()> {
        if let Some(max_amount) = patch.max_amount {
            ensure_limit(max_amount)?;
        }
        self.mutate(|doc| {
            let tag = doc
                .find_budget_mut(year, month)
                .ok_or_else(|| FinmanError::budget_not_found(year, month))?
                .find_tag_mut(tag_id)
                .ok_or_else(|| FinmanError::tag_not_found(tag_id))?;
            if let Some(name) = patch.name {
                tag.name = name;
            }
            if let Some(max_amount) = patch.max_amount {
                tag.max_amount = max_amount;
            }
            Ok(true)
        })?;
        info!(year, month, tag = tag_id, "Edited tag");
        Ok(())
    }

    pub fn edit_subtag(
        &mut self,
        year: i32,
        month: u32,
        parent_tag_id: &str,
        subtag_id: &str,
        patch: SubTagPatch,
    ) -> FinmanResult<()> {
        if let Some(max_amount) = patch.max_amount {
            ensure_limit(max_amount)?;
        }
        self.mutate(|doc| {
            let sub = doc
                .find_budget_mut(year, month)
                .ok_or_else(|| FinmanError::budget_not_found(year, month))?
                .find_tag_mut(parent_tag_id)
                .ok_or_else(|| FinmanError::tag_not_found(parent_tag_id))?
                .find_subtag_mut(subtag_id)
                .ok_or_else(|| {
                    FinmanError::subtag_not_found(format!("{}/{}", parent_tag_id, subtag_id))
                })?;
            if let Some(name) = patch.name {
                sub.name = name;
            }
            if let Some(max_amount) = patch.max_amount {
                sub.max_amount = max_amount;
            }
            Ok(true)
        })?;
        info!(year, month, tag = parent_tag_id, subtag = subtag_id, "Edited subtag");
        Ok(())
    }

    pub fn get_budget(&self, year: i32, month: u32) -> Option<&Budget> {
        self.doc.find_budget(year, month)
    }

    pub fn get_all_budgets(&self) -> &[Budget] {
        &self.doc.budgets
    }

    /// Sorted distinct periods that have a budget
    pub fn periods(&self) -> Vec<Period> {
        let mut periods: Vec<Period> = self.doc.budgets.iter().map(Budget::period).collect();
        periods.sort();
        periods.dedup();
        periods
    }

    /// Union of tag ids across all budgets, in first-seen order, each with the
    /// union of its subtag ids
    pub fn known_tags(&self) -> Vec<TagChoice> {
        let mut choices: Vec<TagChoice> = Vec::new();
        for tag in self.doc.budgets.iter().flat_map(|b| b.tags.iter()) {
            let index = match choices.iter().position(|c| c.id == tag.id) {
                Some(index) => index,
                None => {
                    choices.push(TagChoice {
                        id: tag.id.clone(),
                        sub_tags: Vec::new(),
                    });
                    choices.len() - 1
                }
            };
            let choice = &mut choices[index];
            for sub in &tag.sub_tags {
                if !choice.sub_tags.contains(&sub.id) {
                    choice.sub_tags.push(sub.id.clone());
                }
            }
        }
        choices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Store) {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open(temp_dir.path().join("budget_data.json")).unwrap();
        (temp_dir, store)
    }

    fn dollars(amount: i64) -> Money {
        Money::from_cents(amount * 100)
    }

    #[test]
    fn test_duplicate_budget_rejected() {
        let (_temp, mut store) = setup();
        store.add_budget(2024, 6, vec![]).unwrap();

        let err = store.add_budget(2024, 6, vec![]).unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(store.get_all_budgets().len(), 1);
    }

    #[test]
    fn test_add_tag_requires_budget() {
        let (_temp, mut store) = setup();
        let err = store
            .add_tag(2024, 6, "food", "Food", dollars(300), vec![])
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_duplicate_tag_and_subtag() {
        let (temp, mut store) = setup();
        store.add_budget(2024, 6, vec![]).unwrap();
        store
            .add_tag(2024, 6, "food", "Food", dollars(300), vec![])
            .unwrap();
        store
            .add_subtag(2024, 6, "food", "dining", "Dining", dollars(100))
            .unwrap();

        let path = temp.path().join("budget_data.json");
        let before = fs::read(&path).unwrap();

        assert!(store
            .add_tag(2024, 6, "food", "Other", dollars(1), vec![])
            .unwrap_err()
            .is_duplicate());
        assert!(store
            .add_subtag(2024, 6, "food", "dining", "Again", dollars(1))
            .unwrap_err()
            .is_duplicate());
        assert!(store
            .add_subtag(2024, 6, "rent", "x", "X", dollars(1))
            .unwrap_err()
            .is_not_found());

        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_removal_of_missing_keys_is_noop() {
        let (temp, mut store) = setup();
        store.add_budget(2024, 6, vec![]).unwrap();
        store
            .add_tag(2024, 6, "food", "Food", dollars(300), vec![])
            .unwrap();

        let path = temp.path().join("budget_data.json");
        let before = fs::read(&path).unwrap();

        store.remove_budget(2030, 1).unwrap();
        store.remove_tag(2024, 6, "rent").unwrap();
        store.remove_tag(2030, 1, "food").unwrap();
        store.remove_subtag(2024, 6, "food", "dining").unwrap();
        store.remove_subtag(2024, 6, "rent", "dining").unwrap();

        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_remove_tag() {
        let (_temp, mut store) = setup();
        store.add_budget(2024, 6, vec![]).unwrap();
        store
            .add_tag(2024, 6, "food", "Food", dollars(300), vec![])
            .unwrap();

        store.remove_tag(2024, 6, "food").unwrap();
        assert!(store.get_budget(2024, 6).unwrap().tags.is_empty());
    }

    #[test]
    fn test_partial_tag_edit() {
        let (_temp, mut store) = setup();
        store.add_budget(2024, 6, vec![]).unwrap();
        store
            .add_tag(2024, 6, "food", "Food", dollars(300), vec![])
            .unwrap();

        store
            .edit_tag(
                2024,
                6,
                "food",
                TagPatch {
                    name: None,
                    max_amount: Some(dollars(5)),
                },
            )
            .unwrap();

        let tag = store.get_budget(2024, 6).unwrap().find_tag("food").unwrap();
        assert_eq!(tag.name, "Food");
        assert_eq!(tag.max_amount, dollars(5));
    }

    #[test]
    fn test_edit_subtag_missing_chain() {
        let (_temp, mut store) = setup();
        store.add_budget(2024, 6, vec![]).unwrap();

        let err = store
            .edit_subtag(2024, 6, "food", "dining", SubTagPatch::default())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_edit_budget_replaces_tags() {
        let (_temp, mut store) = setup();
        store
            .add_budget(2024, 6, vec![Tag::new("food", "Food", dollars(1))])
            .unwrap();

        store
            .edit_budget(2024, 6, vec![Tag::new("rent", "Rent", dollars(900))])
            .unwrap();

        let budget = store.get_budget(2024, 6).unwrap();
        assert_eq!(budget.tags.len(), 1);
        assert_eq!(budget.tags[0].id, "rent");
        assert!(store.edit_budget(1999, 1, vec![]).unwrap_err().is_not_found());
    }

    #[test]
    fn test_negative_limit_rejected() {
        let (_temp, mut store) = setup();
        store.add_budget(2024, 6, vec![]).unwrap();

        let err = store
            .add_tag(2024, 6, "food", "Food", Money::from_cents(-1), vec![])
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let (temp, mut store) = setup();
        store.add_budget(2024, 7, vec![]).unwrap();
        store.add_budget(2024, 6, vec![]).unwrap();
        store
            .add_tag(2024, 6, "rent", "Rent", dollars(900), vec![])
            .unwrap();
        store
            .add_tag(2024, 6, "food", "Food", dollars(300), vec![])
            .unwrap();

        let reloaded = Store::open(temp.path().join("budget_data.json")).unwrap();
        assert_eq!(reloaded.document(), store.document());
        assert_eq!(reloaded.get_all_budgets()[0].month, 7);
        assert_eq!(reloaded.get_budget(2024, 6).unwrap().tags[1].id, "food");
    }

    #[test]
    fn test_periods_sorted_and_distinct() {
        let (_temp, mut store) = setup();
        store.add_budget(2024, 7, vec![]).unwrap();
        store.add_budget(2023, 12, vec![]).unwrap();
        store.add_budget(2024, 1, vec![]).unwrap();

        assert_eq!(
            store.periods(),
            vec![
                Period::new(2023, 12),
                Period::new(2024, 1),
                Period::new(2024, 7)
            ]
        );
    }

    #[test]
    fn test_known_tags_union() {
        let (_temp, mut store) = setup();
        store
            .add_budget(
                2024,
                6,
                vec![
                    Tag::new("food", "Food", dollars(1))
                        .with_sub_tags(vec![SubTag::new("dining", "Dining", dollars(1))]),
                    Tag::new("rent", "Rent", dollars(1)),
                ],
            )
            .unwrap();
        store
            .add_budget(
                2024,
                7,
                vec![Tag::new("food", "Food", dollars(1))
                    .with_sub_tags(vec![SubTag::new("groceries", "Groceries", dollars(1))])],
            )
            .unwrap();

        let tags = store.known_tags();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].id, "food");
        assert_eq!(tags[0].sub_tags, vec!["dining", "groceries"]);
        assert_eq!(tags[1].id, "rent");
    }

    #[test]
    fn test_add_tag_creating_budget() {
        let (_temp, mut store) = setup();
        store
            .add_tag_creating_budget(2024, 7, "gas", "Gas", dollars(80))
            .unwrap();
        let budget = store.get_budget(2024, 7).unwrap();
        assert_eq!(budget.tags.len(), 1);

        // existing budget is reused
        store
            .add_tag_creating_budget(2024, 7, "car", "Car", dollars(50))
            .unwrap();
        assert_eq!(store.get_all_budgets().len(), 1);
        assert_eq!(store.get_budget(2024, 7).unwrap().tags.len(), 2);

        let err = store
            .add_tag_creating_budget(2024, 7, "gas", "Gas", dollars(1))
            .unwrap_err();
        assert!(err.is_duplicate());
    }

    #[test]
    fn test_add_tag_creating_budget_failure_leaves_no_budget() {
        let (temp, mut store) = setup();
        // a directory in the temp file's place makes the write fail
        fs::create_dir(temp.path().join("budget_data.json.tmp")).unwrap();

        let err = store
            .add_tag_creating_budget(2024, 7, "gas", "Gas", dollars(80))
            .unwrap_err();
        assert!(matches!(err, FinmanError::Storage(_)));
        assert!(store.get_budget(2024, 7).is_none());
        assert!(!temp.path().join("budget_data.json").exists());
    }
}
