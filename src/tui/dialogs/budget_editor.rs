//! Budget editor
//!
//! One form for tags and subtags. In edit mode the fields that identify the
//! entry (period, ids, parent) are locked and only name and limit change.

use ratatui::Frame;
use tracing::warn;

use super::dialog::Dialog;
use super::form::{
    editor_form_area, parse_id, parse_limit, parse_period, render_editor, required, Form,
    FormField, Mode,
};
use crate::config::Settings;
use crate::error::FinmanResult;
use crate::models::{Period, SubTag, Tag};
use crate::storage::{Store, SubTagPatch, TagPatch};
use crate::tui::event::{Input, MouseKind};
use crate::tui::scene::{Context, SceneBehavior, SceneCore};

/// What the editor creates or changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetTarget {
    Tag,
    SubTag,
}

const YEAR: usize = 0;
const MONTH: usize = 1;
// Tag layout
const TAG_ID: usize = 2;
const TAG_NAME: usize = 3;
const TAG_MAX: usize = 4;
// Subtag layout
const PARENT: usize = 2;
const SUB_ID: usize = 3;
const SUB_NAME: usize = 4;
const SUB_MAX: usize = 5;

#[derive(Debug)]
pub struct BudgetEditor {
    core: SceneCore,
    mode: Mode,
    target: BudgetTarget,
    form: Form,
    /// Period whose tags fill the parent choice
    parents_for: Option<Period>,
}

fn period_fields(period: Period, locked: bool) -> [FormField; 2] {
    [
        FormField::text("Year", period.year.to_string()).locked(locked),
        FormField::text("Month", period.month.to_string()).locked(locked),
    ]
}

impl BudgetEditor {
    fn build(mode: Mode, target: BudgetTarget, fields: Vec<FormField>) -> Self {
        Self {
            core: SceneCore::new(),
            mode,
            target,
            form: Form::new(fields),
            parents_for: None,
        }
    }

    /// New tag; the period defaults to the one being viewed, else this month
    pub fn add_tag(period: Option<Period>) -> Self {
        let period = period.unwrap_or_else(Period::current);
        let mut fields = Vec::from(period_fields(period, false));
        fields.extend([
            FormField::text("Tag ID", "").placeholder("food"),
            FormField::text("Name", "").placeholder("Food"),
            FormField::text("Max Amount", "").placeholder("0.00"),
        ]);
        Self::build(Mode::Add, BudgetTarget::Tag, fields)
    }

    /// New subtag under one of the period's tags, `parent` preselected
    pub fn add_subtag(store: &Store, period: Option<Period>, parent: Option<&str>) -> Self {
        let period = period.unwrap_or_else(Period::current);
        let mut fields = Vec::from(period_fields(period, false));
        fields.extend([
            FormField::choice("Parent Tag", Vec::new(), 0),
            FormField::text("Subtag ID", "").placeholder("dining"),
            FormField::text("Name", "").placeholder("Dining"),
            FormField::text("Max Amount", "").placeholder("0.00"),
        ]);
        let mut editor = Self::build(Mode::Add, BudgetTarget::SubTag, fields);
        editor.sync_parents(store);
        if let Some(parent) = parent {
            editor.form.select_option(PARENT, parent);
        }
        editor
    }

    pub fn edit_tag(period: Period, tag: &Tag) -> Self {
        let mut fields = Vec::from(period_fields(period, true));
        fields.extend([
            FormField::text("Tag ID", tag.id.clone()).locked(true),
            FormField::text("Name", tag.name.clone()),
            FormField::text("Max Amount", tag.max_amount.to_string()),
        ]);
        Self::build(Mode::Edit, BudgetTarget::Tag, fields)
    }

    pub fn edit_subtag(period: Period, parent_id: &str, sub: &SubTag) -> Self {
        let mut fields = Vec::from(period_fields(period, true));
        fields.extend([
            FormField::choice("Parent Tag", vec![parent_id.to_string()], 0).locked(true),
            FormField::text("Subtag ID", sub.id.clone()).locked(true),
            FormField::text("Name", sub.name.clone()),
            FormField::text("Max Amount", sub.max_amount.to_string()),
        ]);
        Self::build(Mode::Edit, BudgetTarget::SubTag, fields)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn target(&self) -> BudgetTarget {
        self.target
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Refill the parent choice whenever the typed period changes
    fn sync_parents(&mut self, store: &Store) {
        if self.target != BudgetTarget::SubTag || self.mode != Mode::Add {
            return;
        }
        let period = parse_period(self.form.value(YEAR), self.form.value(MONTH))
            .ok()
            .map(|(year, month)| Period::new(year, month));
        if period == self.parents_for {
            return;
        }
        self.parents_for = period;

        let parents: Vec<String> = period
            .and_then(|p| store.get_budget(p.year, p.month))
            .map(|b| b.tags.iter().map(|t| t.id.clone()).collect())
            .unwrap_or_default();
        self.form.set_options(PARENT, parents);
    }

    fn commit(&self, store: &mut Store) -> FinmanResult<()> {
        let (year, month) = parse_period(self.form.value(YEAR), self.form.value(MONTH))?;

        match self.target {
            BudgetTarget::Tag => {
                let id = parse_id("Tag ID", self.form.value(TAG_ID))?;
                let name = required("Name", self.form.value(TAG_NAME))?.to_string();
                let max_amount = parse_limit("Max Amount", self.form.value(TAG_MAX))?;
                match self.mode {
                    Mode::Add => {
                        store.add_tag_creating_budget(year, month, &id, &name, max_amount)
                    }
                    Mode::Edit => store.edit_tag(
                        year,
                        month,
                        &id,
                        TagPatch {
                            name: Some(name),
                            max_amount: Some(max_amount),
                        },
                    ),
                }
            }
            BudgetTarget::SubTag => {
                let parent = required("Parent Tag", self.form.value(PARENT))?.to_string();
                let id = parse_id("Subtag ID", self.form.value(SUB_ID))?;
                let name = required("Name", self.form.value(SUB_NAME))?.to_string();
                let max_amount = parse_limit("Max Amount", self.form.value(SUB_MAX))?;
                match self.mode {
                    Mode::Add => store.add_subtag(year, month, &parent, &id, &name, max_amount),
                    Mode::Edit => store.edit_subtag(
                        year,
                        month,
                        &parent,
                        &id,
                        SubTagPatch {
                            name: Some(name),
                            max_amount: Some(max_amount),
                        },
                    ),
                }
            }
        }
    }

    fn save(&mut self, store: &mut Store) {
        match self.commit(store) {
            Ok(()) => self.core.back(),
            Err(err) => {
                warn!(error = %err, "Budget entry not saved");
                self.core.push(Dialog::error(&err));
            }
        }
    }
}

impl SceneBehavior for BudgetEditor {
    fn core(&self) -> &SceneCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SceneCore {
        &mut self.core
    }

    fn handle_input(&mut self, input: Input, ctx: &mut Context<'_>) {
        match input {
            Input::Enter => self.save(ctx.store),
            Input::Esc => self.core.back(),
            Input::Mouse {
                row,
                kind: MouseKind::Click | MouseKind::DoubleClick,
                ..
            } => {
                if let Some(index) = self.form.field_at(editor_form_area(ctx.area), row) {
                    self.form.focus_on(index);
                }
            }
            _ => {
                self.form.handle(input);
            }
        }
    }

    fn update(&mut self, ctx: &mut Context<'_>) {
        self.sync_parents(ctx.store);
    }

    fn render(&self, frame: &mut Frame, _settings: &Settings) {
        let title = match (self.mode, self.target) {
            (Mode::Add, BudgetTarget::Tag) => "Add Tag",
            (Mode::Add, BudgetTarget::SubTag) => "Add Subtag",
            (Mode::Edit, BudgetTarget::Tag) => "Edit Tag",
            (Mode::Edit, BudgetTarget::SubTag) => "Edit Subtag",
        };
        render_editor(frame, title, &self.form);
    }

    fn is_modal(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn store(temp: &tempfile::TempDir) -> Store {
        let mut store = Store::open(temp.path().join("budget_data.json")).unwrap();
        store
            .add_budget(
                2024,
                6,
                vec![
                    Tag::new("food", "Food", Money::from_cents(30000)),
                    Tag::new("rent", "Rent", Money::from_cents(120000)),
                ],
            )
            .unwrap();
        store
    }

    #[test]
    fn test_add_tag_creates_missing_budget() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut store = store(&temp);
        let mut editor = BudgetEditor::add_tag(Some(Period::new(2024, 7)));
        assert_eq!(editor.form().focus(), YEAR);
        editor.form.set_text(TAG_ID, "gas");
        editor.form.set_text(TAG_NAME, "Gas");
        editor.form.set_text(TAG_MAX, "80");

        editor.commit(&mut store).unwrap();
        let budget = store.get_budget(2024, 7).unwrap();
        assert_eq!(budget.tags.len(), 1);
        assert_eq!(budget.tags[0].max_amount.cents(), 8000);
    }

    #[test]
    fn test_add_duplicate_tag_is_reported() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut store = store(&temp);
        let mut editor = BudgetEditor::add_tag(Some(Period::new(2024, 6)));
        editor.form.set_text(TAG_ID, "food");
        editor.form.set_text(TAG_NAME, "Food again");
        editor.form.set_text(TAG_MAX, "10");

        assert!(editor.commit(&mut store).unwrap_err().is_duplicate());
    }

    #[test]
    fn test_add_subtag_parent_choices() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut store = store(&temp);
        let mut editor = BudgetEditor::add_subtag(&store, Some(Period::new(2024, 6)), Some("rent"));
        assert_eq!(editor.form().value(PARENT), "rent");

        editor.form.set_text(SUB_ID, "deposit");
        editor.form.set_text(SUB_NAME, "Deposit");
        editor.form.set_text(SUB_MAX, "500");
        editor.commit(&mut store).unwrap();

        let rent = store.get_budget(2024, 6).unwrap().find_tag("rent").unwrap();
        assert_eq!(rent.sub_tags[0].id, "deposit");
    }

    #[test]
    fn test_subtag_without_parent_is_invalid() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut store = store(&temp);
        let mut editor = BudgetEditor::add_subtag(&store, Some(Period::new(2030, 1)), None);
        assert!(editor.form().options(PARENT).is_empty());
        editor.form.set_text(SUB_ID, "x");
        editor.form.set_text(SUB_NAME, "X");
        editor.form.set_text(SUB_MAX, "1");

        assert!(editor.commit(&mut store).unwrap_err().is_validation());
        assert!(store.get_budget(2030, 1).is_none());
    }

    #[test]
    fn test_parent_choices_follow_period() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = store(&temp);
        let mut editor = BudgetEditor::add_subtag(&store, Some(Period::new(2030, 1)), None);
        assert!(editor.form().options(PARENT).is_empty());

        editor.form.set_text(YEAR, "2024");
        editor.form.set_text(MONTH, "6");
        editor.sync_parents(&store);
        assert_eq!(editor.form().options(PARENT), ["food", "rent"]);
    }

    #[test]
    fn test_edit_tag_locks_identity_and_patches() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut store = store(&temp);
        let tag = store.get_budget(2024, 6).unwrap().tags[0].clone();
        let mut editor = BudgetEditor::edit_tag(Period::new(2024, 6), &tag);

        assert_eq!(editor.form().focus(), TAG_NAME);
        assert!(!editor.form.focus_on(TAG_ID));
        editor.form.set_text(TAG_MAX, "350");
        editor.commit(&mut store).unwrap();

        let food = store.get_budget(2024, 6).unwrap().find_tag("food").unwrap();
        assert_eq!(food.name, "Food");
        assert_eq!(food.max_amount.cents(), 35000);
    }

    #[test]
    fn test_negative_limit_rejected() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut store = store(&temp);
        let mut editor = BudgetEditor::add_tag(Some(Period::new(2024, 6)));
        editor.form.set_text(TAG_ID, "misc");
        editor.form.set_text(TAG_NAME, "Misc");
        editor.form.set_text(TAG_MAX, "-5");

        assert!(editor.commit(&mut store).unwrap_err().is_validation());
    }
}
