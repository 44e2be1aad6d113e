//! Transaction editor
//!
//! Add and edit form for a single transaction. Tag and subtag are chosen from
//! the tags defined across all budgets.

use chrono::{Datelike, Local};
use ratatui::Frame;
use tracing::warn;

use super::dialog::Dialog;
use super::form::{
    editor_form_area, parse_date, parse_money, render_editor, required, Form, FormField, Mode,
};
use crate::config::Settings;
use crate::error::{FinmanError, FinmanResult};
use crate::models::{NewTransaction, Transaction};
use crate::storage::{Store, TagChoice, TransactionPatch};
use crate::tui::event::{Input, MouseKind};
use crate::tui::scene::{Context, SceneBehavior, SceneCore};

/// Shown in the subtag field when the transaction has no subtag
pub const NO_SUBTAG: &str = "(none)";

const ID: usize = 0;
const YEAR: usize = 1;
const MONTH: usize = 2;
const DAY: usize = 3;
const AMOUNT: usize = 4;
const DESCRIPTION: usize = 5;
const TAG: usize = 6;
const SUBTAG: usize = 7;

#[derive(Debug)]
pub struct TransactionEditor {
    core: SceneCore,
    mode: Mode,
    form: Form,
    tags: Vec<TagChoice>,
}

impl TransactionEditor {
    /// Empty form dated today with the next free id
    pub fn add(store: &Store) -> Self {
        let today = Local::now().date_naive();
        let tags = store.known_tags();
        let tag_ids: Vec<String> = tags.iter().map(|t| t.id.clone()).collect();

        let form = Form::new(vec![
            FormField::text("ID", store.next_transaction_id()).locked(true),
            FormField::text("Year", today.year().to_string()),
            FormField::text("Month", today.month().to_string()),
            FormField::text("Day", today.day().to_string()),
            FormField::text("Amount", "").placeholder("0.00"),
            FormField::text("Description", "").placeholder("what was it for"),
            FormField::choice("Tag", tag_ids, 0),
            FormField::choice("Subtag", vec![NO_SUBTAG.to_string()], 0),
        ]);

        let mut editor = Self {
            core: SceneCore::new(),
            mode: Mode::Add,
            form,
            tags,
        };
        editor.sync_subtags();
        editor
    }

    /// Form prefilled from `txn`; a tag no budget defines is still offered
    pub fn edit(store: &Store, txn: &Transaction) -> Self {
        let mut tags = store.known_tags();
        match tags.iter_mut().find(|t| t.id == txn.tag_id) {
            Some(choice) => {
                if let Some(sub) = &txn.subtag_id {
                    if !choice.sub_tags.contains(sub) {
                        choice.sub_tags.push(sub.clone());
                    }
                }
            }
            None => tags.push(TagChoice {
                id: txn.tag_id.clone(),
                sub_tags: txn.subtag_id.iter().cloned().collect(),
            }),
        }

        let tag_ids: Vec<String> = tags.iter().map(|t| t.id.clone()).collect();
        let tag_index = tag_ids.iter().position(|t| *t == txn.tag_id).unwrap_or(0);

        let form = Form::new(vec![
            FormField::text("ID", txn.id.clone()).locked(true),
            FormField::text("Year", txn.year.to_string()),
            FormField::text("Month", txn.month.to_string()),
            FormField::text("Day", txn.day.to_string()),
            FormField::text("Amount", txn.amount.to_string()),
            FormField::text("Description", txn.description.clone()),
            FormField::choice("Tag", tag_ids, tag_index),
            FormField::choice(
                "Subtag",
                vec![txn
                    .subtag_id
                    .clone()
                    .unwrap_or_else(|| NO_SUBTAG.to_string())],
                0,
            ),
        ]);

        let mut editor = Self {
            core: SceneCore::new(),
            mode: Mode::Edit,
            form,
            tags,
        };
        editor.sync_subtags();
        editor
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Offer the chosen tag's subtags; hide the field when there are none
    fn sync_subtags(&mut self) {
        let subs: Vec<String> = self
            .tags
            .iter()
            .find(|t| t.id == self.form.value(TAG))
            .map(|t| t.sub_tags.clone())
            .unwrap_or_default();

        let hidden = subs.is_empty();
        let mut options = vec![NO_SUBTAG.to_string()];
        options.extend(subs);
        self.form.set_options(SUBTAG, options);
        self.form.set_hidden(SUBTAG, hidden);
    }

    fn commit(&self, store: &mut Store) -> FinmanResult<()> {
        let (year, month, day) = parse_date(
            self.form.value(YEAR),
            self.form.value(MONTH),
            self.form.value(DAY),
        )?;
        let amount = parse_money("Amount", self.form.value(AMOUNT))?;
        if !amount.is_positive() {
            return Err(FinmanError::Validation(
                "Amount must be greater than zero".into(),
            ));
        }
        let description = required("Description", self.form.value(DESCRIPTION))?.to_string();
        let tag_id = self.form.value(TAG).to_string();
        if tag_id.is_empty() {
            return Err(FinmanError::Validation(
                "Tag is required; add a budget tag first".into(),
            ));
        }
        let subtag_id = match self.form.value(SUBTAG) {
            NO_SUBTAG | "" => None,
            sub => Some(sub.to_string()),
        };
        let id = self.form.value(ID).to_string();

        match self.mode {
            Mode::Add => store.add_transaction(NewTransaction {
                id,
                year,
                month,
                day,
                amount,
                description,
                tag_id,
                subtag_id,
            }),
            Mode::Edit => store.edit_transaction(
                &id,
                TransactionPatch {
                    year: Some(year),
                    month: Some(month),
                    day: Some(day),
                    amount: Some(amount),
                    description: Some(description),
                    tag_id: Some(tag_id),
                    subtag_id: Some(subtag_id),
                },
            ),
        }
    }

    fn save(&mut self, store: &mut Store) {
        match self.commit(store) {
            Ok(()) => self.core.back(),
            Err(err) => {
                warn!(error = %err, "Transaction not saved");
                self.core.push(Dialog::error(&err));
            }
        }
    }
}

impl SceneBehavior for TransactionEditor {
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
                if self.form.handle(input) && self.form.focus() == TAG {
                    self.sync_subtags();
                }
            }
        }
    }

    fn update(&mut self, _ctx: &mut Context<'_>) {}

    fn render(&self, frame: &mut Frame, _settings: &Settings) {
        let title = match self.mode {
            Mode::Add => "Add Transaction",
            Mode::Edit => "Edit Transaction",
        };
        render_editor(frame, title, &self.form);
    }

    fn is_modal(&self) -> bool {
        true
    }
}
