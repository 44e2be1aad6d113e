//! Field list shared by the editors
//!
//! A [`Form`] is an ordered list of labelled fields with one focused field.
//! Tab and Shift+Tab move the focus, skipping fields that are locked or
//! hidden; Up and Down cycle choice fields; everything else edits text.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::str::FromStr;

use crate::error::{FinmanError, FinmanResult};
use crate::models::Money;
use crate::tui::event::Input;
use crate::tui::keybindings::{hint_line, KeyContext};
use crate::tui::layout::{form_area, inner};
use crate::tui::palette::Palette;
use crate::tui::widgets::TextInput;

/// Whether an editor creates a new entity or changes an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Add,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text(TextInput),
    /// Enumerated value cycled with Up/Down
    Choice { options: Vec<String>, index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub kind: FieldKind,
    /// Shown but not editable
    pub locked: bool,
    /// Neither shown nor focusable
    pub hidden: bool,
}

impl FormField {
    pub fn text(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            kind: FieldKind::Text(TextInput::new().content(value)),
            locked: false,
            hidden: false,
        }
    }

    pub fn choice(label: &'static str, options: Vec<String>, index: usize) -> Self {
        Self {
            label,
            kind: FieldKind::Choice { options, index },
            locked: false,
            hidden: false,
        }
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        if let FieldKind::Text(input) = &mut self.kind {
            input.placeholder = placeholder.to_string();
        }
        self
    }

    fn focusable(&self) -> bool {
        !self.locked && !self.hidden
    }

    /// Current text, or the chosen option
    pub fn value(&self) -> &str {
        match &self.kind {
            FieldKind::Text(input) => input.value(),
            FieldKind::Choice { options, index } => {
                options.get(*index).map(String::as_str).unwrap_or("")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    fields: Vec<FormField>,
    focus: usize,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        let focus = fields.iter().position(FormField::focusable).unwrap_or(0);
        Self { fields, focus }
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(FormField::value).unwrap_or("")
    }

    pub fn set_text(&mut self, index: usize, value: impl Into<String>) {
        if let Some(FieldKind::Text(input)) = self.fields.get_mut(index).map(|f| &mut f.kind) {
            input.set(value);
        }
    }

    /// Replace a choice field's options, keeping the chosen value when it is
    /// still offered
    pub fn set_options(&mut self, index: usize, new_options: Vec<String>) {
        let Some(field) = self.fields.get_mut(index) else {
            return;
        };
        if let FieldKind::Choice { options, index: chosen } = &mut field.kind {
            let current = options.get(*chosen).cloned();
            *chosen = current
                .and_then(|c| new_options.iter().position(|o| *o == c))
                .unwrap_or(0);
            *options = new_options;
        }
    }

    /// Choose `value` in a choice field if it is offered
    pub fn select_option(&mut self, index: usize, value: &str) -> bool {
        let Some(field) = self.fields.get_mut(index) else {
            return false;
        };
        if let FieldKind::Choice { options, index: chosen } = &mut field.kind {
            if let Some(position) = options.iter().position(|o| o == value) {
                *chosen = position;
                return true;
            }
        }
        false
    }

    pub fn options(&self, index: usize) -> &[String] {
        match self.fields.get(index).map(|f| &f.kind) {
            Some(FieldKind::Choice { options, .. }) => options,
            _ => &[],
        }
    }

    pub fn set_hidden(&mut self, index: usize, hidden: bool) {
        if let Some(field) = self.fields.get_mut(index) {
            field.hidden = hidden;
        }
        if self.focus == index && hidden {
            self.focus_next();
        }
    }

    /// Move focus to `index` if that field takes focus
    pub fn focus_on(&mut self, index: usize) -> bool {
        match self.fields.get(index) {
            Some(field) if field.focusable() => {
                self.focus = index;
                true
            }
            _ => false,
        }
    }

    pub fn focus_next(&mut self) {
        let len = self.fields.len();
        for step in 1..=len {
            let index = (self.focus + step) % len;
            if self.fields[index].focusable() {
                self.focus = index;
                return;
            }
        }
    }

    pub fn focus_prev(&mut self) {
        let len = self.fields.len();
        for step in 1..=len {
            let index = (self.focus + len - step) % len;
            if self.fields[index].focusable() {
                self.focus = index;
                return;
            }
        }
    }

    /// Apply a key to the form. Returns true when a choice value changed,
    /// so editors can refresh dependent fields.
    pub fn handle(&mut self, input: Input) -> bool {
        match input {
            Input::Tab => self.focus_next(),
            Input::BackTab => self.focus_prev(),
            _ => {
                let Some(field) = self.fields.get_mut(self.focus) else {
                    return false;
                };
                if !field.focusable() {
                    return false;
                }
                match &mut field.kind {
                    FieldKind::Choice { options, index } if !options.is_empty() => {
                        let len = options.len();
                        match input {
                            Input::Up => *index = (*index + len - 1) % len,
                            Input::Down => *index = (*index + 1) % len,
                            _ => return false,
                        }
                        return true;
                    }
                    FieldKind::Choice { .. } => {}
                    FieldKind::Text(text) => {
                        text.handle(input);
                    }
                }
            }
        }
        false
    }

    /// Field index drawn on screen row `row`, given the area passed to `render`
    pub fn field_at(&self, area: Rect, row: u16) -> Option<usize> {
        let offset = row.checked_sub(area.y)? as usize;
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.hidden)
            .nth(offset)
            .map(|(index, _)| index)
    }

    /// One line per visible field: a right-aligned label then the value
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .fields
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.hidden)
            .map(|(index, field)| {
                let focused = index == self.focus;
                let label_style = if focused {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Cyan)
                };

                let mut spans = vec![Span::styled(format!("{:>12}: ", field.label), label_style)];
                match &field.kind {
                    _ if field.locked => {
                        spans.push(Span::styled(field.value().to_string(), Palette::Muted.style()))
                    }
                    FieldKind::Text(input) => spans.extend(input.spans(focused)),
                    FieldKind::Choice { options, .. } if options.is_empty() => {
                        spans.push(Span::styled("(none available)", Palette::Muted.style()))
                    }
                    FieldKind::Choice { .. } if focused => spans.push(Span::styled(
                        format!("< {} >", field.value()),
                        Palette::Selection.style(),
                    )),
                    FieldKind::Choice { .. } => spans.push(Span::styled(
                        field.value().to_string(),
                        Style::default().fg(Color::Yellow),
                    )),
                }
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }
}

/// Rows of the editor popup that hold the form, for a terminal of size `area`
pub fn editor_form_area(area: Rect) -> Rect {
    let body = inner(form_area(area));
    Rect::new(
        body.x + 1,
        body.y + 1,
        body.width.saturating_sub(2),
        body.height.saturating_sub(3),
    )
}

/// Popup frame, fields and key hints shared by both editors
pub fn render_editor(frame: &mut Frame, title: &str, form: &Form) {
    let popup = form_area(frame.area());
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(Palette::Title.style())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, popup);

    form.render(frame, editor_form_area(frame.area()));

    let body = inner(popup);
    if body.height > 0 {
        let hints = Rect::new(
            body.x + 1,
            body.y + body.height - 1,
            body.width.saturating_sub(2),
            1,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                hint_line(&[KeyContext::Editor]),
                Palette::Muted.style(),
            )),
            hints,
        );
    }
}

/// Trimmed value, rejecting blanks
pub fn required<'a>(label: &str, value: &'a str) -> FinmanResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FinmanError::Validation(format!("{} is required", label)));
    }
    Ok(value)
}

/// Whole number field
pub fn parse_number<T: FromStr>(label: &str, value: &str) -> FinmanResult<T> {
    required(label, value)?
        .parse()
        .map_err(|_| FinmanError::Validation(format!("{} must be a whole number", label)))
}

pub fn parse_money(label: &str, value: &str) -> FinmanResult<Money> {
    Money::parse(required(label, value)?)
        .map_err(|_| FinmanError::Validation(format!("{} must be a number like 12.34", label)))
}

/// Budget limit: a non-negative amount
pub fn parse_limit(label: &str, value: &str) -> FinmanResult<Money> {
    let amount = parse_money(label, value)?;
    if amount.is_negative() {
        return Err(FinmanError::Validation(format!("{} cannot be negative", label)));
    }
    Ok(amount)
}

/// Year and month with the month in 1-12
pub fn parse_period(year: &str, month: &str) -> FinmanResult<(i32, u32)> {
    let year: i32 = parse_number("Year", year)?;
    let month: u32 = parse_number("Month", month)?;
    if !(1..=12).contains(&month) {
        return Err(FinmanError::Validation("Month must be between 1 and 12".into()));
    }
    Ok((year, month))
}

/// Year, month and a day in 1-31; the day is not checked against the month
pub fn parse_date(year: &str, month: &str, day: &str) -> FinmanResult<(i32, u32, u32)> {
    let (year, month) = parse_period(year, month)?;
    let day: u32 = parse_number("Day", day)?;
    if !(1..=31).contains(&day) {
        return Err(FinmanError::Validation("Day must be between 1 and 31".into()));
    }
    Ok((year, month, day))
}

/// Identifier usable in a `tag/subtag` path
pub fn parse_id(label: &str, value: &str) -> FinmanResult<String> {
    let value = required(label, value)?;
    if value.contains('/') || value.contains('#') || value.contains(char::is_whitespace) {
        return Err(FinmanError::Validation(format!(
            "{} cannot contain spaces, '/' or '#'",
            label
        )));
    }
    Ok(value.to_string())
}
