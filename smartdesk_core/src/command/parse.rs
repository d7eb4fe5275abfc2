//! Extraction of command parameters from free text.

use std::sync::LazyLock;

use regex::Regex;

use crate::widget::{AlarmTime, Meridiem};

static ALARM_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,2})(?::(\d{1,2}))?\s*(am|pm)?").expect("alarm time pattern is valid")
});
static TASK_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)add (a )?task|todo").expect("task pattern is valid"));
static REMINDER_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)set (a )?reminder").expect("reminder pattern is valid"));
static NOTE_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)start taking notes|add (a )?note").expect("note pattern is valid")
});
static EXPENSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)expense of (\d+) under (.+)").expect("expense pattern is valid")
});

/// Finds the first time token in `text`, e.g. `7`, `7pm`, `9:30 pm`, `18:45`.
/// Returns `None` if there is none or it does not form a valid time.
pub(super) fn alarm_time(text: &str) -> Option<AlarmTime> {
    let captures = ALARM_TIME.captures(text)?;
    let hour = captures[1].parse().ok()?;
    let minute = match captures.get(2) {
        Some(minute) => minute.as_str().parse().ok()?,
        None => 0,
    };
    let meridiem = captures.get(3).map(|period| {
        if period.as_str().eq_ignore_ascii_case("pm") {
            Meridiem::Pm
        } else {
            Meridiem::Am
        }
    });
    AlarmTime::from_twelve_hour(hour, minute, meridiem).ok()
}

pub(super) fn task_text(text: &str) -> Option<String> {
    strip_phrase(&TASK_PHRASE, text)
}

pub(super) fn reminder_text(text: &str) -> Option<String> {
    strip_phrase(&REMINDER_PHRASE, text)
}

pub(super) fn note_text(text: &str) -> Option<String> {
    strip_phrase(&NOTE_PHRASE, text)
}

// Removes the first occurrence of the command phrase and trims the rest.
// Nothing left over means there is nothing to record.
fn strip_phrase(phrase: &Regex, text: &str) -> Option<String> {
    let stripped = phrase.replacen(text, 1, "");
    let stripped = stripped.trim();
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_owned())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(super) struct ExpenseCommand {
    pub amount: u64,
    pub category: String,
}

pub(super) fn expense(text: &str) -> Option<ExpenseCommand> {
    let captures = EXPENSE.captures(text)?;
    let amount = captures[1].parse().ok()?;
    let category = captures[2].trim();
    if category.is_empty() {
        return None;
    }
    Some(ExpenseCommand { amount, category: category.to_owned() })
}
