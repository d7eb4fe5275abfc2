use chrono::{DateTime, Utc};
use rand::RngCore;

use crate::widget::{
    find_by_name, find_kind, random_color, Alarm, Category, Expense, IdGenerator, Note, Position,
    Reminder, Task, Widget, WidgetData, WidgetKind,
};

use super::{parse, CommandError, Intent, Target};

/// Everything a rule handler may look at or draw from while turning one
/// command into an [`Intent`].
pub(super) struct CommandContext<'a> {
    /// The command as the user wrote it.
    pub text: &'a str,
    pub lowered: &'a str,
    pub widgets: &'a [Widget],
    pub now: DateTime<Utc>,
    pub spawn_position: Position,
    pub ids: &'a mut IdGenerator,
    pub rng: &'a mut dyn RngCore,
}

impl<'a> CommandContext<'a> {
    /// Targets the first widget of `kind`, or a new one at the spawn position
    /// if there is none. Also returns the data the targeted widget holds now.
    fn locate(&self, kind: WidgetKind) -> (Target, Option<&'a WidgetData>) {
        match find_kind(self.widgets, kind) {
            Some(widget) => (Target::Existing(widget.id.clone()), Some(&widget.data)),
            None => (Target::Create { kind, position: self.spawn_position }, None),
        }
    }
}

type Handler = fn(&mut CommandContext<'_>) -> Result<Intent, CommandError>;

pub(super) struct Rule {
    /// The rule applies when the lowercased command contains any of these.
    keywords: &'static [&'static str],
    pub handler: Handler,
}

impl Rule {
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|keyword| lowered.contains(keyword))
    }
}

/// The command rules in priority order. Only the first matching rule runs,
/// even if its handler then fails.
pub(super) const RULES: &[Rule] = &[
    Rule { keywords: &["alarm"], handler: set_alarm },
    Rule { keywords: &["task", "todo"], handler: add_task },
    Rule { keywords: &["reminder"], handler: set_reminder },
    Rule { keywords: &["note"], handler: add_note },
    Rule { keywords: &["expense"], handler: add_expense },
];

fn appended<T: Clone>(existing: Option<&[T]>, item: T) -> Vec<T> {
    let mut items = existing.unwrap_or_default().to_vec();
    items.push(item);
    items
}

fn set_alarm(cx: &mut CommandContext<'_>) -> Result<Intent, CommandError> {
    let time = parse::alarm_time(cx.lowered).ok_or(CommandError::UnparseableTime)?;
    let (target, data) = cx.locate(WidgetKind::Alarm);
    let alarm = Alarm { id: cx.ids.next_id(cx.now), time, enabled: true };
    Ok(Intent {
        target,
        data: WidgetData {
            alarms: Some(appended(data.map(WidgetData::alarms), alarm)),
            ..Default::default()
        },
        notice: format!("Alarm set for {time}"),
    })
}

fn add_task(cx: &mut CommandContext<'_>) -> Result<Intent, CommandError> {
    let text = parse::task_text(cx.text).ok_or(CommandError::NoMatch)?;
    let (target, data) = cx.locate(WidgetKind::Todo);
    let task = Task { id: cx.ids.next_id(cx.now), text, completed: false };
    Ok(Intent {
        target,
        data: WidgetData {
            tasks: Some(appended(data.map(WidgetData::tasks), task)),
            ..Default::default()
        },
        notice: "Task added successfully".to_owned(),
    })
}

fn set_reminder(cx: &mut CommandContext<'_>) -> Result<Intent, CommandError> {
    let text = parse::reminder_text(cx.text).ok_or(CommandError::NoMatch)?;
    let (target, data) = cx.locate(WidgetKind::Reminder);
    let reminder = Reminder { id: cx.ids.next_id(cx.now), text, date: cx.now, completed: false };
    Ok(Intent {
        target,
        data: WidgetData {
            reminders: Some(appended(data.map(WidgetData::reminders), reminder)),
            ..Default::default()
        },
        notice: "Reminder added successfully".to_owned(),
    })
}

fn add_note(cx: &mut CommandContext<'_>) -> Result<Intent, CommandError> {
    let text = parse::note_text(cx.text).ok_or(CommandError::NoMatch)?;
    let (target, data) = cx.locate(WidgetKind::Note);
    let note = Note { id: cx.ids.next_id(cx.now), text, created_at: cx.now };
    Ok(Intent {
        target,
        data: WidgetData {
            notes: Some(appended(data.map(WidgetData::notes), note)),
            ..Default::default()
        },
        notice: "Note added successfully".to_owned(),
    })
}

fn add_expense(cx: &mut CommandContext<'_>) -> Result<Intent, CommandError> {
    let parse::ExpenseCommand { amount, category } =
        parse::expense(cx.lowered).ok_or(CommandError::NoMatch)?;
    let (target, data) = cx.locate(WidgetKind::Expense);

    let mut categories = data.map(WidgetData::categories).unwrap_or_default().to_vec();
    let category_id = match find_by_name(&categories, &category) {
        Some(existing) => existing.id.clone(),
        None => {
            let id = cx.ids.next_id(cx.now);
            categories.push(Category {
                id: id.clone(),
                name: category.clone(),
                color: random_color(&mut *cx.rng),
            });
            id
        }
    };

    let expense = Expense {
        id: cx.ids.next_id(cx.now),
        amount,
        description: format!("Voice command: {amount} under {category}"),
        category_id,
        date: cx.now,
    };
    Ok(Intent {
        target,
        data: WidgetData {
            categories: Some(categories),
            expenses: Some(appended(data.map(WidgetData::expenses), expense)),
            ..Default::default()
        },
        notice: format!("Expense of {amount} added under {category}"),
    })
}
