use std::fmt;

use serde::{Deserialize, Serialize};

mod category;
mod id;
mod time;

pub use category::{find_by_name, random_color, Category};
pub use id::{IdGenerator, RecordId};
pub use time::{AlarmTime, Meridiem};

use chrono::{DateTime, Utc};

/// Identifies a widget within the host's store.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(pub String);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Alarm,
    Todo,
    Reminder,
    Note,
    Expense,
}

impl WidgetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetKind::Alarm => "alarm",
            WidgetKind::Todo => "todo",
            WidgetKind::Reminder => "reminder",
            WidgetKind::Note => "note",
            WidgetKind::Expense => "expense",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a widget sits on the desktop, in host layout units.
#[derive(Debug, Default, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A single dashboard widget as the host store keeps it.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Widget {
    pub id: WidgetId,
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub data: WidgetData,
}

/// The payload of a widget. Each widget kind uses one or two of the
/// collections; the rest stay `None`.
///
/// The same type doubles as an update patch: a collection that is `Some` in a
/// patch is the full replacement for the stored collection, never a delta.
#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarms: Option<Vec<Alarm>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Task>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminders: Option<Vec<Reminder>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<Note>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expenses: Option<Vec<Expense>>,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Alarm {
    pub id: RecordId,
    pub time: AlarmTime,
    pub enabled: bool,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: RecordId,
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: RecordId,
    pub text: String,
    pub date: DateTime<Utc>,
    pub completed: bool,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: RecordId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: RecordId,
    pub amount: u64,
    pub description: String,
    pub category_id: RecordId,
    pub date: DateTime<Utc>,
}

impl WidgetData {
    /// Applies an update patch. Every collection present in `patch` replaces
    /// the stored one wholesale; absent collections are left as they are.
    pub fn merge(&mut self, patch: WidgetData) {
        let WidgetData { alarms, tasks, reminders, notes, categories, expenses } = patch;
        fn replace<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }
        replace(&mut self.alarms, alarms);
        replace(&mut self.tasks, tasks);
        replace(&mut self.reminders, reminders);
        replace(&mut self.notes, notes);
        replace(&mut self.categories, categories);
        replace(&mut self.expenses, expenses);
    }

    pub fn alarms(&self) -> &[Alarm] {
        self.alarms.as_deref().unwrap_or(&[])
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.as_deref().unwrap_or(&[])
    }

    pub fn reminders(&self) -> &[Reminder] {
        self.reminders.as_deref().unwrap_or(&[])
    }

    pub fn notes(&self) -> &[Note] {
        self.notes.as_deref().unwrap_or(&[])
    }

    pub fn categories(&self) -> &[Category] {
        self.categories.as_deref().unwrap_or(&[])
    }

    pub fn expenses(&self) -> &[Expense] {
        self.expenses.as_deref().unwrap_or(&[])
    }
}

/// Returns the first widget of the given kind, in store order.
pub fn find_kind(widgets: &[Widget], kind: WidgetKind) -> Option<&Widget> {
    widgets.iter().find(|widget| widget.kind == kind)
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn task(id: &str, text: &str) -> Task {
        Task { id: RecordId(id.to_owned()), text: text.to_owned(), completed: false }
    }

    #[test]
    fn merge_replaces_only_present_collections() {
        let mut data = WidgetData {
            tasks: Some(vec![task("1", "old")]),
            notes: Some(Vec::new()),
            ..Default::default()
        };
        data.merge(WidgetData { tasks: Some(vec![task("2", "new")]), ..Default::default() });

        assert_eq!(data.tasks(), &[task("2", "new")]);
        assert_eq!(data.notes, Some(Vec::new()));
        assert_eq!(data.alarms, None);
    }

    #[test]
    fn empty_accessors_for_missing_collections() {
        let data = WidgetData::default();
        assert!(data.alarms().is_empty());
        assert!(data.expenses().is_empty());
    }

    #[test]
    fn widget_serializes_with_host_field_names() {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap();
        let widget = Widget {
            id: WidgetId("note-1".to_owned()),
            kind: WidgetKind::Note,
            position: Position::default(),
            data: WidgetData {
                notes: Some(vec![Note {
                    id: RecordId("1704101400000".to_owned()),
                    text: "buy milk".to_owned(),
                    created_at,
                }]),
                ..Default::default()
            },
        };

        assert_eq!(
            serde_json::to_value(&widget).unwrap(),
            json!({
                "id": "note-1",
                "type": "note",
                "position": { "x": 0.0, "y": 0.0 },
                "data": {
                    "notes": [{
                        "id": "1704101400000",
                        "text": "buy milk",
                        "createdAt": "2024-01-01T09:30:00Z",
                    }],
                },
            })
        );
    }

    #[test]
    fn expense_data_reads_category_id() {
        let data: WidgetData = serde_json::from_value(json!({
            "categories": [{ "id": "c1", "name": "Food", "color": "#00ff00" }],
            "expenses": [{
                "id": "e1",
                "amount": 50,
                "description": "lunch",
                "categoryId": "c1",
                "date": "2024-01-01T12:00:00.000Z",
            }],
        }))
        .unwrap();

        assert_eq!(data.categories()[0].name, "Food");
        assert_eq!(data.expenses()[0].category_id, RecordId("c1".to_owned()));
        assert_eq!(data.expenses()[0].amount, 50);
    }

    #[test]
    fn find_kind_returns_first_match() {
        let widgets = vec![
            Widget {
                id: WidgetId("todo-1".to_owned()),
                kind: WidgetKind::Todo,
                position: Position::default(),
                data: WidgetData::default(),
            },
            Widget {
                id: WidgetId("alarm-2".to_owned()),
                kind: WidgetKind::Alarm,
                position: Position::default(),
                data: WidgetData::default(),
            },
            Widget {
                id: WidgetId("alarm-3".to_owned()),
                kind: WidgetKind::Alarm,
                position: Position::default(),
                data: WidgetData::default(),
            },
        ];

        assert_eq!(find_kind(&widgets, WidgetKind::Alarm).map(|w| &w.id.0[..]), Some("alarm-2"));
        assert!(find_kind(&widgets, WidgetKind::Expense).is_none());
    }
}
