use thiserror::Error;

use crate::widget::{Position, Widget, WidgetData, WidgetId, WidgetKind};

mod memory;

pub use memory::MemoryStore;

/// A partial update for one widget. See [`WidgetData::merge`] for how it is
/// applied.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct WidgetUpdate {
    pub data: WidgetData,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A user-facing notification, shown by the host as a toast.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Error, message: message.into() }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("no widget with id `{0}`")]
    UnknownWidget(WidgetId),
}

/// Defines the operations that the dashboard host (the widget store plus the
/// notification area) offers to command handling.
pub trait WidgetHost {
    /// The widgets currently on the dashboard, in store order.
    fn widgets(&self) -> &[Widget];

    /// Creates an empty widget of the given kind and resolves to its id once
    /// the widget exists. Without a position the host picks one.
    async fn add_widget(
        &mut self,
        kind: WidgetKind,
        position: Option<Position>,
    ) -> Result<WidgetId, HostError>;

    /// Merges `update.data` into the widget's existing data.
    async fn update_widget(&mut self, id: &WidgetId, update: WidgetUpdate)
        -> Result<(), HostError>;

    fn notify(&mut self, notice: Notice);
}
