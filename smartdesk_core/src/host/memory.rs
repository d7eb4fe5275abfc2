use crate::widget::{Position, Widget, WidgetData, WidgetId, WidgetKind};

use super::{HostError, Notice, WidgetHost, WidgetUpdate};

/// A widget store that keeps everything in memory. Records every notice it
/// receives so that callers can display or inspect them afterwards.
#[derive(Debug, Default)]
pub struct MemoryStore {
    manifest: StoreManifest,
    widgets: Vec<Widget>,
    notices: Vec<Notice>,
}

#[derive(Debug)]
struct StoreManifest {
    /// The number used in the id of the next widget.
    next_widget_number: u64,
}

impl Default for StoreManifest {
    fn default() -> Self {
        StoreManifest { next_widget_number: 1 }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Creates a store holding the given widgets. Newly added widgets are
    /// numbered after them.
    pub fn with_widgets(widgets: Vec<Widget>) -> Self {
        let next_widget_number = widgets.len() as u64 + 1;
        MemoryStore { manifest: StoreManifest { next_widget_number }, widgets, notices: Vec::new() }
    }

    // Returns a `WidgetId` of the form `{kind}-{n}` that no stored widget
    // has, and marks the number as used. Numbers taken by seeded widgets are
    // skipped. Panics right before the number space is exhausted.
    fn gen_unique_widget_id(&mut self, kind: WidgetKind) -> WidgetId {
        loop {
            let number = self.manifest.next_widget_number;
            self.manifest.next_widget_number = number.checked_add(1).unwrap();
            let id = WidgetId(format!("{kind}-{number}"));
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    pub fn find(&self, kind: WidgetKind) -> Option<&Widget> {
        crate::widget::find_kind(&self.widgets, kind)
    }

    pub fn get(&self, id: &WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|widget| &widget.id == id)
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Removes and returns all notices received so far.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn into_widgets(self) -> Vec<Widget> {
        self.widgets
    }
}

impl WidgetHost for MemoryStore {
    fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    async fn add_widget(
        &mut self,
        kind: WidgetKind,
        position: Option<Position>,
    ) -> Result<WidgetId, HostError> {
        let id = self.gen_unique_widget_id(kind);
        self.widgets.push(Widget {
            id: id.clone(),
            kind,
            position: position.unwrap_or_default(),
            data: WidgetData::default(),
        });
        tracing::debug!(%id, "added widget");
        Ok(id)
    }

    async fn update_widget(
        &mut self,
        id: &WidgetId,
        update: WidgetUpdate,
    ) -> Result<(), HostError> {
        let widget = self
            .widgets
            .iter_mut()
            .find(|widget| &widget.id == id)
            .ok_or_else(|| HostError::UnknownWidget(id.clone()))?;
        widget.data.merge(update.data);
        Ok(())
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

#[cfg(test)]
mod test {
    use crate::widget::{RecordId, Task};

    use super::*;

    #[tokio::test]
    async fn added_widgets_are_numbered_per_store() {
        let mut store = MemoryStore::new();
        let first = store.add_widget(WidgetKind::Alarm, None).await.unwrap();
        let second = store
            .add_widget(WidgetKind::Todo, Some(Position { x: 10.0, y: 20.0 }))
            .await
            .unwrap();

        assert_eq!(first, WidgetId("alarm-1".to_owned()));
        assert_eq!(second, WidgetId("todo-2".to_owned()));
        assert_eq!(store.get(&second).unwrap().position, Position { x: 10.0, y: 20.0 });
        assert_eq!(store.find(WidgetKind::Alarm).unwrap().id, first);
    }

    #[tokio::test]
    async fn numbering_continues_after_seeded_widgets() {
        let mut store = MemoryStore::with_widgets(vec![Widget {
            id: WidgetId("note-1".to_owned()),
            kind: WidgetKind::Note,
            position: Position::default(),
            data: WidgetData::default(),
        }]);
        let id = store.add_widget(WidgetKind::Note, None).await.unwrap();
        assert_eq!(id, WidgetId("note-2".to_owned()));
    }

    #[tokio::test]
    async fn seeded_ids_are_never_handed_out_again() {
        let mut store = MemoryStore::with_widgets(vec![Widget {
            id: WidgetId("alarm-2".to_owned()),
            kind: WidgetKind::Alarm,
            position: Position::default(),
            data: WidgetData::default(),
        }]);
        let first = store.add_widget(WidgetKind::Alarm, None).await.unwrap();
        let second = store.add_widget(WidgetKind::Alarm, None).await.unwrap();

        assert_eq!(first, WidgetId("alarm-3".to_owned()));
        assert_eq!(second, WidgetId("alarm-4".to_owned()));
        let widgets = store.into_widgets();
        let ids: Vec<&str> = widgets.iter().map(|widget| widget.id.0.as_str()).collect();
        assert_eq!(ids, vec!["alarm-2", "alarm-3", "alarm-4"]);
    }

    #[tokio::test]
    async fn update_merges_into_existing_data() {
        let mut store = MemoryStore::new();
        let id = store.add_widget(WidgetKind::Todo, None).await.unwrap();
        let task = Task { id: RecordId("1".to_owned()), text: "water plants".to_owned(), completed: false };
        store
            .update_widget(&id, WidgetUpdate {
                data: WidgetData { tasks: Some(vec![task.clone()]), ..Default::default() },
            })
            .await
            .unwrap();

        assert_eq!(store.get(&id).unwrap().data.tasks(), &[task]);
    }

    #[tokio::test]
    async fn update_of_missing_widget_fails() {
        let mut store = MemoryStore::new();
        let missing = WidgetId("alarm-9".to_owned());
        assert_eq!(
            store.update_widget(&missing, WidgetUpdate::default()).await,
            Err(HostError::UnknownWidget(missing))
        );
    }

    #[test]
    fn notices_are_drained() {
        let mut store = MemoryStore::new();
        store.notify(Notice::success("done"));
        assert_eq!(store.notices(), &[Notice::success("done")]);
        assert_eq!(store.drain_notices(), vec![Notice::success("done")]);
        assert!(store.notices().is_empty());
    }
}
