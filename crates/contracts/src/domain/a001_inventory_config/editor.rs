//! Transient state of the ordered list editor widget.
//!
//! The widget itself only renders; every gesture goes through
//! [`ListEditorState`], which decides whether a callback must fire.
//! Invalid input (blank rename, blank add, delete of a system row) is
//! silently dropped.

use chrono::{DateTime, Utc};

use super::ordering::{rename_at, reorder, sorted_by_order, OrderedEntry};

/// What the widget has to report to its owner
#[derive(Debug, Clone, PartialEq)]
pub enum EditorOutcome<T> {
    /// `onUpdate(index, entry)`
    Update { index: usize, entry: T },
    /// `onReorder(collection)` with re-stamped orders
    Reorder(Vec<T>),
    /// `onDelete(index)`
    Delete(usize),
    /// `onAddNewItem()` with the trimmed text
    Add(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEditorState {
    editing: Option<usize>,
    draft: String,
    new_item: String,
}

impl ListEditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editing_index(&self) -> Option<usize> {
        self.editing
    }

    pub fn is_editing(&self, index: usize) -> bool {
        self.editing == Some(index)
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn new_item(&self) -> &str {
        &self.new_item
    }

    /// Only one row is editable; starting another edit drops the previous draft.
    pub fn begin_edit(&mut self, index: usize, current_name: &str) {
        self.editing = Some(index);
        self.draft = current_name.to_string();
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.draft.clear();
    }

    /// Closes the edit row; yields an update only for a non-blank draft.
    pub fn commit_edit<T: OrderedEntry>(
        &mut self,
        sorted: &[T],
        now: DateTime<Utc>,
    ) -> Option<EditorOutcome<T>> {
        let index = self.editing.take()?;
        let draft = std::mem::take(&mut self.draft);
        let entry = rename_at(sorted, index, &draft, now)?;
        Some(EditorOutcome::Update { index, entry })
    }

    /// Enter commits, Escape cancels, other keys are ignored
    pub fn handle_edit_key<T: OrderedEntry>(
        &mut self,
        key: &str,
        sorted: &[T],
        now: DateTime<Utc>,
    ) -> Option<EditorOutcome<T>> {
        match key {
            "Enter" => self.commit_edit(sorted, now),
            "Escape" => {
                self.cancel_edit();
                None
            }
            _ => None,
        }
    }

    pub fn set_new_item(&mut self, text: impl Into<String>) {
        self.new_item = text.into();
    }

    /// Forwards the trimmed text and clears the field; blank input is a no-op.
    pub fn submit_new_item<T>(&mut self) -> Option<EditorOutcome<T>> {
        let trimmed = self.new_item.trim();
        if trimmed.is_empty() {
            return None;
        }
        let name = trimmed.to_string();
        self.new_item.clear();
        Some(EditorOutcome::Add(name))
    }

    /// Drop of a dragged row. An edit in progress is abandoned because row
    /// indices change under it.
    pub fn drop_item<T: OrderedEntry>(
        &mut self,
        sorted: &[T],
        from: usize,
        to: usize,
        now: DateTime<Utc>,
    ) -> Option<EditorOutcome<T>> {
        let reordered = reorder(sorted, from, to, now)?;
        self.cancel_edit();
        Some(EditorOutcome::Reorder(reordered))
    }

    /// Keyboard move (Alt+Arrow): one step up or down
    pub fn move_by<T: OrderedEntry>(
        &mut self,
        sorted: &[T],
        index: usize,
        delta: isize,
        now: DateTime<Utc>,
    ) -> Option<EditorOutcome<T>> {
        let target = index.checked_add_signed(delta)?;
        self.drop_item(sorted, index, target, now)
    }

    pub fn request_delete<T: OrderedEntry>(
        &mut self,
        sorted: &[T],
        index: usize,
    ) -> Option<EditorOutcome<T>> {
        let entry = sorted_by_order(sorted).get(index)?.clone();
        if !Self::can_delete(&entry) {
            return None;
        }
        self.cancel_edit();
        Some(EditorOutcome::Delete(index))
    }

    /// The delete control is rendered only when this is true
    pub fn can_delete<T: OrderedEntry>(entry: &T) -> bool {
        !entry.is_system()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_inventory_config::ConfigEntry;

    fn entries() -> Vec<ConfigEntry> {
        let now = Utc::now();
        vec![
            ConfigEntry::system("sys", "พร้อมใช้งาน", 1, now),
            ConfigEntry::new("ส่งซ่อม", 2, now),
            ConfigEntry::new("รอตรวจสอบ", 3, now),
        ]
    }

    #[test]
    fn test_enter_commits_trimmed_name() {
        let list = entries();
        let mut state = ListEditorState::new();
        state.begin_edit(1, &list[1].name);
        state.set_draft("  ส่งซ่อมภายนอก ");
        let outcome = state.handle_edit_key("Enter", &list, Utc::now());
        match outcome {
            Some(EditorOutcome::Update { index, entry }) => {
                assert_eq!(index, 1);
                assert_eq!(entry.name, "ส่งซ่อมภายนอก");
                assert_eq!(entry.id, list[1].id);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(state.editing_index(), None);
    }

    #[test]
    fn test_blank_rename_closes_without_update() {
        let list = entries();
        let mut state = ListEditorState::new();
        state.begin_edit(2, &list[2].name);
        state.set_draft("   ");
        assert_eq!(state.commit_edit(&list, Utc::now()), None);
        assert_eq!(state.editing_index(), None);
        assert_eq!(state.draft(), "");
    }

    #[test]
    fn test_escape_cancels() {
        let list = entries();
        let mut state = ListEditorState::new();
        state.begin_edit(1, &list[1].name);
        state.set_draft("อื่น");
        assert_eq!(state.handle_edit_key("Escape", &list, Utc::now()), None);
        assert_eq!(state.editing_index(), None);
        // ignored keys keep the row open
        state.begin_edit(1, &list[1].name);
        assert_eq!(state.handle_edit_key("a", &list, Utc::now()), None);
        assert!(state.is_editing(1));
    }

    #[test]
    fn test_switching_rows_abandons_previous_draft() {
        let list = entries();
        let mut state = ListEditorState::new();
        state.begin_edit(1, &list[1].name);
        state.set_draft("ไม่ถูกบันทึก");
        state.begin_edit(2, &list[2].name);
        assert!(!state.is_editing(1));
        assert_eq!(state.draft(), list[2].name);
    }

    #[test]
    fn test_system_row_cannot_be_deleted() {
        let list = entries();
        let mut state = ListEditorState::new();
        assert!(!ListEditorState::can_delete(&list[0]));
        assert!(ListEditorState::can_delete(&list[1]));
        assert_eq!(state.request_delete(&list, 0), None);
        assert_eq!(state.request_delete(&list, 2), Some(EditorOutcome::Delete(2)));
        assert_eq!(state.request_delete(&list, 9), None);
    }

    #[test]
    fn test_add_forwards_trimmed_text_once() {
        let mut state = ListEditorState::new();
        state.set_new_item("   ");
        assert_eq!(state.submit_new_item::<ConfigEntry>(), None);

        state.set_new_item("  เครื่องสำรองไฟ ");
        assert_eq!(
            state.submit_new_item::<ConfigEntry>(),
            Some(EditorOutcome::Add("เครื่องสำรองไฟ".into()))
        );
        assert_eq!(state.new_item(), "");
        // second Enter on the now-empty field does nothing
        assert_eq!(state.submit_new_item::<ConfigEntry>(), None);
    }

    #[test]
    fn test_drop_cancels_edit_and_reorders() {
        let list = entries();
        let mut state = ListEditorState::new();
        state.begin_edit(1, &list[1].name);
        let outcome = state.drop_item(&list, 2, 0, Utc::now());
        match outcome {
            Some(EditorOutcome::Reorder(v)) => {
                assert_eq!(v[0].id, list[2].id);
                assert_eq!(v[0].order, 1);
                assert_eq!(v[2].order, 3);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(state.editing_index(), None);
    }

    #[test]
    fn test_drop_on_origin_keeps_edit() {
        let list = entries();
        let mut state = ListEditorState::new();
        state.begin_edit(1, &list[1].name);
        assert_eq!(state.drop_item(&list, 1, 1, Utc::now()), None);
        assert!(state.is_editing(1));
    }

    #[test]
    fn test_move_by_bounds() {
        let list = entries();
        let mut state = ListEditorState::new();
        assert_eq!(state.move_by(&list, 0, -1, Utc::now()), None);
        assert_eq!(state.move_by(&list, 2, 1, Utc::now()), None);
        assert!(matches!(
            state.move_by(&list, 1, -1, Utc::now()),
            Some(EditorOutcome::Reorder(_))
        ));
    }
}
