//! Editable arrays of child records
//!
//! A [`RecordArray`] is one named sub-collection of a form (floor plans,
//! amenities, blog points, ...). Every row gets a [`RowId`] when it is created
//! and keeps it for as long as it exists, so deleting or moving a row never
//! changes which row another id refers to.
//!
//! All editing operations take `&self` and return a new array. Untouched rows
//! are shared between the old and the new array; the edited row is a fresh
//! allocation. An array is never empty: removing the last row leaves a single
//! default row behind so the form always has something to edit.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::file_field::FileField;
use crate::multipart::ObjectWriter;

/// Stable identity of a row within a form
pub type RowId = u64;

static ROW_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generate a new unique row ID
pub fn next_row_id() -> RowId {
    ROW_ID_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Kind of input a field needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    Number,
    Date,
    Flag,
    File,
}

/// Static description of one field of a child record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind }
    }
}

/// Value written into (or read from) a single field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    File(FileField),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(t) => Some(t.as_str()),
            _ => None,
        }
    }

    /// Text shown in the form panel
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(t) => t.clone(),
            FieldValue::Flag(true) => "yes".to_string(),
            FieldValue::Flag(false) => "no".to_string(),
            FieldValue::File(f) => f.label(),
        }
    }
}

/// One element type of a sub-collection
pub trait ChildRecord: Clone + Default + PartialEq {
    /// Field that must be non-blank for the row to be sent to the server
    const KEY_FIELD: &'static str;

    /// Editable fields in display order
    fn fields() -> &'static [FieldSpec];

    /// Current value of a field, `None` for unknown names
    fn get(&self, field: &str) -> Option<FieldValue>;

    /// Replace a field; returns `false` for unknown names or mismatched kinds
    fn set(&mut self, field: &str, value: FieldValue) -> bool;

    /// Write the row's JSON object and file parts
    fn write(&self, w: &mut ObjectWriter<'_>);

    /// Placeholder rows with a blank key field are never persisted
    fn is_blank(&self) -> bool {
        match self.get(Self::KEY_FIELD) {
            Some(FieldValue::Text(t)) => t.trim().is_empty(),
            Some(FieldValue::File(f)) => f.is_empty(),
            Some(FieldValue::Flag(_)) => false,
            None => true,
        }
    }
}

/// A record together with its identity
#[derive(Debug, Clone, PartialEq)]
pub struct Row<T> {
    pub id: RowId,
    pub record: T,
}

/// Sub-collection of child records, never empty
#[derive(Debug, Clone, PartialEq)]
pub struct RecordArray<T> {
    rows: Vec<Arc<Row<T>>>,
}

impl<T: ChildRecord> Default for RecordArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ChildRecord> RecordArray<T> {
    /// One default row
    pub fn new() -> Self {
        Self {
            rows: vec![Self::fresh(T::default())],
        }
    }

    /// Wrap existing records, falling back to one default row when empty
    pub fn from_records(records: impl IntoIterator<Item = T>) -> Self {
        let rows: Vec<_> = records.into_iter().map(Self::fresh).collect();
        if rows.is_empty() {
            Self::new()
        } else {
            Self { rows }
        }
    }

    fn fresh(record: T) -> Arc<Row<T>> {
        Arc::new(Row {
            id: next_row_id(),
            record,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always `false`; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ids(&self) -> Vec<RowId> {
        self.rows.iter().map(|r| r.id).collect()
    }

    pub fn first_id(&self) -> Option<RowId> {
        self.rows.first().map(|r| r.id)
    }

    pub fn last_id(&self) -> Option<RowId> {
        self.rows.last().map(|r| r.id)
    }

    pub fn get(&self, id: RowId) -> Option<&T> {
        self.rows.iter().find(|r| r.id == id).map(|r| &r.record)
    }

    /// Shared handle to a row, used to check structural sharing
    pub fn row(&self, id: RowId) -> Option<&Arc<Row<T>>> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn position(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RowId, &T)> {
        self.rows.iter().map(|r| (r.id, &r.record))
    }

    pub fn records(&self) -> Vec<&T> {
        self.rows.iter().map(|r| &r.record).collect()
    }

    /// Rows that would be sent to the server, in order
    pub fn persisted(&self) -> impl Iterator<Item = &T> {
        self.rows
            .iter()
            .map(|r| &r.record)
            .filter(|record| !record.is_blank())
    }

    // ─────────────────────────────────────────────────────────
    // Editing operations
    // ─────────────────────────────────────────────────────────

    /// Append one default row
    pub fn appended(&self) -> Self {
        self.appended_with(T::default())
    }

    /// Append a given record as a new row
    pub fn appended_with(&self, record: T) -> Self {
        let mut rows = self.rows.clone();
        rows.push(Self::fresh(record));
        Self { rows }
    }

    /// Replace one field of one row
    ///
    /// Unknown ids and unknown field names leave the array unchanged.
    pub fn update_field(&self, id: RowId, field: &str, value: FieldValue) -> Self {
        let Some(row) = self.row(id) else {
            return self.clone();
        };
        let mut record = row.record.clone();
        if !record.set(field, value) {
            return self.clone();
        }
        self.replace(id, record)
    }

    /// Apply `f` to a copy of one row, e.g. to edit a nested sub-collection
    pub fn map_row(&self, id: RowId, f: impl FnOnce(&T) -> T) -> Self {
        match self.get(id) {
            Some(record) => {
                let record = f(record);
                self.replace(id, record)
            }
            None => self.clone(),
        }
    }

    /// Remove one row; an emptied array gets one default row back
    pub fn removed(&self, id: RowId) -> Self {
        let rows: Vec<_> = self.rows.iter().filter(|r| r.id != id).cloned().collect();
        if rows.len() == self.rows.len() {
            return self.clone();
        }
        if rows.is_empty() {
            Self::new()
        } else {
            Self { rows }
        }
    }

    /// Move one row by `offset` positions, clamped to the array bounds
    pub fn moved(&self, id: RowId, offset: isize) -> Self {
        let Some(from) = self.position(id) else {
            return self.clone();
        };
        let last = self.rows.len() as isize - 1;
        let to = (from as isize + offset).clamp(0, last) as usize;
        let mut rows = self.rows.clone();
        let row = rows.remove(from);
        rows.insert(to, row);
        Self { rows }
    }

    fn replace(&self, id: RowId, record: T) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|r| {
                if r.id == id {
                    Arc::new(Row {
                        id,
                        record: record.clone(),
                    })
                } else {
                    Arc::clone(r)
                }
            })
            .collect();
        Self { rows }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Minimal child record used by core tests
    #[derive(Debug, Clone, Default, PartialEq)]
    pub(crate) struct Plan {
        pub title: String,
        pub alt: String,
        pub image: FileField,
    }

    const PLAN_FIELDS: &[FieldSpec] = &[
        FieldSpec::new("title", "Title", FieldKind::Text),
        FieldSpec::new("alt", "Alt text", FieldKind::Text),
        FieldSpec::new("image", "Image", FieldKind::File),
    ];

    impl ChildRecord for Plan {
        const KEY_FIELD: &'static str = "title";

        fn fields() -> &'static [FieldSpec] {
            PLAN_FIELDS
        }

        fn get(&self, field: &str) -> Option<FieldValue> {
            match field {
                "title" => Some(FieldValue::text(&self.title)),
                "alt" => Some(FieldValue::text(&self.alt)),
                "image" => Some(FieldValue::File(self.image.clone())),
                _ => None,
            }
        }

        fn set(&mut self, field: &str, value: FieldValue) -> bool {
            match (field, value) {
                ("title", FieldValue::Text(v)) => self.title = v,
                ("alt", FieldValue::Text(v)) => self.alt = v,
                ("image", FieldValue::File(v)) => self.image = v,
                _ => return false,
            }
            true
        }

        fn write(&self, w: &mut ObjectWriter<'_>) {
            w.text("title", &self.title);
            w.text("alt", &self.alt);
            w.file("image", &self.image);
        }
    }

    fn plan(title: &str) -> Plan {
        Plan {
            title: title.to_string(),
            ..Plan::default()
        }
    }

    #[test]
    fn test_new_array_has_one_default_row() {
        let plans: RecordArray<Plan> = RecordArray::new();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans.records(), vec![&Plan::default()]);
    }

    #[test]
    fn test_from_empty_records_has_placeholder() {
        let plans: RecordArray<Plan> = RecordArray::from_records(Vec::new());
        assert_eq!(plans.len(), 1);
    }

    #[test]
    fn test_append_update_remove_scenario() {
        let plans: RecordArray<Plan> = RecordArray::new();
        let blank_id = plans.first_id().unwrap();

        let plans = plans.appended();
        let new_id = plans.last_id().unwrap();
        let plans = plans.update_field(new_id, "title", FieldValue::text("2BHK"));

        assert_eq!(plans.records(), vec![&Plan::default(), &plan("2BHK")]);

        let plans = plans.removed(blank_id);
        assert_eq!(plans.records(), vec![&plan("2BHK")]);
        assert_eq!(plans.ids(), vec![new_id]);
    }

    #[test]
    fn test_removing_last_row_resets_to_default() {
        let plans = RecordArray::from_records(vec![plan("Only")]);
        let id = plans.first_id().unwrap();

        let plans = plans.removed(id);

        assert_eq!(plans.len(), 1);
        assert_eq!(plans.records(), vec![&Plan::default()]);
        assert_ne!(plans.first_id(), Some(id));
    }

    #[test]
    fn test_update_field_only_touches_target() {
        let before = RecordArray::from_records(vec![plan("A"), plan("B"), plan("C")]);
        let ids = before.ids();

        let after = before.update_field(ids[1], "alt", FieldValue::text("second"));

        // Old array is untouched
        assert_eq!(before.get(ids[1]).unwrap().alt, "");
        // Target changed, nothing else did
        assert_eq!(after.get(ids[1]).unwrap().alt, "second");
        assert_eq!(after.get(ids[1]).unwrap().title, "B");
        assert_eq!(after.get(ids[0]), before.get(ids[0]));
        assert_eq!(after.get(ids[2]), before.get(ids[2]));
        // Target is a new allocation
        assert!(!Arc::ptr_eq(
            before.row(ids[1]).unwrap(),
            after.row(ids[1]).unwrap()
        ));
        assert!(Arc::ptr_eq(
            before.row(ids[0]).unwrap(),
            after.row(ids[0]).unwrap()
        ));
    }

    #[test]
    fn test_unknown_id_and_field_are_noops() {
        let plans = RecordArray::from_records(vec![plan("A")]);
        let id = plans.first_id().unwrap();

        let x = FieldValue::text("x");
        assert_eq!(plans.update_field(9_999_999, "title", x.clone()), plans);
        assert_eq!(plans.update_field(id, "nope", x), plans);
        let flag = FieldValue::Flag(true);
        assert_eq!(plans.update_field(id, "title", flag), plans);
        assert_eq!(plans.removed(9_999_999), plans);
    }

    #[test]
    fn test_delete_middle_keeps_identities() {
        let plans = RecordArray::from_records(vec![plan("A"), plan("B"), plan("C")]);
        let ids = plans.ids();

        let plans = plans.removed(ids[1]);
        let plans = plans.update_field(ids[2], "alt", FieldValue::text("third"));

        assert_eq!(plans.get(ids[2]).unwrap().title, "C");
        assert_eq!(plans.get(ids[2]).unwrap().alt, "third");
        assert_eq!(plans.get(ids[0]).unwrap().alt, "");
    }

    #[test]
    fn test_moved_clamps_to_bounds() {
        let plans = RecordArray::from_records(vec![plan("A"), plan("B"), plan("C")]);
        let ids = plans.ids();

        let moved = plans.moved(ids[0], 1);
        assert_eq!(moved.ids(), vec![ids[1], ids[0], ids[2]]);

        let moved = plans.moved(ids[2], 10);
        assert_eq!(moved.ids(), ids);

        let moved = plans.moved(ids[2], -5);
        assert_eq!(moved.ids(), vec![ids[2], ids[0], ids[1]]);
    }

    #[test]
    fn test_map_row_replaces_record() {
        let plans = RecordArray::from_records(vec![plan("A"), plan("B")]);
        let ids = plans.ids();

        let plans = plans.map_row(ids[0], |p| Plan {
            alt: format!("{} alt", p.title),
            ..p.clone()
        });

        assert_eq!(plans.get(ids[0]).unwrap().alt, "A alt");
        assert_eq!(plans.get(ids[1]).unwrap().alt, "");
    }

    #[test]
    fn test_persisted_skips_blank_rows() {
        let plans = RecordArray::from_records(vec![plan("A"), plan("  "), plan("C")]);
        let titles: Vec<_> = plans.persisted().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::text("abc").display(), "abc");
        assert_eq!(FieldValue::Flag(true).display(), "yes");
        assert_eq!(FieldValue::File(FileField::Empty).display(), "(no file)");
    }
}
