//! Editable form state, one model per entity type
//!
//! A form is a set of scalar fields plus named sub-collections, each held in
//! a [`RecordArray`]. Every editable value is addressed by a [`FieldPath`],
//! which is how the key handlers and the form panel talk about fields without
//! knowing the concrete form type.
//!
//! Forms are hydrated from a fetched [`Entity`], edited through
//! [`Form::apply`] and the row operations, checked with [`Form::validate`]
//! and finally turned into a [`MultipartPayload`].

mod about;
mod banner;
mod blog;
mod listing;
mod rows;
mod testimonial;

use estate_core::prelude::*;
use estate_core::{
    ChildRecord, Entity, EntityKind, FieldKind, FieldValue, FileField, MultipartPayload,
    PayloadOptions, RecordArray, RowId,
};

pub use about::AboutForm;
pub use banner::BannerForm;
pub use blog::BlogForm;
pub use listing::ListingForm;
pub use rows::{
    AmenityRow, FloorPlanRow, ParagraphRow, PointRow, ProjectImageRow, SubPointRow, UpdateRow,
    ValueRow,
};
pub use testimonial::TestimonialForm;

/// Address of one editable value inside a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    /// Top-level field of the entity
    Scalar(&'static str),
    /// Field of a row in a top-level sub-collection
    Row {
        collection: &'static str,
        row: RowId,
        field: &'static str,
    },
    /// Field of a row in a sub-collection of a row
    Nested {
        collection: &'static str,
        row: RowId,
        sub: &'static str,
        sub_row: RowId,
        field: &'static str,
    },
}

/// Sub-collection a row lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionRef {
    Top(&'static str),
    Nested {
        collection: &'static str,
        row: RowId,
        sub: &'static str,
    },
}

impl FieldPath {
    pub fn field(&self) -> &'static str {
        match self {
            FieldPath::Scalar(field)
            | FieldPath::Row { field, .. }
            | FieldPath::Nested { field, .. } => field,
        }
    }

    /// Innermost row containing this field
    pub fn row(&self) -> Option<(CollectionRef, RowId)> {
        match *self {
            FieldPath::Scalar(_) => None,
            FieldPath::Row {
                collection, row, ..
            } => Some((CollectionRef::Top(collection), row)),
            FieldPath::Nested {
                collection,
                row,
                sub,
                sub_row,
                ..
            } => Some((
                CollectionRef::Nested {
                    collection,
                    row,
                    sub,
                },
                sub_row,
            )),
        }
    }

    /// Top-level row containing this field, for nested paths the parent row
    pub fn top_row(&self) -> Option<(&'static str, RowId)> {
        match *self {
            FieldPath::Scalar(_) => None,
            FieldPath::Row {
                collection, row, ..
            }
            | FieldPath::Nested {
                collection, row, ..
            } => Some((collection, row)),
        }
    }
}

/// One line of the form panel
#[derive(Debug, Clone, PartialEq)]
pub struct FormItem {
    pub path: FieldPath,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: FieldValue,
    /// Heading the item is grouped under ("Details", "Floor plans 2", ...)
    pub section: String,
    pub required: bool,
}

/// Common behaviour of all entity forms
pub trait Form {
    fn kind(&self) -> EntityKind;

    /// Every editable value in display order
    fn items(&self) -> Vec<FormItem>;

    /// Set the value at `path`; returns `false` when nothing changed
    fn apply(&mut self, path: &FieldPath, value: FieldValue) -> bool;

    /// Append a default row, returning its id
    fn append_row(&mut self, at: CollectionRef) -> Option<RowId>;

    /// Remove a row; the collection keeps at least one row
    fn remove_row(&mut self, at: CollectionRef, row: RowId) -> bool;

    /// Move a row up (negative) or down (positive)
    fn move_row(&mut self, at: CollectionRef, row: RowId, offset: isize) -> bool;

    /// Required-field checks run before any request is made
    fn validate(&self) -> Result<()>;

    fn to_payload(&self, options: PayloadOptions) -> MultipartPayload;
}

/// The form of whichever entity type a page edits
#[derive(Debug, Clone, PartialEq)]
pub enum EntityForm {
    Banner(BannerForm),
    About(AboutForm),
    Testimonial(TestimonialForm),
    Blog(BlogForm),
    Listing(ListingForm),
}

impl EntityForm {
    /// Blank form in create mode
    pub fn empty(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Banner => EntityForm::Banner(BannerForm::default()),
            EntityKind::About => EntityForm::About(AboutForm::default()),
            EntityKind::Testimonial => EntityForm::Testimonial(TestimonialForm::default()),
            EntityKind::Blog => EntityForm::Blog(BlogForm::default()),
            EntityKind::Commercial | EntityKind::Residential | EntityKind::Plot => {
                EntityForm::Listing(ListingForm::new(kind))
            }
        }
    }

    /// Editable copy of a persisted entity
    pub fn hydrate(entity: &Entity) -> Self {
        match entity {
            Entity::Banner(e) => EntityForm::Banner(BannerForm::hydrate(e)),
            Entity::About(e) => EntityForm::About(AboutForm::hydrate(e)),
            Entity::Testimonial(e) => EntityForm::Testimonial(TestimonialForm::hydrate(e)),
            Entity::Blog(e) => EntityForm::Blog(BlogForm::hydrate(e)),
            Entity::Listing(kind, e) => EntityForm::Listing(ListingForm::hydrate(*kind, e)),
        }
    }

    fn form(&self) -> &dyn Form {
        match self {
            EntityForm::Banner(f) => f,
            EntityForm::About(f) => f,
            EntityForm::Testimonial(f) => f,
            EntityForm::Blog(f) => f,
            EntityForm::Listing(f) => f,
        }
    }

    fn form_mut(&mut self) -> &mut dyn Form {
        match self {
            EntityForm::Banner(f) => f,
            EntityForm::About(f) => f,
            EntityForm::Testimonial(f) => f,
            EntityForm::Blog(f) => f,
            EntityForm::Listing(f) => f,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.form().kind()
    }

    pub fn items(&self) -> Vec<FormItem> {
        self.form().items()
    }

    pub fn apply(&mut self, path: &FieldPath, value: FieldValue) -> bool {
        self.form_mut().apply(path, value)
    }

    pub fn append_row(&mut self, at: CollectionRef) -> Option<RowId> {
        self.form_mut().append_row(at)
    }

    pub fn remove_row(&mut self, at: CollectionRef, row: RowId) -> bool {
        self.form_mut().remove_row(at, row)
    }

    pub fn move_row(&mut self, at: CollectionRef, row: RowId, offset: isize) -> bool {
        self.form_mut().move_row(at, row, offset)
    }

    pub fn validate(&self) -> Result<()> {
        self.form().validate()
    }

    pub fn to_payload(&self, options: PayloadOptions) -> MultipartPayload {
        self.form().to_payload(options)
    }

    /// Current value at `path`
    pub fn value(&self, path: &FieldPath) -> Option<FieldValue> {
        self.items()
            .into_iter()
            .find(|item| item.path == *path)
            .map(|item| item.value)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers shared by the form models
// ─────────────────────────────────────────────────────────────────────────────

/// Collects [`FormItem`]s section by section
pub(crate) struct ItemsBuilder {
    items: Vec<FormItem>,
    section: String,
}

impl ItemsBuilder {
    pub(crate) fn new() -> Self {
        Self {
            items: Vec::new(),
            section: "Details".to_string(),
        }
    }

    pub(crate) fn section(&mut self, title: impl Into<String>) -> &mut Self {
        self.section = title.into();
        self
    }

    fn push(&mut self, path: FieldPath, label: &'static str, kind: FieldKind, value: FieldValue) {
        self.items.push(FormItem {
            path,
            label,
            kind,
            value,
            section: self.section.clone(),
            required: false,
        });
    }

    pub(crate) fn text(
        &mut self,
        name: &'static str,
        label: &'static str,
        kind: FieldKind,
        value: &str,
    ) -> &mut Self {
        self.push(
            FieldPath::Scalar(name),
            label,
            kind,
            FieldValue::text(value),
        );
        self
    }

    /// Text field that must not be blank
    pub(crate) fn required(
        &mut self,
        name: &'static str,
        label: &'static str,
        value: &str,
    ) -> &mut Self {
        self.text(name, label, FieldKind::Text, value);
        if let Some(last) = self.items.last_mut() {
            last.required = true;
        }
        self
    }

    pub(crate) fn flag(
        &mut self,
        name: &'static str,
        label: &'static str,
        value: bool,
    ) -> &mut Self {
        self.push(
            FieldPath::Scalar(name),
            label,
            FieldKind::Flag,
            FieldValue::Flag(value),
        );
        self
    }

    pub(crate) fn file(
        &mut self,
        name: &'static str,
        label: &'static str,
        value: &FileField,
    ) -> &mut Self {
        self.push(
            FieldPath::Scalar(name),
            label,
            FieldKind::File,
            FieldValue::File(value.clone()),
        );
        self
    }

    /// One section per row of a top-level sub-collection
    pub(crate) fn rows<T: ChildRecord>(
        &mut self,
        collection: &'static str,
        title: &str,
        rows: &RecordArray<T>,
    ) -> &mut Self {
        for (index, (id, record)) in rows.iter().enumerate() {
            self.section(format!("{} {}", title, index + 1));
            self.row(collection, id, record);
        }
        self
    }

    /// Fields of a single top-level row, in the current section
    pub(crate) fn row<T: ChildRecord>(
        &mut self,
        collection: &'static str,
        row: RowId,
        record: &T,
    ) -> &mut Self {
        self.row_fields(record, |field| FieldPath::Row {
            collection,
            row,
            field,
        });
        self
    }

    /// One section per row of a sub-collection nested in row `row`
    pub(crate) fn nested_rows<T: ChildRecord>(
        &mut self,
        collection: &'static str,
        row: RowId,
        sub: &'static str,
        title: &str,
        rows: &RecordArray<T>,
    ) -> &mut Self {
        for (index, (sub_row, record)) in rows.iter().enumerate() {
            self.section(format!("{} {}", title, index + 1));
            self.row_fields(record, |field| FieldPath::Nested {
                collection,
                row,
                sub,
                sub_row,
                field,
            });
        }
        self
    }

    fn row_fields<T: ChildRecord>(&mut self, record: &T, path: impl Fn(&'static str) -> FieldPath) {
        for spec in T::fields() {
            if let Some(value) = record.get(spec.name) {
                self.push(path(spec.name), spec.label, spec.kind, value);
            }
        }
    }

    pub(crate) fn finish(self) -> Vec<FormItem> {
        self.items
    }
}

/// Store a text value into a scalar slot
pub(crate) fn set_text(slot: &mut String, value: FieldValue) -> bool {
    match value {
        FieldValue::Text(text) if *slot != text => {
            *slot = text;
            true
        }
        _ => false,
    }
}

pub(crate) fn set_flag(slot: &mut bool, value: FieldValue) -> bool {
    match value {
        FieldValue::Flag(flag) if *slot != flag => {
            *slot = flag;
            true
        }
        _ => false,
    }
}

pub(crate) fn set_file(slot: &mut FileField, value: FieldValue) -> bool {
    match value {
        FieldValue::File(file) => {
            *slot = file;
            true
        }
        _ => false,
    }
}

/// Replace one field of one row, copy-on-write
pub(crate) fn set_row_field<T: ChildRecord>(
    rows: &mut RecordArray<T>,
    row: RowId,
    field: &str,
    value: FieldValue,
) -> bool {
    let updated = rows.update_field(row, field, value);
    if updated == *rows {
        return false;
    }
    *rows = updated;
    true
}

pub(crate) fn append_to<T: ChildRecord>(rows: &mut RecordArray<T>) -> Option<RowId> {
    *rows = rows.appended();
    rows.last_id()
}

pub(crate) fn remove_from<T: ChildRecord>(rows: &mut RecordArray<T>, row: RowId) -> bool {
    if rows.get(row).is_none() {
        return false;
    }
    *rows = rows.removed(row);
    true
}

pub(crate) fn move_in<T: ChildRecord>(
    rows: &mut RecordArray<T>,
    row: RowId,
    offset: isize,
) -> bool {
    let before = rows.position(row);
    *rows = rows.moved(row, offset);
    before.is_some() && before != rows.position(row)
}

/// Error for a blank required text field
pub(crate) fn require(label: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::validation(label, "is required"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_form_per_kind() {
        for kind in EntityKind::ALL {
            let form = EntityForm::empty(kind);
            assert_eq!(form.kind(), kind);
            assert!(!form.items().is_empty());
        }
    }

    #[test]
    fn test_every_item_path_round_trips_through_value() {
        for kind in EntityKind::ALL {
            let form = EntityForm::empty(kind);
            for item in form.items() {
                assert_eq!(form.value(&item.path), Some(item.value.clone()));
            }
        }
    }

    #[test]
    fn test_field_path_rows() {
        let nested = FieldPath::Nested {
            collection: "points",
            row: 7,
            sub: "sub_points",
            sub_row: 9,
            field: "title",
        };
        assert_eq!(
            nested.row(),
            Some((
                CollectionRef::Nested {
                    collection: "points",
                    row: 7,
                    sub: "sub_points"
                },
                9
            ))
        );
        assert_eq!(nested.top_row(), Some(("points", 7)));
        assert_eq!(FieldPath::Scalar("title").row(), None);
    }

    #[test]
    fn test_set_row_field_reports_no_change() {
        let mut rows: RecordArray<AmenityRow> = RecordArray::new();
        let id = rows.first_id().unwrap();
        let gym = FieldValue::text("Gym");
        assert!(set_row_field(&mut rows, id, "title", gym.clone()));
        assert!(!set_row_field(&mut rows, id, "title", gym));

        let missing = id + 1000;
        let other = FieldValue::text("x");
        assert!(!set_row_field(&mut rows, missing, "title", other));
    }

    #[test]
    fn test_validation_blocks_blank_required() {
        for kind in EntityKind::ALL {
            let err = EntityForm::empty(kind).validate().unwrap_err();
            assert!(matches!(err, Error::Validation { .. }), "{kind}");
        }
    }
}
