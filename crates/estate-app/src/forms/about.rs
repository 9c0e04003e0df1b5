//! About Us block with its list of company values

use estate_core::entity::AboutBlock;
use estate_core::prelude::*;
use estate_core::{
    EntityKind, FieldKind, FieldValue, FileField, MultipartPayload, PayloadOptions, RecordArray,
    RowId,
};

use super::rows::ValueRow;
use super::{
    append_to, move_in, remove_from, require, set_file, set_row_field, set_text, CollectionRef,
    FieldPath, Form, FormItem, ItemsBuilder,
};

const VALUES: &str = "values";

/// "About Us" content block with its list of company values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AboutForm {
    pub heading: String,
    pub description: String,
    pub image: FileField,
    pub values: RecordArray<ValueRow>,
}

impl AboutForm {
    pub fn hydrate(block: &AboutBlock) -> Self {
        Self {
            heading: block.heading.clone(),
            description: block.description.clone(),
            image: FileField::from_reference(block.image.as_deref()),
            values: RecordArray::from_records(block.values.iter().map(ValueRow::from)),
        }
    }
}

impl Form for AboutForm {
    fn kind(&self) -> EntityKind {
        EntityKind::About
    }

    fn items(&self) -> Vec<FormItem> {
        let mut b = ItemsBuilder::new();
        b.required("heading", "Heading", &self.heading)
            .text(
                "description",
                "Description",
                FieldKind::Multiline,
                &self.description,
            )
            .file("image", "Image", &self.image)
            .rows(VALUES, "Value", &self.values);
        b.finish()
    }

    fn apply(&mut self, path: &FieldPath, value: FieldValue) -> bool {
        match *path {
            FieldPath::Scalar("heading") => set_text(&mut self.heading, value),
            FieldPath::Scalar("description") => set_text(&mut self.description, value),
            FieldPath::Scalar("image") => set_file(&mut self.image, value),
            FieldPath::Row {
                collection: VALUES,
                row,
                field,
            } => set_row_field(&mut self.values, row, field, value),
            _ => false,
        }
    }

    fn append_row(&mut self, at: CollectionRef) -> Option<RowId> {
        match at {
            CollectionRef::Top(VALUES) => append_to(&mut self.values),
            _ => None,
        }
    }

    fn remove_row(&mut self, at: CollectionRef, row: RowId) -> bool {
        match at {
            CollectionRef::Top(VALUES) => remove_from(&mut self.values, row),
            _ => false,
        }
    }

    fn move_row(&mut self, at: CollectionRef, row: RowId, offset: isize) -> bool {
        match at {
            CollectionRef::Top(VALUES) => move_in(&mut self.values, row, offset),
            _ => false,
        }
    }

    fn validate(&self) -> Result<()> {
        require("Heading", &self.heading)
    }

    fn to_payload(&self, options: PayloadOptions) -> MultipartPayload {
        MultipartPayload::build(options, |w| {
            w.text("heading", self.heading.trim())
                .text("description", &self.description)
                .file("image", &self.image)
                .rows("values", &self.values);
        })
    }
}
