use estate_core::entity::Testimonial;
use estate_core::prelude::*;
use estate_core::{
    EntityKind, FieldKind, FieldValue, FileField, MultipartPayload, PayloadOptions, RowId,
};

use super::{require, set_file, set_text, CollectionRef, FieldPath, Form, FormItem, ItemsBuilder};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestimonialForm {
    pub name: String,
    pub designation: String,
    pub message: String,
    pub rating: String,
    pub photo: FileField,
}

impl TestimonialForm {
    pub fn hydrate(t: &Testimonial) -> Self {
        Self {
            name: t.name.clone(),
            designation: t.designation.clone(),
            message: t.message.clone(),
            rating: t.rating.map(|r| r.to_string()).unwrap_or_default(),
            photo: FileField::from_reference(t.photo.as_deref()),
        }
    }

    fn parsed_rating(&self) -> Option<u8> {
        self.rating.trim().parse().ok()
    }
}

impl Form for TestimonialForm {
    fn kind(&self) -> EntityKind {
        EntityKind::Testimonial
    }

    fn items(&self) -> Vec<FormItem> {
        let mut b = ItemsBuilder::new();
        b.required("name", "Name", &self.name)
            .text(
                "designation",
                "Designation",
                FieldKind::Text,
                &self.designation,
            )
            .required("message", "Message", &self.message)
            .text("rating", "Rating (1-5)", FieldKind::Number, &self.rating)
            .file("photo", "Photo", &self.photo);
        let mut items = b.finish();
        if let Some(message) = items
            .iter_mut()
            .find(|i| i.path == FieldPath::Scalar("message"))
        {
            message.kind = FieldKind::Multiline;
        }
        items
    }

    fn apply(&mut self, path: &FieldPath, value: FieldValue) -> bool {
        match path {
            FieldPath::Scalar("name") => set_text(&mut self.name, value),
            FieldPath::Scalar("designation") => set_text(&mut self.designation, value),
            FieldPath::Scalar("message") => set_text(&mut self.message, value),
            FieldPath::Scalar("rating") => set_text(&mut self.rating, value),
            FieldPath::Scalar("photo") => set_file(&mut self.photo, value),
            _ => false,
        }
    }

    fn append_row(&mut self, _at: CollectionRef) -> Option<RowId> {
        None
    }

    fn remove_row(&mut self, _at: CollectionRef, _row: RowId) -> bool {
        false
    }

    fn move_row(&mut self, _at: CollectionRef, _row: RowId, _offset: isize) -> bool {
        false
    }

    fn validate(&self) -> Result<()> {
        require("Name", &self.name)?;
        require("Message", &self.message)?;
        if !self.rating.trim().is_empty() {
            match self.parsed_rating() {
                Some(1..=5) => {}
                _ => return Err(Error::validation("Rating", "must be between 1 and 5")),
            }
        }
        Ok(())
    }

    fn to_payload(&self, options: PayloadOptions) -> MultipartPayload {
        MultipartPayload::build(options, |w| {
            w.text("name", self.name.trim())
                .text("designation", &self.designation)
                .text("message", &self.message);
            match self.parsed_rating() {
                Some(rating) => w.value("rating", rating),
                None => w.value("rating", serde_json::Value::Null),
            };
            w.file("photo", &self.photo);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> TestimonialForm {
        TestimonialForm {
            name: "Asha".into(),
            message: "Smooth handover".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_rating_bounds() {
        let mut form = filled();
        assert!(form.validate().is_ok());

        form.rating = "6".into();
        assert!(form.validate().is_err());
        form.rating = "five".into();
        assert!(form.validate().is_err());
        form.rating = "5".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_message_is_multiline() {
        let items = filled().items();
        let message = items
            .iter()
            .find(|i| i.path == FieldPath::Scalar("message"))
            .unwrap();
        assert_eq!(message.kind, FieldKind::Multiline);
        assert!(message.required);
    }

    #[test]
    fn test_payload_rating_number() {
        let mut form = filled();
        form.rating = "4".into();
        let payload = form.to_payload(PayloadOptions::default());
        assert_eq!(payload.data["rating"], 4);
        assert!(payload.files.is_empty());
    }
}
