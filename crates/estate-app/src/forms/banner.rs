use estate_core::entity::HomeBanner;
use estate_core::prelude::*;
use estate_core::{
    EntityKind, FieldKind, FieldValue, FileField, MultipartPayload, PayloadOptions, RowId,
};

use super::{require, set_file, set_text, CollectionRef, FieldPath, Form, FormItem, ItemsBuilder};

/// Homepage banner
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BannerForm {
    pub title: String,
    pub subtitle: String,
    pub link: String,
    pub order: String,
    pub desktop_image: FileField,
    pub mobile_image: FileField,
}

impl BannerForm {
    pub fn hydrate(banner: &HomeBanner) -> Self {
        Self {
            title: banner.title.clone(),
            subtitle: banner.subtitle.clone().unwrap_or_default(),
            link: banner.link.clone().unwrap_or_default(),
            order: banner.order.map(|o| o.to_string()).unwrap_or_default(),
            desktop_image: FileField::from_reference(banner.desktop_image.as_deref()),
            mobile_image: FileField::from_reference(banner.mobile_image.as_deref()),
        }
    }
}

impl Form for BannerForm {
    fn kind(&self) -> EntityKind {
        EntityKind::Banner
    }

    fn items(&self) -> Vec<FormItem> {
        let mut b = ItemsBuilder::new();
        b.required("title", "Title", &self.title)
            .text("subtitle", "Subtitle", FieldKind::Text, &self.subtitle)
            .text("link", "Link", FieldKind::Text, &self.link)
            .text("order", "Order", FieldKind::Number, &self.order)
            .section("Images")
            .file("desktop_image", "Desktop image", &self.desktop_image)
            .file("mobile_image", "Mobile image", &self.mobile_image);
        b.finish()
    }

    fn apply(&mut self, path: &FieldPath, value: FieldValue) -> bool {
        match path {
            FieldPath::Scalar("title") => set_text(&mut self.title, value),
            FieldPath::Scalar("subtitle") => set_text(&mut self.subtitle, value),
            FieldPath::Scalar("link") => set_text(&mut self.link, value),
            FieldPath::Scalar("order") => set_text(&mut self.order, value),
            FieldPath::Scalar("desktop_image") => set_file(&mut self.desktop_image, value),
            FieldPath::Scalar("mobile_image") => set_file(&mut self.mobile_image, value),
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
        require("Title", &self.title)?;
        if !self.order.trim().is_empty() && self.order.trim().parse::<i64>().is_err() {
            return Err(Error::validation("Order", "must be a whole number"));
        }
        if self.desktop_image.is_empty() {
            return Err(Error::validation("Desktop image", "is required"));
        }
        Ok(())
    }

    fn to_payload(&self, options: PayloadOptions) -> MultipartPayload {
        MultipartPayload::build(options, |w| {
            w.text("title", self.title.trim())
                .optional_text("subtitle", &self.subtitle)
                .optional_text("link", &self.link);
            match self.order.trim().parse::<i64>() {
                Ok(order) => w.value("order", order),
                Err(_) => w.value("order", serde_json::Value::Null),
            };
            w.file("desktopImage", &self.desktop_image)
                .file("mobileImage", &self.mobile_image);
        })
    }
}
