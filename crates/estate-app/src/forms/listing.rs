//! Project form shared by commercial, residential and plot listings

use estate_core::entity::Listing;
use estate_core::prelude::*;
use estate_core::{
    format_tags, parse_tag_input, EntityKind, FieldKind, FieldValue, FileField, MultipartPayload,
    PayloadOptions, RecordArray, RowId,
};

use super::blog::slugify;
use super::rows::{AmenityRow, FloorPlanRow, ParagraphRow, ProjectImageRow, UpdateRow};
use super::{
    append_to, move_in, remove_from, require, set_file, set_row_field, set_text, CollectionRef,
    FieldPath, Form, FormItem, ItemsBuilder,
};

const FLOOR_PLANS: &str = "floor_plans";
const PROJECT_IMAGES: &str = "project_images";
const AMENITIES: &str = "amenities";
const UPDATES: &str = "updates";
const PARAGRAPHS: &str = "paragraphs";

#[derive(Debug, Clone, PartialEq)]
pub struct ListingForm {
    kind: EntityKind,
    pub title: String,
    pub slug: String,
    pub location: String,
    pub price: String,
    pub area: String,
    pub status: String,
    /// Comma separated, cleaned on submit
    pub tags: String,
    pub meta_title: String,
    pub meta_description: String,
    /// The persisted banner object is edited as two files and an alt text
    pub banner_desktop: FileField,
    pub banner_mobile: FileField,
    pub banner_alt: String,
    pub floor_plans: RecordArray<FloorPlanRow>,
    pub project_images: RecordArray<ProjectImageRow>,
    pub amenities: RecordArray<AmenityRow>,
    pub updates: RecordArray<UpdateRow>,
    pub paragraphs: RecordArray<ParagraphRow>,
}

impl ListingForm {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            title: String::new(),
            slug: String::new(),
            location: String::new(),
            price: String::new(),
            area: String::new(),
            status: String::new(),
            tags: String::new(),
            meta_title: String::new(),
            meta_description: String::new(),
            banner_desktop: FileField::Empty,
            banner_mobile: FileField::Empty,
            banner_alt: String::new(),
            floor_plans: RecordArray::new(),
            project_images: RecordArray::new(),
            amenities: RecordArray::new(),
            updates: RecordArray::new(),
            paragraphs: RecordArray::new(),
        }
    }

    pub fn hydrate(kind: EntityKind, listing: &Listing) -> Self {
        let banner = listing.banner.clone().unwrap_or_default();
        Self {
            kind,
            title: listing.title.clone(),
            slug: listing.slug.clone(),
            location: listing.location.clone(),
            price: listing.price.clone(),
            area: listing.area.clone(),
            status: listing.status.clone(),
            tags: format_tags(&listing.tags),
            meta_title: listing.meta_title.clone(),
            meta_description: listing.meta_description.clone(),
            banner_desktop: FileField::from_reference(banner.desktop.as_deref()),
            banner_mobile: FileField::from_reference(banner.mobile.as_deref()),
            banner_alt: banner.alt,
            floor_plans: RecordArray::from_records(listing.floor_plans.iter().map(Into::into)),
            project_images: RecordArray::from_records(
                listing.project_images.iter().map(Into::into),
            ),
            amenities: RecordArray::from_records(listing.amenities.iter().map(Into::into)),
            updates: RecordArray::from_records(listing.updates.iter().map(Into::into)),
            paragraphs: RecordArray::from_records(listing.paragraphs.iter().map(Into::into)),
        }
    }
}

impl Form for ListingForm {
    fn kind(&self) -> EntityKind {
        self.kind
    }

    fn items(&self) -> Vec<FormItem> {
        let mut b = ItemsBuilder::new();
        b.required("title", "Title", &self.title)
            .text("slug", "Slug", FieldKind::Text, &self.slug)
            .text("location", "Location", FieldKind::Text, &self.location)
            .text("price", "Price", FieldKind::Text, &self.price)
            .text("area", "Area", FieldKind::Text, &self.area)
            .text("status", "Status", FieldKind::Text, &self.status)
            .text("tags", "Tags", FieldKind::Text, &self.tags)
            .section("SEO")
            .text(
                "meta_title",
                "Meta title",
                FieldKind::Text,
                &self.meta_title,
            )
            .text(
                "meta_description",
                "Meta description",
                FieldKind::Multiline,
                &self.meta_description,
            )
            .section("Banner")
            .file("banner_desktop", "Desktop image", &self.banner_desktop)
            .file("banner_mobile", "Mobile image", &self.banner_mobile)
            .text("banner_alt", "Alt text", FieldKind::Text, &self.banner_alt)
            .rows(FLOOR_PLANS, "Floor plan", &self.floor_plans)
            .rows(PROJECT_IMAGES, "Project image", &self.project_images)
            .rows(AMENITIES, "Amenity", &self.amenities)
            .rows(UPDATES, "Update", &self.updates)
            .rows(PARAGRAPHS, "Paragraph", &self.paragraphs);
        b.finish()
    }

    fn apply(&mut self, path: &FieldPath, value: FieldValue) -> bool {
        match *path {
            FieldPath::Scalar("title") => set_text(&mut self.title, value),
            FieldPath::Scalar("slug") => set_text(&mut self.slug, value),
            FieldPath::Scalar("location") => set_text(&mut self.location, value),
            FieldPath::Scalar("price") => set_text(&mut self.price, value),
            FieldPath::Scalar("area") => set_text(&mut self.area, value),
            FieldPath::Scalar("status") => set_text(&mut self.status, value),
            FieldPath::Scalar("tags") => set_text(&mut self.tags, value),
            FieldPath::Scalar("meta_title") => set_text(&mut self.meta_title, value),
            FieldPath::Scalar("meta_description") => set_text(&mut self.meta_description, value),
            FieldPath::Scalar("banner_desktop") => set_file(&mut self.banner_desktop, value),
            FieldPath::Scalar("banner_mobile") => set_file(&mut self.banner_mobile, value),
            FieldPath::Scalar("banner_alt") => set_text(&mut self.banner_alt, value),
            FieldPath::Row {
                collection,
                row,
                field,
            } => match collection {
                FLOOR_PLANS => set_row_field(&mut self.floor_plans, row, field, value),
                PROJECT_IMAGES => set_row_field(&mut self.project_images, row, field, value),
                AMENITIES => set_row_field(&mut self.amenities, row, field, value),
                UPDATES => set_row_field(&mut self.updates, row, field, value),
                PARAGRAPHS => set_row_field(&mut self.paragraphs, row, field, value),
                _ => false,
            },
            _ => false,
        }
    }

    fn append_row(&mut self, at: CollectionRef) -> Option<RowId> {
        match at {
            CollectionRef::Top(FLOOR_PLANS) => append_to(&mut self.floor_plans),
            CollectionRef::Top(PROJECT_IMAGES) => append_to(&mut self.project_images),
            CollectionRef::Top(AMENITIES) => append_to(&mut self.amenities),
            CollectionRef::Top(UPDATES) => append_to(&mut self.updates),
            CollectionRef::Top(PARAGRAPHS) => append_to(&mut self.paragraphs),
            _ => None,
        }
    }

    fn remove_row(&mut self, at: CollectionRef, row: RowId) -> bool {
        match at {
            CollectionRef::Top(FLOOR_PLANS) => remove_from(&mut self.floor_plans, row),
            CollectionRef::Top(PROJECT_IMAGES) => remove_from(&mut self.project_images, row),
            CollectionRef::Top(AMENITIES) => remove_from(&mut self.amenities, row),
            CollectionRef::Top(UPDATES) => remove_from(&mut self.updates, row),
            CollectionRef::Top(PARAGRAPHS) => remove_from(&mut self.paragraphs, row),
            _ => false,
        }
    }

    fn move_row(&mut self, at: CollectionRef, row: RowId, offset: isize) -> bool {
        match at {
            CollectionRef::Top(FLOOR_PLANS) => move_in(&mut self.floor_plans, row, offset),
            CollectionRef::Top(PROJECT_IMAGES) => move_in(&mut self.project_images, row, offset),
            CollectionRef::Top(AMENITIES) => move_in(&mut self.amenities, row, offset),
            CollectionRef::Top(UPDATES) => move_in(&mut self.updates, row, offset),
            CollectionRef::Top(PARAGRAPHS) => move_in(&mut self.paragraphs, row, offset),
            _ => false,
        }
    }

    fn validate(&self) -> Result<()> {
        require("Title", &self.title)?;
        if self.meta_title.chars().count() > 70 {
            return Err(Error::validation(
                "Meta title",
                "must be at most 70 characters",
            ));
        }
        Ok(())
    }

    fn to_payload(&self, options: PayloadOptions) -> MultipartPayload {
        let slug = if self.slug.trim().is_empty() {
            slugify(&self.title)
        } else {
            self.slug.trim().to_string()
        };
        MultipartPayload::build(options, |w| {
            w.text("title", self.title.trim())
                .text("slug", &slug)
                .text("location", &self.location)
                .text("price", &self.price)
                .text("area", &self.area)
                .text("status", &self.status)
                .tags("tags", &parse_tag_input(&self.tags))
                .text("metaTitle", &self.meta_title)
                .text("metaDescription", &self.meta_description)
                .object("banner", |b| {
                    b.file("desktop", &self.banner_desktop)
                        .file("mobile", &self.banner_mobile)
                        .text("alt", &self.banner_alt);
                })
                .rows("floorPlans", &self.floor_plans)
                .rows("projectImages", &self.project_images)
                .rows("amenities", &self.amenities)
                .rows("updates", &self.updates)
                .rows("paragraphs", &self.paragraphs);
        })
    }
}
