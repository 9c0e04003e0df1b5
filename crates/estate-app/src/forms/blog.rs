//! Blog post form: points nested two levels deep

use estate_core::entity::Blog;
use estate_core::prelude::*;
use estate_core::{
    format_tags, parse_tag_input, EntityKind, FieldKind, FieldValue, FileField, MultipartPayload,
    PayloadOptions, RecordArray, RowId,
};

use super::rows::{PointRow, SubPointRow};
use super::{
    append_to, move_in, remove_from, require, set_file, set_flag, set_row_field, set_text,
    CollectionRef, FieldPath, Form, FormItem, ItemsBuilder,
};

const POINTS: &str = "points";
const SUB_POINTS: &str = "sub_points";

/// Blog post with points, each point with its own sub-points
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogForm {
    pub title: String,
    pub slug: String,
    pub author: String,
    pub excerpt: String,
    /// Comma separated, cleaned on submit
    pub tags: String,
    pub published: bool,
    pub cover_image: FileField,
    pub points: RecordArray<PointRow>,
}

impl BlogForm {
    pub fn hydrate(blog: &Blog) -> Self {
        Self {
            title: blog.title.clone(),
            slug: blog.slug.clone(),
            author: blog.author.clone(),
            excerpt: blog.excerpt.clone(),
            tags: format_tags(&blog.tags),
            published: blog.published,
            cover_image: FileField::from_reference(blog.cover_image.as_deref()),
            points: RecordArray::from_records(blog.points.iter().map(PointRow::from)),
        }
    }

    /// Slug to send: the typed one, or one derived from the title
    fn effective_slug(&self) -> String {
        if self.slug.trim().is_empty() {
            slugify(&self.title)
        } else {
            self.slug.trim().to_string()
        }
    }

    /// Apply `f` to the sub-points of point `row`
    fn with_sub_points(
        &mut self,
        row: RowId,
        f: impl FnOnce(&RecordArray<SubPointRow>) -> RecordArray<SubPointRow>,
    ) -> bool {
        let before = self.points.clone();
        self.points = self.points.map_row(row, |point| PointRow {
            sub_points: f(&point.sub_points),
            ..point.clone()
        });
        self.points != before
    }
}

impl Form for BlogForm {
    fn kind(&self) -> EntityKind {
        EntityKind::Blog
    }

    fn items(&self) -> Vec<FormItem> {
        let mut b = ItemsBuilder::new();
        b.required("title", "Title", &self.title)
            .text("slug", "Slug", FieldKind::Text, &self.slug)
            .text("author", "Author", FieldKind::Text, &self.author)
            .text("excerpt", "Excerpt", FieldKind::Multiline, &self.excerpt)
            .text("tags", "Tags", FieldKind::Text, &self.tags)
            .flag("published", "Published", self.published)
            .file("cover_image", "Cover image", &self.cover_image);

        for (index, (id, point)) in self.points.iter().enumerate() {
            let title = format!("Point {}", index + 1);
            b.section(title.clone())
                .row(POINTS, id, point)
                .nested_rows(
                    POINTS,
                    id,
                    SUB_POINTS,
                    &format!("{} › Sub-point", title),
                    &point.sub_points,
                );
        }
        b.finish()
    }

    fn apply(&mut self, path: &FieldPath, value: FieldValue) -> bool {
        match *path {
            FieldPath::Scalar("title") => set_text(&mut self.title, value),
            FieldPath::Scalar("slug") => set_text(&mut self.slug, value),
            FieldPath::Scalar("author") => set_text(&mut self.author, value),
            FieldPath::Scalar("excerpt") => set_text(&mut self.excerpt, value),
            FieldPath::Scalar("tags") => set_text(&mut self.tags, value),
            FieldPath::Scalar("published") => set_flag(&mut self.published, value),
            FieldPath::Scalar("cover_image") => set_file(&mut self.cover_image, value),
            FieldPath::Row {
                collection: POINTS,
                row,
                field,
            } => set_row_field(&mut self.points, row, field, value),
            FieldPath::Nested {
                collection: POINTS,
                row,
                sub: SUB_POINTS,
                sub_row,
                field,
            } => self.with_sub_points(row, |subs| subs.update_field(sub_row, field, value)),
            _ => false,
        }
    }

    fn append_row(&mut self, at: CollectionRef) -> Option<RowId> {
        match at {
            CollectionRef::Top(POINTS) => append_to(&mut self.points),
            CollectionRef::Nested {
                collection: POINTS,
                row,
                sub: SUB_POINTS,
            } => {
                let mut added = None;
                self.with_sub_points(row, |subs| {
                    let subs = subs.appended();
                    added = subs.last_id();
                    subs
                });
                added
            }
            _ => None,
        }
    }

    fn remove_row(&mut self, at: CollectionRef, row: RowId) -> bool {
        match at {
            CollectionRef::Top(POINTS) => remove_from(&mut self.points, row),
            CollectionRef::Nested {
                collection: POINTS,
                row: point,
                sub: SUB_POINTS,
            } => self.with_sub_points(point, |subs| subs.removed(row)),
            _ => false,
        }
    }

    fn move_row(&mut self, at: CollectionRef, row: RowId, offset: isize) -> bool {
        match at {
            CollectionRef::Top(POINTS) => move_in(&mut self.points, row, offset),
            CollectionRef::Nested {
                collection: POINTS,
                row: point,
                sub: SUB_POINTS,
            } => self.with_sub_points(point, |subs| subs.moved(row, offset)),
            _ => false,
        }
    }

    fn validate(&self) -> Result<()> {
        require("Title", &self.title)?;
        let slug = self.slug.trim();
        if !slug.is_empty() && slug != slugify(slug) {
            return Err(Error::validation(
                "Slug",
                "may only contain lowercase letters, digits and hyphens",
            ));
        }
        Ok(())
    }

    fn to_payload(&self, options: PayloadOptions) -> MultipartPayload {
        MultipartPayload::build(options, |w| {
            w.text("title", self.title.trim())
                .text("slug", &self.effective_slug())
                .text("author", &self.author)
                .text("excerpt", &self.excerpt)
                .tags("tags", &parse_tag_input(&self.tags))
                .value("published", self.published)
                .file("coverImage", &self.cover_image)
                .rows("points", &self.points);
        })
    }
}

/// Lowercase, hyphen separated form of `text`
pub(crate) fn slugify(text: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_core::entity::{BlogPoint, SubPoint};

    fn blog_with_point() -> BlogForm {
        BlogForm::hydrate(&Blog {
            title: "Buying your first home".into(),
            tags: vec!["Guides".into()],
            points: vec![BlogPoint {
                title: "Budget".into(),
                sub_points: vec![SubPoint {
                    title: "EMI".into(),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        })
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Buying your First Home!"), "buying-your-first-home");
        assert_eq!(slugify("  -- 2BHK  vs 3BHK -- "), "2bhk-vs-3bhk");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slug_validation() {
        let mut form = blog_with_point();
        form.slug = "Not A Slug".into();
        assert!(form.validate().is_err());
        form.slug = "first-home".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_nested_sub_point_edit() {
        let mut form = blog_with_point();
        let point = form.points.first_id().unwrap();
        let at = CollectionRef::Nested {
            collection: POINTS,
            row: point,
            sub: SUB_POINTS,
        };

        let new_sub = form.append_row(at).unwrap();
        let path = FieldPath::Nested {
            collection: POINTS,
            row: point,
            sub: SUB_POINTS,
            sub_row: new_sub,
            field: "title",
        };
        assert!(form.apply(&path, FieldValue::text("Down payment")));

        let subs = &form.points.get(point).unwrap().sub_points;
        assert_eq!(subs.len(), 2);
        assert_eq!(subs.get(new_sub).unwrap().title, "Down payment");
    }

    #[test]
    fn test_removing_last_sub_point_leaves_placeholder() {
        let mut form = blog_with_point();
        let point = form.points.first_id().unwrap();
        let subs = &form.points.get(point).unwrap().sub_points;
        let sub = subs.first_id().unwrap();
        let at = CollectionRef::Nested {
            collection: POINTS,
            row: point,
            sub: SUB_POINTS,
        };

        assert!(form.remove_row(at, sub));
        let subs = &form.points.get(point).unwrap().sub_points;
        assert_eq!(subs.len(), 1);
        assert_eq!(subs.records()[0], &SubPointRow::default());
    }

    #[test]
    fn test_items_cover_point_and_sub_points() {
        let form = blog_with_point();
        let items = form.items();
        let point_title = FieldPath::Row {
            collection: POINTS,
            row: form.points.first_id().unwrap(),
            field: "title",
        };
        assert!(items.iter().any(|i| i.path == point_title));
        assert!(items
            .iter()
            .any(|i| matches!(i.path, FieldPath::Nested { sub: SUB_POINTS, .. })));
        for item in &items {
            let entity_form = super::super::EntityForm::Blog(form.clone());
            assert_eq!(entity_form.value(&item.path), Some(item.value.clone()));
        }
    }

    #[test]
    fn test_payload_tags_and_slug() {
        let mut form = blog_with_point();
        form.tags = r#"["Luxury"], 'Modern', "Green\"Home""#.into();
        let payload = form.to_payload(PayloadOptions::default());

        assert_eq!(
            payload.data["tags"],
            serde_json::json!(["Luxury", "Modern", "Green\"Home"])
        );
        assert_eq!(payload.data["slug"], "buying-your-first-home");
        assert_eq!(payload.data["points"][0]["subPoints"][0]["title"], "EMI");
        assert_eq!(payload.data["published"], false);
    }
}
