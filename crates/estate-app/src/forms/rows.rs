//! Child record types of every sub-collection

use estate_core::entity::{
    AboutValue, Amenity, BlogPoint, FloorPlan, Paragraph, ProjectImage, ProjectUpdate, SubPoint,
};
use estate_core::{
    ChildRecord, FieldKind, FieldSpec, FieldValue, FileField, ObjectWriter, RecordArray,
};

/// Declares a flat child record whose fields are text or files
///
/// Each field is listed as `name: Kind => "wireKey", "Label";`.
macro_rules! child_record {
    (
        $(#[$meta:meta])*
        $name:ident, key: $key:literal {
            $( $field:ident : $kind:ident => $wire:literal, $label:literal; )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $( pub $field: child_record!(@ty $kind), )*
        }

        impl ChildRecord for $name {
            const KEY_FIELD: &'static str = $key;

            fn fields() -> &'static [FieldSpec] {
                const FIELDS: &[FieldSpec] = &[
                    $( FieldSpec::new(stringify!($field), $label, FieldKind::$kind), )*
                ];
                FIELDS
            }

            fn get(&self, field: &str) -> Option<FieldValue> {
                match field {
                    $( stringify!($field) => Some(child_record!(@get self.$field, $kind)), )*
                    _ => None,
                }
            }

            fn set(&mut self, field: &str, value: FieldValue) -> bool {
                match field {
                    $( stringify!($field) => child_record!(@set self.$field, value, $kind), )*
                    _ => false,
                }
            }

            fn write(&self, w: &mut ObjectWriter<'_>) {
                $( child_record!(@write w, $wire, self.$field, $kind); )*
            }
        }
    };

    (@ty File) => { FileField };
    (@ty $kind:ident) => { String };

    (@get $slot:expr, File) => { FieldValue::File($slot.clone()) };
    (@get $slot:expr, $kind:ident) => { FieldValue::Text($slot.clone()) };

    (@set $slot:expr, $value:ident, File) => {
        match $value {
            FieldValue::File(v) => {
                $slot = v;
                true
            }
            _ => false,
        }
    };
    (@set $slot:expr, $value:ident, $kind:ident) => {
        match $value {
            FieldValue::Text(v) => {
                $slot = v;
                true
            }
            _ => false,
        }
    };

    (@write $w:ident, $wire:literal, $slot:expr, File) => { $w.file($wire, &$slot) };
    (@write $w:ident, $wire:literal, $slot:expr, $kind:ident) => { $w.text($wire, &$slot) };
}

child_record! {
    /// Company value inside an About-Us block
    ValueRow, key: "title" {
        title: Text => "title", "Title";
        description: Multiline => "description", "Description";
        icon: File => "icon", "Icon";
    }
}

child_record! {
    SubPointRow, key: "title" {
        title: Text => "title", "Title";
        description: Multiline => "description", "Description";
    }
}

child_record! {
    FloorPlanRow, key: "title" {
        title: Text => "title", "Title";
        area: Text => "area", "Area";
        alt: Text => "alt", "Alt text";
        image: File => "image", "Plan image";
    }
}

child_record! {
    /// Gallery image; a row without an image is a placeholder
    ProjectImageRow, key: "image" {
        alt: Text => "alt", "Alt text";
        image: File => "image", "Image";
    }
}

child_record! {
    AmenityRow, key: "title" {
        title: Text => "title", "Title";
        icon: File => "icon", "Icon";
    }
}

child_record! {
    /// Construction progress entry
    UpdateRow, key: "title" {
        title: Text => "title", "Title";
        date: Date => "date", "Date";
        description: Multiline => "description", "Description";
        image: File => "image", "Image";
    }
}

child_record! {
    ParagraphRow, key: "heading" {
        heading: Text => "heading", "Heading";
        text: Multiline => "text", "Text";
    }
}

/// Blog section with its own sub-points
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointRow {
    pub title: String,
    pub description: String,
    pub image: FileField,
    pub sub_points: RecordArray<SubPointRow>,
}

const POINT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("title", "Title", FieldKind::Text),
    FieldSpec::new("description", "Description", FieldKind::Multiline),
    FieldSpec::new("image", "Image", FieldKind::File),
];

impl ChildRecord for PointRow {
    const KEY_FIELD: &'static str = "title";

    fn fields() -> &'static [FieldSpec] {
        POINT_FIELDS
    }

    fn get(&self, field: &str) -> Option<FieldValue> {
        match field {
            "title" => Some(FieldValue::text(&self.title)),
            "description" => Some(FieldValue::text(&self.description)),
            "image" => Some(FieldValue::File(self.image.clone())),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: FieldValue) -> bool {
        match (field, value) {
            ("title", FieldValue::Text(v)) => self.title = v,
            ("description", FieldValue::Text(v)) => self.description = v,
            ("image", FieldValue::File(v)) => self.image = v,
            _ => return false,
        }
        true
    }

    fn write(&self, w: &mut ObjectWriter<'_>) {
        w.text("title", &self.title)
            .text("description", &self.description)
            .file("image", &self.image)
            .rows("subPoints", &self.sub_points);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hydration from persisted shapes
// ─────────────────────────────────────────────────────────────────────────────

fn file(reference: &Option<String>) -> FileField {
    FileField::from_reference(reference.as_deref())
}

impl From<&AboutValue> for ValueRow {
    fn from(v: &AboutValue) -> Self {
        Self {
            title: v.title.clone(),
            description: v.description.clone(),
            icon: file(&v.icon),
        }
    }
}

impl From<&SubPoint> for SubPointRow {
    fn from(s: &SubPoint) -> Self {
        Self {
            title: s.title.clone(),
            description: s.description.clone(),
        }
    }
}

impl From<&BlogPoint> for PointRow {
    fn from(p: &BlogPoint) -> Self {
        Self {
            title: p.title.clone(),
            description: p.description.clone(),
            image: file(&p.image),
            sub_points: RecordArray::from_records(p.sub_points.iter().map(SubPointRow::from)),
        }
    }
}

impl From<&FloorPlan> for FloorPlanRow {
    fn from(p: &FloorPlan) -> Self {
        Self {
            title: p.title.clone(),
            area: p.area.clone(),
            alt: p.alt.clone(),
            image: file(&p.image),
        }
    }
}

impl From<&ProjectImage> for ProjectImageRow {
    fn from(i: &ProjectImage) -> Self {
        Self {
            alt: i.alt.clone(),
            image: file(&i.image),
        }
    }
}

impl From<&Amenity> for AmenityRow {
    fn from(a: &Amenity) -> Self {
        Self {
            title: a.title.clone(),
            icon: file(&a.icon),
        }
    }
}

impl From<&ProjectUpdate> for UpdateRow {
    fn from(u: &ProjectUpdate) -> Self {
        Self {
            title: u.title.clone(),
            date: u.date.clone(),
            description: u.description.clone(),
            image: file(&u.image),
        }
    }
}

impl From<&Paragraph> for ParagraphRow {
    fn from(p: &Paragraph) -> Self {
        Self {
            heading: p.heading.clone(),
            text: p.text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_core::{MultipartPayload, PayloadOptions, PendingUpload};

    #[test]
    fn test_macro_record_fields() {
        let names: Vec<_> = FloorPlanRow::fields().iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["title", "area", "alt", "image"]);
        assert_eq!(FloorPlanRow::fields()[3].kind, FieldKind::File);
    }

    #[test]
    fn test_macro_record_set_checks_kind() {
        let mut row = AmenityRow::default();
        assert!(row.set("title", FieldValue::text("Pool")));
        assert!(!row.set("title", FieldValue::Flag(true)));
        assert!(!row.set("icon", FieldValue::text("x")));
        assert!(!row.set("colour", FieldValue::text("x")));
        assert_eq!(row.get("title"), Some(FieldValue::text("Pool")));
    }

    #[test]
    fn test_image_row_blank_until_image() {
        let mut row = ProjectImageRow {
            alt: "Lobby".into(),
            ..Default::default()
        };
        assert!(row.is_blank());
        row.image = FileField::Persisted("/i/lobby.jpg".into());
        assert!(!row.is_blank());
    }

    #[test]
    fn test_point_row_writes_sub_points() {
        let point = PointRow {
            title: "Budget".into(),
            image: FileField::pending(PendingUpload::new("b.png", "image/png", vec![0; 4])),
            sub_points: RecordArray::from_records([
                SubPointRow {
                    title: "EMI".into(),
                    ..Default::default()
                },
                SubPointRow::default(),
            ]),
            ..Default::default()
        };
        let points = RecordArray::from_records([point]);

        let payload = MultipartPayload::build(PayloadOptions::default(), |w| {
            w.rows("points", &points);
        });

        let sub_points = payload.data["points"][0]["subPoints"].as_array().unwrap();
        assert_eq!(sub_points.len(), 1);
        assert_eq!(payload.part_names(), vec!["points[0].image"]);
    }
}
