//! Persisted entity representations
//!
//! These mirror what the backend returns for each collection. They are read
//! leniently: missing fields default, numbers and strings are interchangeable
//! for free-text values, and ids are accepted as either `id` or `_id`.

mod blog;
mod content;
mod listing;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

pub use blog::{Blog, BlogPoint, SubPoint};
pub use content::{AboutBlock, AboutValue, HomeBanner, Testimonial};
pub use listing::{
    Amenity, FloorPlan, Listing, ListingBanner, Paragraph, ProjectImage, ProjectUpdate,
};

/// Every collection the dashboard manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Banner,
    About,
    Testimonial,
    Blog,
    Commercial,
    Residential,
    Plot,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Banner,
        EntityKind::About,
        EntityKind::Testimonial,
        EntityKind::Blog,
        EntityKind::Commercial,
        EntityKind::Residential,
        EntityKind::Plot,
    ];

    /// Path segment of the REST collection
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Banner => "banners",
            EntityKind::About => "about",
            EntityKind::Testimonial => "testimonials",
            EntityKind::Blog => "blogs",
            EntityKind::Commercial => "commercial",
            EntityKind::Residential => "residential",
            EntityKind::Plot => "plots",
        }
    }

    /// Page title
    pub fn title(&self) -> &'static str {
        match self {
            EntityKind::Banner => "Banners",
            EntityKind::About => "About Us",
            EntityKind::Testimonial => "Testimonials",
            EntityKind::Blog => "Blogs",
            EntityKind::Commercial => "Commercial",
            EntityKind::Residential => "Residential",
            EntityKind::Plot => "Plots",
        }
    }

    /// Name of one record, used in prompts
    pub fn singular(&self) -> &'static str {
        match self {
            EntityKind::Banner => "banner",
            EntityKind::About => "about block",
            EntityKind::Testimonial => "testimonial",
            EntityKind::Blog => "blog post",
            EntityKind::Commercial => "commercial listing",
            EntityKind::Residential => "residential listing",
            EntityKind::Plot => "plot",
        }
    }

    pub fn is_listing(&self) -> bool {
        matches!(
            self,
            EntityKind::Commercial | EntityKind::Residential | EntityKind::Plot
        )
    }

    pub fn from_collection(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.collection().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_collection(s).ok_or_else(|| Error::unknown_collection(s))
    }
}

/// One persisted record of any collection
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Banner(HomeBanner),
    About(AboutBlock),
    Testimonial(Testimonial),
    Blog(Blog),
    Listing(EntityKind, Listing),
}

/// Short description used by list views
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySummary {
    pub title: String,
    pub detail: String,
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Banner(_) => EntityKind::Banner,
            Entity::About(_) => EntityKind::About,
            Entity::Testimonial(_) => EntityKind::Testimonial,
            Entity::Blog(_) => EntityKind::Blog,
            Entity::Listing(kind, _) => *kind,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Entity::Banner(e) => &e.id,
            Entity::About(e) => &e.id,
            Entity::Testimonial(e) => &e.id,
            Entity::Blog(e) => &e.id,
            Entity::Listing(_, e) => &e.id,
        }
    }

    pub fn summary(&self) -> EntitySummary {
        match self {
            Entity::Banner(e) => EntitySummary {
                title: e.title.clone(),
                detail: e.link.clone().unwrap_or_default(),
            },
            Entity::About(e) => EntitySummary {
                title: e.heading.clone(),
                detail: format!("{} values", e.values.len()),
            },
            Entity::Testimonial(e) => EntitySummary {
                title: e.name.clone(),
                detail: e.designation.clone(),
            },
            Entity::Blog(e) => EntitySummary {
                title: e.title.clone(),
                detail: if e.published {
                    format!("published · {}", e.author)
                } else {
                    format!("draft · {}", e.author)
                },
            },
            Entity::Listing(_, e) => EntitySummary {
                title: e.title.clone(),
                detail: [e.location.as_str(), e.price.as_str()]
                    .iter()
                    .filter(|s| !s.is_empty())
                    .copied()
                    .collect::<Vec<_>>()
                    .join(" · "),
            },
        }
    }

    /// JSON object of the record, in the server's field naming
    pub fn to_json(&self) -> Result<Value> {
        let value = match self {
            Entity::Banner(e) => serde_json::to_value(e)?,
            Entity::About(e) => serde_json::to_value(e)?,
            Entity::Testimonial(e) => serde_json::to_value(e)?,
            Entity::Blog(e) => serde_json::to_value(e)?,
            Entity::Listing(_, e) => serde_json::to_value(e)?,
        };
        Ok(value)
    }

    /// Decode one record of `kind`, unwrapping a `{"data": ...}` envelope
    pub fn parse(kind: EntityKind, value: Value) -> Result<Self> {
        let value = unwrap_envelope(value);
        let entity = match kind {
            EntityKind::Banner => Entity::Banner(serde_json::from_value(value)?),
            EntityKind::About => Entity::About(serde_json::from_value(value)?),
            EntityKind::Testimonial => Entity::Testimonial(serde_json::from_value(value)?),
            EntityKind::Blog => Entity::Blog(serde_json::from_value(value)?),
            EntityKind::Commercial | EntityKind::Residential | EntityKind::Plot => {
                Entity::Listing(kind, serde_json::from_value(value)?)
            }
        };
        Ok(entity)
    }

    /// Decode a collection response: a bare array or an enveloped one
    pub fn parse_list(kind: EntityKind, value: Value) -> Result<Vec<Self>> {
        match unwrap_envelope(value) {
            Value::Array(items) => items.into_iter().map(|v| Self::parse(kind, v)).collect(),
            Value::Null => Ok(Vec::new()),
            other => Err(Error::decode(format!(
                "expected a list of {}, got {}",
                kind.collection(),
                json_type_name(&other)
            ))),
        }
    }
}

fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.len() <= 3 => {
            for key in ["data", "items", "results"] {
                if let Some(inner) = map.remove(key) {
                    if inner.is_array() || inner.is_object() {
                        return inner;
                    }
                    map.insert(key.to_string(), inner);
                }
            }
            Value::Object(map)
        }
        other => other,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Accept strings, numbers and `null` for free-text values
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected text, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Accept a list, `null`, or a JSON-encoded list string for tag values
pub(crate) fn lenient_tags<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect()),
        Value::String(s) => Ok(crate::tags::parse_tag_input(&s)),
        other => Err(serde::de::Error::custom(format!(
            "expected tags, got {}",
            json_type_name(&other)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_collection_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_collection(kind.collection()), Some(kind));
            assert_eq!(kind.to_string().parse::<EntityKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_collection() {
        let err = "villas".parse::<EntityKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownCollection { .. }));
    }

    #[test]
    fn test_listing_kinds() {
        assert!(EntityKind::Plot.is_listing());
        assert!(!EntityKind::Blog.is_listing());
    }

    #[test]
    fn test_parse_list_bare_and_enveloped() {
        let bare = json!([{ "_id": "1", "name": "Asha", "message": "Great" }]);
        let wrapped = json!({ "success": true, "data": [{ "id": "2", "name": "Ravi" }] });

        let bare = Entity::parse_list(EntityKind::Testimonial, bare).unwrap();
        let wrapped = Entity::parse_list(EntityKind::Testimonial, wrapped).unwrap();

        assert_eq!(bare[0].id(), "1");
        assert_eq!(wrapped[0].id(), "2");
        assert_eq!(wrapped[0].kind(), EntityKind::Testimonial);
    }

    #[test]
    fn test_to_json_uses_server_names() {
        let entity = Entity::parse(
            EntityKind::Testimonial,
            json!({ "_id": "7", "name": "Asha", "image": "a.jpg" }),
        )
        .unwrap();
        let value = entity.to_json().unwrap();
        assert_eq!(value["id"], "7");
        assert_eq!(value["photo"], "a.jpg");
    }

    #[test]
    fn test_parse_list_rejects_scalar() {
        let err = Entity::parse_list(EntityKind::Blog, json!("nope")).unwrap_err();
        assert!(err.to_string().contains("a string"));
    }

    #[test]
    fn test_parse_listing_keeps_kind() {
        let value = json!({
            "_id": "p1",
            "title": "Palm Grove",
            "price": 4500000,
            "location": "Pune"
        });
        let entity = Entity::parse(EntityKind::Plot, value).unwrap();

        assert_eq!(entity.kind(), EntityKind::Plot);
        let summary = entity.summary();
        assert_eq!(summary.title, "Palm Grove");
        assert_eq!(summary.detail, "Pune · 4500000");
    }

    #[test]
    fn test_lenient_tags_from_string() {
        let value = json!({ "_id": "b1", "title": "T", "tags": "[\"Luxury\", \"Modern\"]" });
        let Entity::Blog(blog) = Entity::parse(EntityKind::Blog, value).unwrap() else {
            panic!("expected blog");
        };
        assert_eq!(blog.tags, vec!["Luxury", "Modern"]);
    }
}
