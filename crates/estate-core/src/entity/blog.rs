//! Blog posts with nested points and sub-points

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{lenient_string, lenient_tags};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Blog {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub slug: String,
    #[serde(deserialize_with = "lenient_string")]
    pub author: String,
    #[serde(deserialize_with = "lenient_string")]
    pub excerpt: String,
    #[serde(alias = "image")]
    pub cover_image: Option<String>,
    #[serde(deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    pub published: bool,
    pub points: Vec<BlogPoint>,
    pub created_at: Option<DateTime<Utc>>,
}

/// A section of a blog post
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogPoint {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    pub image: Option<String>,
    #[serde(alias = "subpoints")]
    pub sub_points: Vec<SubPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubPoint {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blog_with_nested_points() {
        let blog: Blog = serde_json::from_value(json!({
            "_id": "x1",
            "title": "Buying your first home",
            "published": true,
            "createdAt": "2024-03-01T10:00:00Z",
            "points": [
                {
                    "title": "Budget",
                    "subpoints": [{ "title": "EMI" }, { "title": "Down payment" }]
                }
            ]
        }))
        .unwrap();

        assert!(blog.published);
        assert!(blog.created_at.is_some());
        assert_eq!(blog.points[0].sub_points.len(), 2);
        assert_eq!(blog.points[0].sub_points[1].title, "Down payment");
    }
}
