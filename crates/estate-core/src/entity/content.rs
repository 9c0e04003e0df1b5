//! Homepage banners, About-Us blocks and testimonials

use serde::{Deserialize, Serialize};

use super::lenient_string;

/// Homepage hero banner
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomeBanner {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    pub subtitle: Option<String>,
    pub link: Option<String>,
    pub order: Option<i64>,
    #[serde(alias = "image")]
    pub desktop_image: Option<String>,
    pub mobile_image: Option<String>,
}

/// One "About Us" content block
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutBlock {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string", alias = "title")]
    pub heading: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    pub image: Option<String>,
    pub values: Vec<AboutValue>,
}

/// A company value shown inside an About-Us block
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutValue {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    pub icon: Option<String>,
}

/// Customer testimonial
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Testimonial {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub designation: String,
    #[serde(deserialize_with = "lenient_string")]
    pub message: String,
    pub rating: Option<u8>,
    #[serde(alias = "image")]
    pub photo: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_banner_accepts_flat_image_key() {
        let banner: HomeBanner = serde_json::from_value(json!({
            "_id": "b1",
            "title": "Monsoon offers",
            "image": "/uploads/hero.jpg",
            "mobileImage": "/uploads/hero-m.jpg"
        }))
        .unwrap();

        assert_eq!(banner.id, "b1");
        assert_eq!(banner.desktop_image.as_deref(), Some("/uploads/hero.jpg"));
        assert_eq!(banner.mobile_image.as_deref(), Some("/uploads/hero-m.jpg"));
    }

    #[test]
    fn test_about_block_with_values() {
        let block: AboutBlock = serde_json::from_value(json!({
            "id": "a1",
            "heading": "Who we are",
            "values": [{ "title": "Trust", "description": null }]
        }))
        .unwrap();

        assert_eq!(block.values.len(), 1);
        assert_eq!(block.values[0].description, "");
    }

    #[test]
    fn test_testimonial_defaults() {
        let t: Testimonial = serde_json::from_value(json!({ "name": "Meera" })).unwrap();
        assert_eq!(t.rating, None);
        assert!(t.id.is_empty());
    }
}
