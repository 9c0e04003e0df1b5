//! Property listings (commercial, residential and plot projects)
//!
//! All three listing categories share one project shape.

use serde::{Deserialize, Serialize};

use super::{lenient_string, lenient_tags};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Listing {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string", alias = "name")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub slug: String,
    #[serde(deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(deserialize_with = "lenient_string")]
    pub price: String,
    #[serde(deserialize_with = "lenient_string")]
    pub area: String,
    #[serde(deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(deserialize_with = "lenient_tags", alias = "keywords")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub meta_title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub meta_description: String,
    pub banner: Option<ListingBanner>,
    pub floor_plans: Vec<FloorPlan>,
    pub project_images: Vec<ProjectImage>,
    pub amenities: Vec<Amenity>,
    #[serde(alias = "projectUpdates")]
    pub updates: Vec<ProjectUpdate>,
    pub paragraphs: Vec<Paragraph>,
}

/// Listing hero banner as the backend stores it
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingBanner {
    #[serde(alias = "image", alias = "url")]
    pub desktop: Option<String>,
    #[serde(alias = "mobileImage", alias = "mobileUrl")]
    pub mobile: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub alt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FloorPlan {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub area: String,
    #[serde(deserialize_with = "lenient_string")]
    pub alt: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectImage {
    #[serde(deserialize_with = "lenient_string")]
    pub alt: String,
    #[serde(alias = "url")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Amenity {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    pub icon: Option<String>,
}

/// Construction progress entry
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectUpdate {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Paragraph {
    #[serde(deserialize_with = "lenient_string")]
    pub heading: String,
    #[serde(deserialize_with = "lenient_string")]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listing_full_shape() {
        let listing: Listing = serde_json::from_value(json!({
            "_id": "r1",
            "title": "Lakeview Residency",
            "price": "1.2 Cr",
            "keywords": ["Lake", "Gated"],
            "banner": { "image": "/b/desk.jpg", "mobileImage": "/b/mob.jpg", "alt": "Lake" },
            "floorPlans": [{ "title": "2BHK", "area": 1100, "image": "/f/2.png" }],
            "projectImages": [{ "alt": "Lobby", "url": "/i/lobby.jpg" }],
            "amenities": [{ "title": "Pool" }],
            "projectUpdates": [{ "title": "Slab 5 done", "date": "2024-01-10" }],
            "paragraphs": [{ "heading": "Overview", "text": "..." }]
        }))
        .unwrap();

        assert_eq!(listing.tags, vec!["Lake", "Gated"]);
        let banner = listing.banner.unwrap();
        assert_eq!(banner.desktop.as_deref(), Some("/b/desk.jpg"));
        assert_eq!(banner.mobile.as_deref(), Some("/b/mob.jpg"));
        assert_eq!(listing.floor_plans[0].area, "1100");
        let lobby = listing.project_images[0].image.as_deref();
        assert_eq!(lobby, Some("/i/lobby.jpg"));
        assert_eq!(listing.updates.len(), 1);
        assert_eq!(listing.paragraphs[0].heading, "Overview");
    }
}
