//! # Menu Models
//!
//! Record types for the project catalog. A project is served as a "drink":
//! every record carries a flavor (the drink taxonomy) alongside its regular
//! category, and the two axes are independent.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Drink taxonomy used as the thematic grouping axis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    Matcha,
    Chai,
    Espresso,
    Jasmine,
    Latte,
    #[default]
    Taro,
}

impl Flavor {
    /// All flavors in menu order
    pub fn all() -> Vec<Flavor> {
        vec![
            Flavor::Matcha,
            Flavor::Chai,
            Flavor::Espresso,
            Flavor::Jasmine,
            Flavor::Latte,
            Flavor::Taro,
        ]
    }

    /// Stable key used in URLs, `data-drink` attributes and JSON
    pub fn key(&self) -> &'static str {
        match self {
            Flavor::Matcha => "matcha",
            Flavor::Chai => "chai",
            Flavor::Espresso => "espresso",
            Flavor::Jasmine => "jasmine",
            Flavor::Latte => "latte",
            Flavor::Taro => "taro",
        }
    }

    /// Display name for the menu
    pub fn label(&self) -> &'static str {
        match self {
            Flavor::Matcha => "Matcha Latte",
            Flavor::Chai => "Chai Latte",
            Flavor::Espresso => "Espresso Shot",
            Flavor::Jasmine => "Jasmine Tea",
            Flavor::Latte => "Classic Latte",
            Flavor::Taro => "Taro Milk Tea",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Flavor::Matcha => "🍵",
            Flavor::Chai => "🍯",
            Flavor::Espresso => "🔥",
            Flavor::Jasmine => "🌸",
            Flavor::Latte => "🫘",
            Flavor::Taro => "💜",
        }
    }

    /// Pastel accent colour used for the card stroke
    pub fn stroke(&self) -> &'static str {
        match self {
            Flavor::Matcha => "#A7DCA9",
            Flavor::Chai => "#F5D08A",
            Flavor::Espresso => "#C4C0BA",
            Flavor::Jasmine => "#F9B7CF",
            Flavor::Latte => "#EEC6C0",
            Flavor::Taro => "#C8B6FF",
        }
    }

    /// Stylesheet class for the flavor's badge and button
    pub fn badge_class(&self) -> String {
        format!("badge-{}", self.key())
    }

    /// Resolve a flavor key, falling back to the default flavor when the key
    /// is not part of the menu.
    pub fn from_key_or_default(key: &str) -> Flavor {
        key.parse().unwrap_or_else(|_| {
            tracing::warn!(
                key,
                fallback = Flavor::default().key(),
                "Unknown flavor key, using default"
            );
            Flavor::default()
        })
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Flavor {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Flavor::all()
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Deserialize a flavor key leniently: unknown or missing keys become the
/// default flavor instead of failing the whole catalog.
pub fn lenient_flavor<'de, D>(deserializer: D) -> Result<Flavor, D::Error>
where
    D: Deserializer<'de>,
{
    let key: Option<String> = Option::deserialize(deserializer)?;
    Ok(match key {
        Some(key) => Flavor::from_key_or_default(&key),
        None => Flavor::default(),
    })
}

/// Project category (the tabs above the grid)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Pipelines,
    Markets,
    Analytics,
    #[serde(rename = "ETL")]
    Etl,
    Research,
}

impl Category {
    pub fn all() -> Vec<Category> {
        vec![
            Category::Pipelines,
            Category::Markets,
            Category::Analytics,
            Category::Etl,
            Category::Research,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Pipelines => "Pipelines",
            Category::Markets => "Markets",
            Category::Analytics => "Analytics",
            Category::Etl => "ETL",
            Category::Research => "Research",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::all()
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Returned when a string names no known flavor or category
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value: {0}")]
pub struct UnknownVariant(pub String);

/// External links of a project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Links {
    /// Repository URL (always present)
    pub primary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writeup: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
}

impl Links {
    pub fn repo(url: impl Into<String>) -> Self {
        Self {
            primary: url.into(),
            writeup: None,
            demo: None,
        }
    }
}

/// A project on the menu
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectRecord {
    /// Stable identifier, doubles as the card's DOM anchor
    pub id: String,
    #[serde(default, deserialize_with = "lenient_flavor")]
    pub flavor_key: Flavor,
    pub name: String,
    pub category: Category,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub impact: String,
    pub links: Links,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ProjectRecord {
    /// Image reference, if one is set and non-empty
    pub fn image_ref(&self) -> Option<&str> {
        self.image.as_deref().filter(|path| !path.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flavor_keys_round_trip_through_from_str() {
        for flavor in Flavor::all() {
            assert_eq!(flavor.key().parse::<Flavor>(), Ok(flavor));
        }
        assert_eq!("MATCHA".parse::<Flavor>(), Ok(Flavor::Matcha));
        assert!("mocha".parse::<Flavor>().is_err());
    }

    #[test]
    fn test_unknown_flavor_falls_back_to_default() {
        assert_eq!(Flavor::from_key_or_default("mocha"), Flavor::Taro);
        assert_eq!(Flavor::from_key_or_default("chai"), Flavor::Chai);
    }

    #[test]
    fn test_record_deserialization_with_unknown_flavor() {
        let json = r#"{
            "id": "demo",
            "flavor_key": "pumpkin-spice",
            "name": "Demo",
            "category": "ETL",
            "description": "A demo project",
            "links": { "primary": "https://example.com/demo" }
        }"#;
        let record: ProjectRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.flavor_key, Flavor::Taro);
        assert_eq!(record.category, Category::Etl);
        assert!(record.technologies.is_empty());
        assert!(record.image_ref().is_none());
    }

    #[test]
    fn test_record_deserialization_without_flavor() {
        let json = r#"{
            "id": "demo",
            "name": "Demo",
            "category": "Markets",
            "description": "",
            "links": { "primary": "https://example.com/demo" }
        }"#;
        let record: ProjectRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.flavor_key, Flavor::default());
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::Etl.label(), "ETL");
        assert_eq!("etl".parse::<Category>(), Ok(Category::Etl));
        assert_eq!(serde_json::to_string(&Category::Etl).unwrap(), "\"ETL\"");
    }

    #[test]
    fn test_blank_image_is_treated_as_absent() {
        let mut record: ProjectRecord = serde_json::from_str(
            r#"{"id":"x","name":"X","category":"Research","description":"","links":{"primary":"u"},"image":"  "}"#,
        )
        .unwrap();
        assert!(record.image_ref().is_none());
        record.image = Some("/cafe/taro.jpg".to_string());
        assert_eq!(record.image_ref(), Some("/cafe/taro.jpg"));
    }
}
