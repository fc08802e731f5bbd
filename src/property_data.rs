// src/property_data.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub rules: Vec<String>,
    #[serde(default)]
    pub links: Vec<PropertyLink>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub details: StayDetails,
    #[serde(default)]
    pub policies: Policies,
    #[serde(default)]
    pub overall_rating: Option<f32>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyLink {
    pub text: String,
    pub url: String,
    #[serde(default)]
    pub style: LinkStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStyle {
    Primary,
    #[default]
    #[serde(other)]
    Ghost,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StayDetails {
    pub location: Option<String>,
    pub sleeps: Option<u32>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<f32>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub pet_friendly: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Policies {
    pub cancellation_policy: Option<String>,
    pub payment_schedule: Option<String>,
    pub security_deposit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub text: String,
}

impl PropertyRecord {
    pub fn new(slug: &str, title: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            subtitle: String::new(),
            description: String::new(),
            amenities: Vec::new(),
            highlights: Vec::new(),
            rules: Vec::new(),
            links: Vec::new(),
            featured: false,
            details: StayDetails::default(),
            policies: Policies::default(),
            overall_rating: None,
            review_count: None,
            reviews: Vec::new(),
        }
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    pub fn with_link(mut self, text: &str, url: &str, style: LinkStyle) -> Self {
        self.links.push(PropertyLink {
            text: text.to_string(),
            url: url.to_string(),
            style,
        });
        self
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.slug
        } else {
            &self.title
        }
    }

    /// Description split on blank lines, one entry per paragraph.
    pub fn paragraphs(&self) -> Vec<&str> {
        self.description
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect()
    }
}

impl PropertyLink {
    pub fn is_primary(&self) -> bool {
        self.style == LinkStyle::Primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default() {
        let record: PropertyRecord = serde_json::from_str(r#"{"slug":"olliespost"}"#).unwrap();
        assert_eq!(record.slug, "olliespost");
        assert!(record.amenities.is_empty());
        assert!(!record.featured);
        assert_eq!(record.display_title(), "olliespost");
        assert!(record.details.sleeps.is_none());
    }

    #[test]
    fn test_link_style() {
        let json = r#"{"slug":"a","links":[
            {"text":"Book Direct","url":"https://x","style":"primary"},
            {"text":"Airbnb","url":"airbnb.com/h/a"},
            {"text":"Other","url":"y","style":"outline"}
        ]}"#;
        let record: PropertyRecord = serde_json::from_str(json).unwrap();
        assert!(record.links[0].is_primary());
        assert_eq!(record.links[1].style, LinkStyle::Ghost);
        assert_eq!(record.links[2].style, LinkStyle::Ghost);
    }

    #[test]
    fn test_paragraphs() {
        let mut record = PropertyRecord::new("a", "A");
        record.description = "First.\n\n  \n\nSecond line\nstill second.".to_string();
        assert_eq!(record.paragraphs(), vec!["First.", "Second line\nstill second."]);
    }
}
