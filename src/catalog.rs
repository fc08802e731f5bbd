// src/catalog.rs
use crate::error::SiteError;
use crate::property_data::PropertyRecord;
use std::collections::HashSet;
use std::rc::Rc;

const EMBEDDED_CATALOG: &str = include_str!("../public/properties.json");

/// Ordered, read-only list of property records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyCatalog {
    records: Rc<Vec<PropertyRecord>>,
}

impl PropertyCatalog {
    pub fn new(records: Vec<PropertyRecord>) -> Self {
        let mut seen = HashSet::new();
        let records = records
            .into_iter()
            .filter(|record| {
                let slug = record.slug.trim();
                if slug.is_empty() {
                    log::warn!("Dropping property without slug: {:?}", record.title);
                    return false;
                }
                if !seen.insert(slug.to_string()) {
                    log::warn!("Dropping duplicate property slug: {}", slug);
                    return false;
                }
                true
            })
            .collect();

        Self {
            records: Rc::new(records),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SiteError> {
        let records: Vec<PropertyRecord> = serde_json::from_str(json)?;
        Ok(Self::new(records))
    }

    /// The table compiled into the binary. A malformed table yields an
    /// empty catalog so the rest of the page still renders.
    pub fn load_embedded() -> Self {
        match Self::from_json(EMBEDDED_CATALOG) {
            Ok(catalog) => {
                log::info!("Loaded {} properties", catalog.len());
                catalog
            }
            Err(e) => {
                log::error!("{}", e);
                Self::default()
            }
        }
    }

    pub fn all(&self) -> &[PropertyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn featured(&self) -> Vec<&PropertyRecord> {
        self.records.iter().filter(|p| p.featured).collect()
    }

    /// Exact match first, then a case-insensitive pass.
    pub fn find(&self, slug: &str) -> Option<&PropertyRecord> {
        let slug = slug.trim();
        if slug.is_empty() {
            return None;
        }
        self.records
            .iter()
            .find(|p| p.slug == slug)
            .or_else(|| self.records.iter().find(|p| p.slug.eq_ignore_ascii_case(slug)))
    }

    pub fn resolve(&self, slug: &str) -> Result<&PropertyRecord, SiteError> {
        self.find(slug)
            .ok_or_else(|| SiteError::UnknownSlug(slug.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PropertyCatalog {
        PropertyCatalog::new(vec![
            PropertyRecord::new("Rustic-Roots", "Rustic Roots").with_featured(true),
            PropertyRecord::new("aspenlogcabin", "Aspen Log Cabin"),
            PropertyRecord::new("", "No slug"),
            PropertyRecord::new("aspenlogcabin", "Duplicate"),
            PropertyRecord::new("olliespost", "Ollie's Post").with_featured(true),
        ])
    }

    #[test]
    fn test_drops_blank_and_duplicate_slugs() {
        let catalog = sample();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.find("aspenlogcabin").unwrap().title, "Aspen Log Cabin");
    }

    #[test]
    fn test_find_case_insensitive_fallback() {
        let catalog = sample();
        assert_eq!(catalog.find("rustic-roots").unwrap().slug, "Rustic-Roots");
        assert_eq!(catalog.find("OLLIESPOST").unwrap().slug, "olliespost");
        assert!(catalog.find("  ").is_none());
        assert!(matches!(
            catalog.resolve("missing"),
            Err(SiteError::UnknownSlug(s)) if s == "missing"
        ));
    }

    #[test]
    fn test_featured_keeps_order() {
        let catalog = sample();
        let slugs: Vec<&str> = catalog.featured().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["Rustic-Roots", "olliespost"]);
    }

    #[test]
    fn test_embedded_table_parses() {
        let catalog = PropertyCatalog::from_json(EMBEDDED_CATALOG).unwrap();
        assert!(!catalog.is_empty());
        assert!(!catalog.featured().is_empty());
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(matches!(
            PropertyCatalog::from_json("{not json"),
            Err(SiteError::Catalog(_))
        ));
    }
}
