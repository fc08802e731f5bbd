// src/router.rs
use crate::catalog::PropertyCatalog;
use crate::url_state::{NavigationState, Section};

/// What the properties section is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyView {
    Gallery,
    /// Canonical slug as stored in the catalog.
    Detail(String),
}

/// Result of one `activate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    /// Visible output differs from before the call.
    pub changed: bool,
    /// The incoming state had to be corrected and the address bar should be
    /// rewritten (replace mode) with `SectionRouter::state`.
    pub needs_rewrite: bool,
}

/// Single source of truth for which section, and which property, is on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRouter {
    active: Section,
    view: PropertyView,
}

impl Default for SectionRouter {
    fn default() -> Self {
        Self {
            active: Section::Home,
            view: PropertyView::Gallery,
        }
    }
}

impl SectionRouter {
    /// Router already showing `state`, so the first paint is the final one.
    pub fn from_state(state: &NavigationState, catalog: &PropertyCatalog) -> (Self, Activation) {
        let mut router = Self::default();
        let activation = router.activate(state, catalog);
        (router, activation)
    }

    /// Recomputes visibility from scratch. Unknown sections fall back to
    /// home, a slug forces the properties section, and an unresolvable slug
    /// falls back to the gallery.
    pub fn activate(&mut self, state: &NavigationState, catalog: &PropertyCatalog) -> Activation {
        let mut needs_rewrite = false;

        let mut section = match Section::from_id(&state.section) {
            Some(section) => section,
            None => {
                log::warn!("Unknown section '{}', showing home", state.section);
                needs_rewrite = true;
                Section::Home
            }
        };

        let slug = state
            .property_slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        if slug.is_some() && section != Section::Properties {
            section = Section::Properties;
            needs_rewrite = true;
        }

        let view = match (section, slug) {
            (Section::Properties, Some(slug)) => match catalog.find(slug) {
                Some(record) => {
                    if record.slug != slug {
                        needs_rewrite = true;
                    }
                    PropertyView::Detail(record.slug.clone())
                }
                None => {
                    log::warn!("Property slug not found: {}", slug);
                    needs_rewrite = true;
                    PropertyView::Gallery
                }
            },
            _ => PropertyView::Gallery,
        };

        let changed = section != self.active || view != self.view;
        self.active = section;
        self.view = view;

        Activation {
            changed,
            needs_rewrite,
        }
    }

    pub fn active(&self) -> Section {
        self.active
    }

    pub fn is_active(&self, section: Section) -> bool {
        self.active == section
    }

    pub fn view(&self) -> &PropertyView {
        &self.view
    }

    pub fn hero_visible(&self) -> bool {
        self.active == Section::Home
    }

    /// Slug highlighted in the property picker, if any.
    pub fn active_slug(&self) -> Option<&str> {
        match &self.view {
            PropertyView::Detail(slug) if self.active == Section::Properties => Some(slug),
            _ => None,
        }
    }

    /// The canonical navigation state for what is currently shown.
    pub fn state(&self) -> NavigationState {
        match self.active_slug() {
            Some(slug) => NavigationState::property(slug),
            None => NavigationState::section(self.active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property_data::PropertyRecord;

    fn catalog() -> PropertyCatalog {
        PropertyCatalog::new(vec![
            PropertyRecord::new("a", "A"),
            PropertyRecord::new("b", "B"),
            PropertyRecord::new("Rustic-Roots", "Rustic Roots"),
        ])
    }

    fn visible(router: &SectionRouter) -> Vec<Section> {
        Section::ALL
            .iter()
            .copied()
            .filter(|s| router.is_active(*s))
            .collect()
    }

    #[test]
    fn test_exactly_one_section_active() {
        let catalog = catalog();
        let mut router = SectionRouter::default();
        for section in Section::ALL {
            router.activate(&NavigationState::section(section), &catalog);
            assert_eq!(visible(&router), vec![section]);
            assert_eq!(router.hero_visible(), section == Section::Home);
        }
    }

    #[test]
    fn test_unknown_section_defaults_home() {
        let mut router = SectionRouter::default();
        router.activate(&NavigationState::gallery(), &catalog());
        let state = NavigationState {
            section: "pricing".to_string(),
            property_slug: None,
        };
        let activation = router.activate(&state, &catalog());
        assert_eq!(router.active(), Section::Home);
        assert!(activation.changed);
        assert!(activation.needs_rewrite);
    }

    #[test]
    fn test_deep_link_goes_straight_to_detail() {
        let (router, activation) =
            SectionRouter::from_state(&NavigationState::property("b"), &catalog());
        assert_eq!(router.active(), Section::Properties);
        assert_eq!(router.view(), &PropertyView::Detail("b".to_string()));
        assert_eq!(router.active_slug(), Some("b"));
        assert!(!activation.needs_rewrite);
    }

    #[test]
    fn test_slug_forces_properties_section() {
        let state = NavigationState {
            section: "home".to_string(),
            property_slug: Some("a".to_string()),
        };
        let (router, activation) = SectionRouter::from_state(&state, &catalog());
        assert_eq!(router.active(), Section::Properties);
        assert!(activation.needs_rewrite);
        assert_eq!(router.state(), NavigationState::property("a"));
    }

    #[test]
    fn test_case_insensitive_slug_is_canonicalised() {
        let (router, activation) =
            SectionRouter::from_state(&NavigationState::property("rustic-roots"), &catalog());
        assert_eq!(router.active_slug(), Some("Rustic-Roots"));
        assert!(activation.needs_rewrite);
    }

    #[test]
    fn test_unknown_slug_falls_back_to_gallery() {
        let (router, activation) =
            SectionRouter::from_state(&NavigationState::property("zzz"), &catalog());
        assert_eq!(router.view(), &PropertyView::Gallery);
        assert_eq!(router.active_slug(), None);
        assert!(activation.needs_rewrite);
        assert_eq!(router.state(), NavigationState::gallery());
    }

    #[test]
    fn test_activate_is_idempotent() {
        let catalog = catalog();
        let mut router = SectionRouter::default();
        let state = NavigationState::property("a");
        assert!(router.activate(&state, &catalog).changed);
        let before = router.clone();
        let again = router.activate(&state, &catalog);
        assert!(!again.changed);
        assert_eq!(router, before);
    }

    #[test]
    fn test_back_returns_to_gallery() {
        let catalog = catalog();
        let (mut router, _) = SectionRouter::from_state(&NavigationState::gallery(), &catalog);
        let previous = router.state();
        router.activate(&NavigationState::property("b"), &catalog);
        assert_eq!(router.active_slug(), Some("b"));

        router.activate(&previous, &catalog);
        assert_eq!(router.state(), NavigationState::gallery());
        assert_eq!(router.active_slug(), None);
    }
}
