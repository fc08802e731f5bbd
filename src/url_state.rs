// src/url_state.rs
use crate::error::SiteError;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Same reserved set as `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const PROPERTY_PARAM: &str = "property";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Home,
    Properties,
    About,
    Contact,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Home,
        Section::Properties,
        Section::About,
        Section::Contact,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Properties => "properties",
            Section::About => "about",
            Section::Contact => "contact",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Properties => "Properties",
            Section::About => "About",
            Section::Contact => "Contact",
        }
    }

    pub fn from_id(id: &str) -> Option<Section> {
        let id = id.trim();
        Section::ALL
            .iter()
            .copied()
            .find(|s| s.id().eq_ignore_ascii_case(id))
    }
}

/// Where the user is, as read from the URL. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub section: String,
    pub property_slug: Option<String>,
}

impl NavigationState {
    pub fn home() -> Self {
        Self::section(Section::Home)
    }

    pub fn gallery() -> Self {
        Self::section(Section::Properties)
    }

    pub fn section(section: Section) -> Self {
        Self {
            section: section.id().to_string(),
            property_slug: None,
        }
    }

    pub fn property(slug: &str) -> Self {
        Self {
            section: Section::Properties.id().to_string(),
            property_slug: Some(slug.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// New history entry, for user-initiated navigation.
    Push,
    /// Rewrite the current entry, for normalisation.
    Replace,
}

/// The parts of a document location the router cares about. `search`
/// keeps its leading `?` and `hash` its leading `#`, as `window.location`
/// reports them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub pathname: String,
    pub search: String,
    pub hash: String,
}

impl Location {
    pub fn new(pathname: &str, search: &str, hash: &str) -> Self {
        Self {
            pathname: pathname.to_string(),
            search: search.to_string(),
            hash: hash.to_string(),
        }
    }

    /// Splits a path-relative href (`/path?query#fragment`). Scheme and
    /// host, if present, are dropped.
    pub fn from_href(href: &str) -> Self {
        let rest = match href.find("://") {
            Some(pos) => {
                let after = &href[pos + 3..];
                match after.find(|c| c == '/' || c == '?' || c == '#') {
                    Some(i) => &after[i..],
                    None => "",
                }
            }
            None => href,
        };

        let (before_hash, hash) = match rest.find('#') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, ""),
        };
        let (pathname, search) = match before_hash.find('?') {
            Some(i) => (&before_hash[..i], &before_hash[i..]),
            None => (before_hash, ""),
        };

        Self::new(pathname, search, hash)
    }

    pub fn current() -> Result<Self, SiteError> {
        let location = gloo_utils::window().location();
        Ok(Self {
            pathname: location.pathname()?,
            search: location.search()?,
            hash: location.hash()?,
        })
    }

    pub fn href(&self) -> String {
        format!("{}{}{}", self.pathname, self.search, self.hash)
    }

    fn fragment_parts(&self) -> (&str, &str) {
        let fragment = self.hash.trim_start_matches('#');
        match fragment.find('?') {
            Some(i) => (&fragment[..i], &fragment[i + 1..]),
            None => (fragment, ""),
        }
    }

    fn has_outer_property(&self) -> bool {
        query_pairs(&self.search).any(|(key, _)| key == PROPERTY_PARAM)
    }
}

/// Reads the section and slug out of a location. The fragment's own query
/// takes priority over the outer query string.
pub fn parse(location: &Location) -> NavigationState {
    let (section, fragment_query) = location.fragment_parts();
    let section = section.trim();
    let section = if section.is_empty() {
        Section::Home.id().to_string()
    } else {
        section.to_string()
    };

    let property_slug = query_param(fragment_query, PROPERTY_PARAM)
        .or_else(|| query_param(&location.search, PROPERTY_PARAM));

    NavigationState {
        section,
        property_slug,
    }
}

/// The href `state` should be written as, relative to `location`.
/// With `strip_outer_property` the outer `?property=` is always removed so
/// the fragment form is the only one left in the address bar.
pub fn href_for(
    location: &Location,
    state: &NavigationState,
    strip_outer_property: bool,
) -> String {
    let search = if strip_outer_property {
        strip_param(&location.search, PROPERTY_PARAM)
    } else {
        location.search.clone()
    };

    let section = if state.section.trim().is_empty() {
        Section::Home.id()
    } else {
        state.section.trim()
    };
    let slug = state
        .property_slug
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let hash = match slug {
        Some(slug) => format!(
            "#{}?{}={}",
            section,
            PROPERTY_PARAM,
            utf8_percent_encode(slug, COMPONENT)
        ),
        None if section == Section::Home.id() => String::new(),
        None => format!("#{}", section),
    };

    let pathname = if location.pathname.is_empty() {
        "/"
    } else {
        location.pathname.as_str()
    };

    format!("{}{}{}", pathname, search, hash)
}

/// Rewrites a legacy `?property=slug` link into the fragment form. Returns
/// the replacement href, or `None` when the location is already canonical.
pub fn normalize(location: &Location) -> Option<String> {
    if !location.has_outer_property() {
        return None;
    }

    let mut state = parse(location);
    if state.property_slug.is_some() {
        state.section = Section::Properties.id().to_string();
    }
    Some(href_for(location, &state, true))
}

/// Writes `state` into the address bar without reloading.
pub fn write(
    state: &NavigationState,
    mode: HistoryMode,
    strip_outer_property: bool,
) -> Result<(), SiteError> {
    let location = Location::current()?;
    let href = href_for(&location, state, strip_outer_property);
    if href == location.href() {
        return Ok(());
    }

    let history = gloo_utils::window().history()?;
    let state_obj = wasm_bindgen::JsValue::NULL;
    match mode {
        HistoryMode::Push => history.push_state_with_url(&state_obj, "", Some(&href))?,
        HistoryMode::Replace => history.replace_state_with_url(&state_obj, "", Some(&href))?,
    }
    log::debug!("{:?} {}", mode, href);
    Ok(())
}

fn query_pairs(query: &str) -> impl Iterator<Item = (&str, &str)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.find('=') {
            Some(i) => (&pair[..i], &pair[i + 1..]),
            None => (pair, ""),
        })
}

/// First value of `key`, decoded. Blank or undecodable values count as absent.
fn query_param(query: &str, key: &str) -> Option<String> {
    let (_, raw) = query_pairs(query).find(|(k, _)| *k == key)?;
    let decoded = decode_component(raw)?;
    let trimmed = decoded.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn decode_component(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                log::warn!("Malformed escape in query value: {}", raw);
                return None;
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    let spaced = raw.replace('+', " ");
    match percent_decode_str(&spaced).decode_utf8() {
        Ok(value) => Some(value.into_owned()),
        Err(e) => {
            log::warn!("Undecodable query value {}: {}", raw, e);
            None
        }
    }
}

fn strip_param(search: &str, key: &str) -> String {
    let kept: Vec<String> = query_pairs(search)
        .filter(|(k, _)| *k != key)
        .map(|(k, v)| {
            if v.is_empty() {
                k.to_string()
            } else {
                format!("{}={}", k, v)
            }
        })
        .collect();

    if kept.is_empty() {
        String::new()
    } else {
        format!("?{}", kept.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PropertyCatalog;

    #[test]
    fn test_empty_location_is_home() {
        let state = parse(&Location::new("/", "", ""));
        assert_eq!(state, NavigationState::home());
        let state = parse(&Location::new("/", "", "#"));
        assert_eq!(state, NavigationState::home());
    }

    #[test]
    fn test_fragment_with_embedded_property() {
        let state = parse(&Location::new("/", "", "#properties?property=aspenlogcabin"));
        assert_eq!(state, NavigationState::property("aspenlogcabin"));
    }

    #[test]
    fn test_outer_query_fallback() {
        let state = parse(&Location::new("/", "?property=olliespost", ""));
        assert_eq!(state.section, "home");
        assert_eq!(state.property_slug.as_deref(), Some("olliespost"));
    }

    #[test]
    fn test_fragment_wins_over_outer_query() {
        let location = Location::new("/", "?property=outer", "#properties?property=inner");
        assert_eq!(parse(&location).property_slug.as_deref(), Some("inner"));
    }

    #[test]
    fn test_blank_fragment_slug_falls_back_to_outer() {
        let location = Location::new("/", "?property=outer", "#properties?property=%20");
        assert_eq!(parse(&location).property_slug.as_deref(), Some("outer"));
    }

    #[test]
    fn test_whitespace_and_bad_escapes_are_absent() {
        let blank = parse(&Location::new("/", "", "#properties?property=+++"));
        assert_eq!(blank.property_slug, None);

        let malformed = parse(&Location::new("/", "", "#properties?property=%E0%A4%A"));
        assert_eq!(malformed.property_slug, None);
        assert_eq!(malformed.section, "properties");

        let bad_utf8 = parse(&Location::new("/", "", "#properties?property=%FF"));
        assert_eq!(bad_utf8.property_slug, None);
    }

    #[test]
    fn test_href_for_home_drops_fragment() {
        let location = Location::new("/site/", "", "#about");
        assert_eq!(href_for(&location, &NavigationState::home(), true), "/site/");
    }

    #[test]
    fn test_href_for_strips_only_property_param() {
        let location = Location::new("/", "?utm=x&property=old", "");
        let href = href_for(&location, &NavigationState::gallery(), true);
        assert_eq!(href, "/?utm=x#properties");

        let kept = href_for(&location, &NavigationState::gallery(), false);
        assert_eq!(kept, "/?utm=x&property=old#properties");
    }

    #[test]
    fn test_round_trip_through_href() {
        let base = Location::new("/", "", "");
        for slug in ["Rustic-Roots", "80acreprivatemountainresort", "notre rêve"] {
            let state = NavigationState::property(slug);
            let href = href_for(&base, &state, true);
            assert_eq!(parse(&Location::from_href(&href)), state);
        }
    }

    #[test]
    fn test_round_trip_every_catalog_slug() {
        let catalog = PropertyCatalog::load_embedded();
        assert!(!catalog.is_empty());
        let base = Location::new("/rentals/", "?utm=x", "#about");
        for record in catalog.all() {
            let state = NavigationState::property(&record.slug);
            let href = href_for(&base, &state, true);
            assert_eq!(parse(&Location::from_href(&href)), state, "slug {}", record.slug);
        }
    }

    #[test]
    fn test_normalize_legacy_query() {
        let location = Location::new("/index.html", "?property=olliespost", "");
        assert_eq!(
            normalize(&location).as_deref(),
            Some("/index.html#properties?property=olliespost")
        );
        assert_eq!(normalize(&Location::new("/", "", "#properties")), None);
    }

    #[test]
    fn test_from_href_absolute() {
        let location = Location::from_href("https://example.com/a/b?x=1#contact");
        assert_eq!(location, Location::new("/a/b", "?x=1", "#contact"));
    }

    #[test]
    fn test_section_from_id() {
        assert_eq!(Section::from_id("Properties"), Some(Section::Properties));
        assert_eq!(Section::from_id("reviews"), None);
    }
}
