// src/utils.rs
use crate::property_data::{PropertyLink, PropertyRecord};
use std::collections::HashSet;
use web_sys::window;

/// Placeholder shown wherever a photo is missing or fails to load.
pub const FALLBACK_IMG: &str = "data:image/svg+xml;charset=UTF-8,\
%3Csvg xmlns='http://www.w3.org/2000/svg' width='1200' height='800'%3E\
%3Cdefs%3E%3ClinearGradient id='g' x1='0' y1='0' x2='1' y2='1'%3E\
%3Cstop offset='0' stop-color='%230b1220'/%3E%3Cstop offset='1' stop-color='%2313213f'/%3E\
%3C/linearGradient%3E%3C/defs%3E\
%3Crect width='100%25' height='100%25' fill='url(%23g)'/%3E\
%3Ctext x='50%25' y='48%25' fill='%23ffffff' opacity='0.85' font-size='44' font-family='Arial' text-anchor='middle'%3EPhotos coming soon%3C/text%3E\
%3C/svg%3E";

/// Get the base URL for the application
/// This handles both root hosting and project-page hosting under a sub-path
pub fn get_base_url() -> String {
    if let Some(window) = window() {
        if let Ok(pathname) = window.location().pathname() {
            return base_from_pathname(&pathname);
        }
    }
    String::new()
}

/// Directory part of a pathname without the trailing slash.
pub fn base_from_pathname(pathname: &str) -> String {
    match pathname.rfind('/') {
        Some(i) => pathname[..i].to_string(),
        None => String::new(),
    }
}

/// Build a resource URL with the correct base path
pub fn resource_url(path: &str) -> String {
    join_base(&get_base_url(), path)
}

pub fn join_base(base: &str, path: &str) -> String {
    if path.starts_with("data:") || path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let clean_path = path.trim_start_matches('/');
    format!("{}/{}", base.trim_end_matches('/'), clean_path)
}

/// Empty stays empty, scheme-less URLs get `https://`.
pub fn ensure_https(url: &str) -> String {
    let u = url.trim();
    if u.is_empty() {
        String::new()
    } else if u.starts_with("http://") || u.starts_with("https://") {
        u.to_string()
    } else {
        format!("https://{}", u)
    }
}

/// CSS `background-image` declaration for `src`. Double-quoted, since the
/// placeholder data URI carries single quotes.
pub fn background_image(src: &str) -> String {
    format!("background-image: url(\"{}\");", src.replace('"', "%22"))
}

/// Collapses whitespace and cuts at `max` characters with an ellipsis.
pub fn clamp_text(text: &str, max: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max {
        return collapsed;
    }
    let cut: String = collapsed.chars().take(max).collect();
    format!("{}…", cut.trim_end())
}

pub fn safe_amenities(record: &PropertyRecord) -> Vec<String> {
    let list: Vec<String> = record
        .amenities
        .iter()
        .filter(|a| !a.trim().is_empty())
        .cloned()
        .collect();
    if list.is_empty() {
        vec!["See listing for amenities".to_string()]
    } else {
        list
    }
}

/// Drops empty and repeated entries, keeping first occurrences in order.
pub fn unique_images<I, S>(list: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    list.into_iter()
        .map(Into::into)
        .filter(|u| !u.is_empty() && seen.insert(u.clone()))
        .collect()
}

/// The `primary` link if there is one, else the first link with a URL.
pub fn primary_booking_link(record: &PropertyRecord) -> Option<String> {
    let has_url = |l: &&PropertyLink| !l.url.trim().is_empty();
    record
        .links
        .iter()
        .filter(has_url)
        .find(|l| l.is_primary())
        .or_else(|| record.links.iter().find(has_url))
        .map(|l| ensure_https(&l.url))
}

pub fn current_year() -> u32 {
    js_sys::Date::new_0().get_full_year()
}

pub fn scroll_to_top() {
    if let Some(window) = window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

pub fn scroll_into_view(id: &str) {
    match gloo_utils::document().get_element_by_id(id) {
        Some(el) => el.scroll_into_view(),
        None => log::warn!("Section #{} not found", id),
    }
}

/// Locks page scrolling while a modal is open.
pub fn set_body_scroll_locked(locked: bool) {
    if let Some(body) = gloo_utils::document().body() {
        let value = if locked { "hidden" } else { "" };
        if body.style().set_property("overflow", value).is_err() {
            log::warn!("Could not set body overflow");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property_data::LinkStyle;

    #[test]
    fn test_resource_url_formatting() {
        assert_eq!(join_base("", "/assets/images/a-1.jpg"), "/assets/images/a-1.jpg");
        assert_eq!(join_base("/site", "assets/images/a-1.jpg"), "/site/assets/images/a-1.jpg");
        assert_eq!(join_base("/site", FALLBACK_IMG), FALLBACK_IMG);
    }

    #[test]
    fn test_base_from_pathname() {
        assert_eq!(base_from_pathname("/"), "");
        assert_eq!(base_from_pathname("/index.html"), "");
        assert_eq!(base_from_pathname("/high-altitude/"), "/high-altitude");
        assert_eq!(base_from_pathname("/high-altitude/index.html"), "/high-altitude");
    }

    #[test]
    fn test_ensure_https() {
        assert_eq!(ensure_https("  "), "");
        assert_eq!(ensure_https("airbnb.com/h/x"), "https://airbnb.com/h/x");
        assert_eq!(ensure_https("http://a.b"), "http://a.b");
    }

    #[test]
    fn test_clamp_text() {
        assert_eq!(clamp_text("  a \n b  ", 10), "a b");
        assert_eq!(clamp_text("hello wonderful world", 6), "hello…");
    }

    #[test]
    fn test_unique_images() {
        let out = unique_images(vec!["a", "", "b", "a", "c"]);
        assert_eq!(out, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_safe_amenities_default() {
        let record = PropertyRecord::new("a", "A");
        assert_eq!(safe_amenities(&record), vec!["See listing for amenities"]);
    }

    #[test]
    fn test_primary_booking_link() {
        let record = PropertyRecord::new("a", "A")
            .with_link("Airbnb", "airbnb.com/h/a", LinkStyle::Ghost)
            .with_link("Direct", "", LinkStyle::Primary)
            .with_link("Book Direct", "checkout.example.com/a", LinkStyle::Primary);
        assert_eq!(
            primary_booking_link(&record).as_deref(),
            Some("https://checkout.example.com/a")
        );

        let plain =
            PropertyRecord::new("b", "B").with_link("Airbnb", "airbnb.com/h/b", LinkStyle::Ghost);
        assert_eq!(primary_booking_link(&plain).as_deref(), Some("https://airbnb.com/h/b"));
        assert_eq!(primary_booking_link(&PropertyRecord::new("c", "C")), None);
    }

    #[test]
    fn test_background_image_keeps_placeholder_intact() {
        let style = background_image(FALLBACK_IMG);
        let inner = style
            .strip_prefix("background-image: url(\"")
            .and_then(|s| s.strip_suffix("\");"))
            .unwrap();
        assert_eq!(inner, FALLBACK_IMG);
        assert!(!inner.contains('"'));
        assert_eq!(style.matches('"').count(), 2);

        assert_eq!(
            background_image("a\"b.jpg"),
            "background-image: url(\"a%22b.jpg\");"
        );
    }
}
