// src/share.rs
use crate::error::SiteError;
use crate::url_state::{href_for, Location, NavigationState};
use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Copied,
    Prompted,
}

/// Deep link to a property: the slug lives in the fragment and the outer
/// query string is dropped.
pub fn share_url_for_slug(current_href: &str, slug: &str) -> String {
    let (origin, location) = split_origin(current_href);
    let location = Location {
        search: String::new(),
        ..location
    };
    format!(
        "{}{}",
        origin,
        href_for(&location, &NavigationState::property(slug), true)
    )
}

fn split_origin(href: &str) -> (String, Location) {
    let location = Location::from_href(href);
    let origin = match href.find("://") {
        Some(pos) => {
            let after = &href[pos + 3..];
            let end = after
                .find(|c| c == '/' || c == '?' || c == '#')
                .unwrap_or(after.len());
            href[..pos + 3 + end].to_string()
        }
        None => String::new(),
    };
    (origin, location)
}

/// Native share sheet, then clipboard, then a manual-copy prompt.
pub async fn copy_share_link(slug: &str) -> ShareOutcome {
    let window = gloo_utils::window();
    let href = window.location().href().unwrap_or_default();
    let url = share_url_for_slug(&href, slug);

    match native_share(&url).await {
        Ok(()) => return ShareOutcome::Shared,
        Err(e) => log::debug!("Native share unavailable: {}", e),
    }

    match clipboard_write(&url).await {
        Ok(()) => {
            let _ = window.alert_with_message("Link copied to clipboard!");
            ShareOutcome::Copied
        }
        Err(e) => {
            log::warn!("Clipboard write failed: {}", e);
            let _ = window.prompt_with_message_and_default("Copy this link manually:", &url);
            ShareOutcome::Prompted
        }
    }
}

async fn native_share(url: &str) -> Result<(), SiteError> {
    let navigator = gloo_utils::window().navigator();
    let share = Reflect::get(&navigator, &JsValue::from_str("share"))?;
    let share: Function = share
        .dyn_into()
        .map_err(|_| SiteError::Js("navigator.share missing".to_string()))?;

    let data = Object::new();
    Reflect::set(&data, &"title".into(), &"Property Link".into())?;
    Reflect::set(&data, &"url".into(), &url.into())?;

    let promise: Promise = share.call1(&navigator, &data)?.dyn_into()?;
    JsFuture::from(promise).await?;
    Ok(())
}

async fn clipboard_write(url: &str) -> Result<(), SiteError> {
    let navigator = gloo_utils::window().navigator();
    let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(SiteError::Js("navigator.clipboard missing".to_string()));
    }
    let write: Function = Reflect::get(&clipboard, &JsValue::from_str("writeText"))?
        .dyn_into()
        .map_err(|_| SiteError::Js("clipboard.writeText missing".to_string()))?;

    let promise: Promise = write.call1(&clipboard, &url.into())?.dyn_into()?;
    JsFuture::from(promise).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url_state::parse;

    #[test]
    fn test_share_url_moves_slug_into_fragment() {
        let url = share_url_for_slug(
            "https://example.com/rentals/?property=old&utm=x#about",
            "aspenlogcabin",
        );
        assert_eq!(
            url,
            "https://example.com/rentals/#properties?property=aspenlogcabin"
        );
    }

    #[test]
    fn test_share_url_round_trips() {
        let url = share_url_for_slug("http://localhost:8080/", "Rustic-Roots");
        assert_eq!(
            parse(&Location::from_href(&url)),
            NavigationState::property("Rustic-Roots")
        );
    }
}
