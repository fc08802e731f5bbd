pub mod contact_form;
pub mod gallery;
pub mod hero;
pub mod photo_modal;
pub mod property_detail;
pub mod site_nav;

use crate::utils::FALLBACK_IMG;
use web_sys::HtmlImageElement;
use yew::prelude::*;

/// `onerror` handler swapping a broken `<img>` to the placeholder once.
pub fn img_fallback() -> Callback<Event> {
    Callback::from(|e: Event| {
        if let Some(img) = e.target_dyn_into::<HtmlImageElement>() {
            if img.src() != FALLBACK_IMG {
                log::debug!("Image failed, using placeholder: {}", img.src());
                img.set_src(FALLBACK_IMG);
            }
        }
    })
}
