// src/components/gallery.rs
use super::img_fallback;
use crate::catalog::PropertyCatalog;
use crate::config::SiteConfig;
use crate::utils::resource_url;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct GalleryProps {
    pub catalog: PropertyCatalog,
    pub config: Rc<SiteConfig>,
    pub on_select: Callback<String>,
}

/// Thumbnail grid, one cover image per property.
#[function_component(Gallery)]
pub fn gallery(props: &GalleryProps) -> Html {
    if props.catalog.is_empty() {
        return html! { <p class="muted">{"No properties available."}</p> };
    }

    html! {
        <div id="gallery-grid" class="gallery-grid">
            {for props.catalog.all().iter().map(|prop| {
                let on_click = {
                    let on_select = props.on_select.clone();
                    let slug = prop.slug.clone();
                    Callback::from(move |_: MouseEvent| on_select.emit(slug.clone()))
                };
                let cover = resource_url(&props.config.cover_path(&prop.slug));

                html! {
                    <div class="gallery-block" key={prop.slug.clone()}>
                        <button
                            type="button"
                            class="gallery-item"
                            data-slug={prop.slug.clone()}
                            aria-label={format!("View {}", prop.display_title())}
                            onclick={on_click.clone()}
                        >
                            <img
                                src={cover}
                                alt={prop.display_title().to_string()}
                                loading="lazy"
                                decoding="async"
                                width="400"
                                height="300"
                                onerror={img_fallback()}
                            />
                        </button>
                        <button type="button" class="gallery-overlay-link" onclick={on_click}>
                            {"View Details"}
                        </button>
                    </div>
                }
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PropertyPickerProps {
    pub catalog: PropertyCatalog,
    pub active_slug: Option<String>,
    pub on_select: Callback<String>,
    pub on_gallery: Callback<()>,
}

/// Horizontal chip strip naming every property.
#[function_component(PropertyPicker)]
pub fn property_picker(props: &PropertyPickerProps) -> Html {
    let picker_ref = use_node_ref();

    let on_title = {
        let picker_ref = picker_ref.clone();
        let on_gallery = props.on_gallery.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(picker) = picker_ref.cast::<web_sys::Element>() {
                picker.set_scroll_left(0);
            }
            on_gallery.emit(());
        })
    };

    html! {
        <div class="property-picker-bar">
            <button id="pickerTitle" type="button" class="picker-title" onclick={on_title}>
                {"Properties"}
            </button>
            <div id="property-picker" class="property-picker" ref={picker_ref}>
                {for props.catalog.all().iter().map(|prop| {
                    let active = props.active_slug.as_deref() == Some(prop.slug.as_str());
                    let onclick = {
                        let on_select = props.on_select.clone();
                        let slug = prop.slug.clone();
                        Callback::from(move |_: MouseEvent| on_select.emit(slug.clone()))
                    };
                    html! {
                        <button
                            key={prop.slug.clone()}
                            type="button"
                            class={classes!("property-chip", active.then_some("active"))}
                            data-slug={prop.slug.clone()}
                            {onclick}
                        >
                            {prop.display_title().to_string()}
                        </button>
                    }
                })}
            </div>
        </div>
    }
}
