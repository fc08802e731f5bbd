// src/components/photo_modal.rs
use super::img_fallback;
use crate::config::SiteConfig;
use crate::image_probe::{BrowserProbe, ImageDetector};
use crate::property_data::PropertyRecord;
use crate::share::copy_share_link;
use crate::slider::{Direction, SliderState, SwipeTracker};
use crate::utils::{
    ensure_https, resource_url, safe_amenities, set_body_scroll_locked, unique_images, FALLBACK_IMG,
};
use gloo::events::EventListener;
use gloo::utils::document;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, KeyboardEvent};
use yew::prelude::*;

pub enum SliderAction {
    Step(Direction),
    JumpTo(usize),
    Replace(Vec<String>),
}

impl Reducible for SliderState {
    type Action = SliderAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        let moved = match action {
            SliderAction::Step(direction) => next.advance(direction),
            SliderAction::JumpTo(index) => next.jump_to(index as i64),
            SliderAction::Replace(images) => {
                next = SliderState::build(images);
                true
            }
        };
        if moved {
            Rc::new(next)
        } else {
            self
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct PhotoModalProps {
    pub property: PropertyRecord,
    pub config: Rc<SiteConfig>,
    pub detector: Rc<ImageDetector<BrowserProbe>>,
    pub on_close: Callback<()>,
}

#[function_component(PhotoModal)]
pub fn photo_modal(props: &PhotoModalProps) -> Html {
    let cover = resource_url(&props.config.cover_path(&props.property.slug));
    let slider = {
        let cover = cover.clone();
        use_reducer(move || SliderState::build(vec![cover]))
    };
    let modal_ref = use_node_ref();
    let swipe = {
        let threshold = props.config.swipe_threshold_px;
        let lock = props.config.axis_lock_px;
        use_mut_ref(move || SwipeTracker::new(threshold, lock))
    };

    // ------ BODY SCROLL LOCK ------
    use_effect_with((), |_| {
        set_body_scroll_locked(true);
        || set_body_scroll_locked(false)
    });

    // ------ PHOTO DETECTION ------
    // Opens on the cover alone, then swaps in the detected set.
    {
        let slider = slider.clone();
        let detector = props.detector.clone();
        let slug = props.property.slug.clone();
        use_effect_with(slug, move |slug| {
            slider.dispatch(SliderAction::Replace(vec![cover.clone()]));
            let slug = slug.clone();
            spawn_local(async move {
                let detected = detector.detect(&slug).await;
                if detected.iter().all(|u| u == FALLBACK_IMG) {
                    // Nothing found; probe again next time the modal opens.
                    detector.invalidate(&slug);
                }
                let merged = unique_images(
                    std::iter::once(cover.clone()).chain(
                        detected
                            .into_iter()
                            .filter(|u| u != FALLBACK_IMG)
                            .map(|u| resource_url(&u)),
                    ),
                );
                slider.dispatch(SliderAction::Replace(merged));
            });
            || ()
        });
    }

    // ------ KEYBOARD NAVIGATION ------
    {
        let slider = slider.clone();
        let on_close = props.on_close.clone();
        use_effect_with((), move |_| {
            let listener = EventListener::new(&document(), "keydown", move |event| {
                let Some(keyboard_event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                match keyboard_event.key().as_str() {
                    "ArrowRight" => slider.dispatch(SliderAction::Step(Direction::Next)),
                    "ArrowLeft" => slider.dispatch(SliderAction::Step(Direction::Prev)),
                    "Escape" => on_close.emit(()),
                    _ => {}
                }
            });

            // Cleanup closure
            || drop(listener)
        });
    }

    // ------ SWIPE ------
    let onpointerdown = {
        let swipe = swipe.clone();
        Callback::from(move |e: PointerEvent| {
            if e.pointer_type() == "mouse" && e.button() != 0 {
                return;
            }
            swipe.borrow_mut().start(e.client_x() as f64, e.client_y() as f64);
        })
    };
    let onpointermove = {
        let swipe = swipe.clone();
        Callback::from(move |e: PointerEvent| {
            if swipe.borrow_mut().move_to(e.client_x() as f64, e.client_y() as f64) {
                e.prevent_default();
            }
        })
    };
    let onpointerup = {
        let swipe = swipe.clone();
        let slider = slider.clone();
        Callback::from(move |_: PointerEvent| {
            let direction = swipe.borrow_mut().end();
            if let Some(direction) = direction {
                slider.dispatch(SliderAction::Step(direction));
            }
        })
    };
    let onpointercancel = {
        let swipe = swipe.clone();
        Callback::from(move |_: PointerEvent| swipe.borrow_mut().cancel())
    };

    // ------ CONTROLS ------
    let prev = {
        let slider = slider.clone();
        Callback::from(move |_: MouseEvent| slider.dispatch(SliderAction::Step(Direction::Prev)))
    };
    let next = {
        let slider = slider.clone();
        Callback::from(move |_: MouseEvent| slider.dispatch(SliderAction::Step(Direction::Next)))
    };
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_backdrop = {
        let on_close = props.on_close.clone();
        let modal_ref = modal_ref.clone();
        Callback::from(move |e: MouseEvent| {
            let target = e.target_dyn_into::<Element>();
            if target.is_some() && target == modal_ref.cast::<Element>() {
                on_close.emit(());
            }
        })
    };
    let share = {
        let slug = props.property.slug.clone();
        Callback::from(move |_: MouseEvent| {
            let slug = slug.clone();
            spawn_local(async move {
                copy_share_link(&slug).await;
            });
        })
    };

    let prop = &props.property;
    let title = prop.display_title().to_string();
    let controls_style = if slider.controls_visible() {
        "display:flex;"
    } else {
        "display:none;"
    };

    html! {
        <div id="property-modal" class="modal" aria-hidden="false" ref={modal_ref} onclick={on_backdrop}>
            <div class="modal-dialog" role="dialog" aria-modal="true" aria-labelledby="modal-title">
                <div class="modal-media">
                    <div class="slider fullscreen-slider">
                        <button class="slider-share" type="button" aria-label="Share link" onclick={share}>{"🔗"}</button>
                        <button class="slider-close top-right" type="button" aria-label="Close gallery" onclick={close}>{"✕"}</button>
                        <button class="slider-btn prev" type="button" aria-label="Previous photo" style={controls_style} onclick={prev}>{"‹"}</button>
                        <div
                            class="slider-viewport"
                            {onpointerdown}
                            {onpointermove}
                            {onpointerup}
                            {onpointercancel}
                        >
                            <div
                                class="slider-track"
                                style={format!("transform: translate3d({}%, 0, 0);", slider.offset_percent())}
                            >
                                {for slider.images().iter().enumerate().map(|(i, src)| html! {
                                    <div class="slide-wrap" key={src.clone()}>
                                        <img
                                            class="slide"
                                            draggable="false"
                                            src={src.clone()}
                                            alt={format!("{} photo {}", title, i + 1)}
                                            loading={if i < 3 { "eager" } else { "lazy" }}
                                            onerror={img_fallback()}
                                        />
                                    </div>
                                })}
                            </div>
                        </div>
                        <button class="slider-btn next" type="button" aria-label="Next photo" style={controls_style} onclick={next}>{"›"}</button>
                        <div class="slider-dots" aria-label="Slide navigation" style={controls_style}>
                            {for (0..slider.len()).map(|i| {
                                let slider = slider.clone();
                                let active = i == slider.index();
                                html! {
                                    <button
                                        class={classes!("slider-dot", active.then_some("active"))}
                                        type="button"
                                        aria-label={format!("Photo {}", i + 1)}
                                        onclick={Callback::from(move |_: MouseEvent| slider.dispatch(SliderAction::JumpTo(i)))}
                                    />
                                }
                            })}
                        </div>
                    </div>
                </div>
                <div class="modal-body">
                    <h2 id="modal-title">{title.clone()}</h2>
                    <p id="modal-subtitle" class="muted">{prop.subtitle.clone()}</p>
                    <p id="modal-description" style="white-space: pre-line;">{prop.description.clone()}</p>
                    <div id="modal-amenities">
                        {for safe_amenities(prop).into_iter().map(|a| html! { <span class="pill">{a}</span> })}
                    </div>
                    <div id="modal-actions">
                        {for prop.links.iter().filter(|l| !l.url.trim().is_empty()).map(|link| html! {
                            <a
                                class={classes!("btn", link.is_primary().then_some("btn-primary"))}
                                href={ensure_https(&link.url)}
                                target="_blank"
                                rel="noopener"
                            >
                                {link.text.clone()}
                            </a>
                        })}
                    </div>
                </div>
            </div>
        </div>
    }
}
