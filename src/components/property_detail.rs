// src/components/property_detail.rs
use super::img_fallback;
use crate::booking::{BookingClient, BookingExtras, NOT_AVAILABLE};
use crate::config::SiteConfig;
use crate::property_data::PropertyRecord;
use crate::share::copy_share_link;
use crate::utils::{ensure_https, primary_booking_link, resource_url, safe_amenities};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PropertyDetailProps {
    pub property: PropertyRecord,
    pub config: Rc<SiteConfig>,
    pub booking: BookingClient,
    pub on_open_photos: Callback<String>,
    pub on_back: Callback<()>,
}

pub enum PropertyDetailMsg {
    LoadExtras,
    ExtrasLoaded(String, BookingExtras),
    Share,
}

pub struct PropertyDetail {
    extras: Option<BookingExtras>,
    current_slug: String,
}

impl Component for PropertyDetail {
    type Message = PropertyDetailMsg;
    type Properties = PropertyDetailProps;

    fn create(ctx: &Context<Self>) -> Self {
        let slug = ctx.props().property.slug.clone();
        let extras = ctx.props().booking.cached(&slug);
        if extras.is_none() {
            ctx.link().send_message(PropertyDetailMsg::LoadExtras);
        }

        Self {
            extras,
            current_slug: slug,
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, _old: &Self::Properties) -> bool {
        let new_slug = &ctx.props().property.slug;
        if *new_slug != self.current_slug {
            self.current_slug = new_slug.clone();
            self.extras = ctx.props().booking.cached(new_slug);
            if self.extras.is_none() {
                ctx.link().send_message(PropertyDetailMsg::LoadExtras);
            }
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            PropertyDetailMsg::LoadExtras => {
                let link = ctx.link().clone();
                let booking = ctx.props().booking.clone();
                let slug = self.current_slug.clone();
                spawn_local(async move {
                    let extras = booking.extras(&slug).await;
                    link.send_message(PropertyDetailMsg::ExtrasLoaded(slug, extras));
                });
                false
            }
            PropertyDetailMsg::ExtrasLoaded(slug, extras) => {
                // A late reply for a property no longer on screen is dropped.
                if slug != self.current_slug {
                    return false;
                }
                self.extras = Some(extras);
                true
            }
            PropertyDetailMsg::Share => {
                let slug = self.current_slug.clone();
                spawn_local(async move {
                    let outcome = copy_share_link(&slug).await;
                    log::debug!("Share {}: {:?}", slug, outcome);
                });
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let prop = &ctx.props().property;
        let cover = resource_url(&ctx.props().config.cover_path(&prop.slug));

        let open_photos = {
            let on_open = ctx.props().on_open_photos.clone();
            let slug = prop.slug.clone();
            Callback::from(move |_: MouseEvent| on_open.emit(slug.clone()))
        };
        let on_share = ctx.link().callback(|_: MouseEvent| PropertyDetailMsg::Share);
        let on_back = {
            let on_back = ctx.props().on_back.clone();
            Callback::from(move |_: MouseEvent| on_back.emit(()))
        };

        html! {
            <div id="property-detail" class="property-hero">
                <button class="btn btn-ghost btn-small back-link" type="button" onclick={on_back}>
                    {"← All properties"}
                </button>
                <button
                    class="property-hero-media"
                    type="button"
                    id="openPhotosBtn"
                    aria-label="View full photo gallery"
                    onclick={open_photos}
                >
                    <img
                        src={cover}
                        alt={prop.display_title().to_string()}
                        loading="eager"
                        width="800"
                        height="600"
                        onerror={img_fallback()}
                    />
                    <div class="property-hero-badge">{"View Photos"}</div>
                </button>

                <div class="property-hero-body">
                    <div class="property-hero-top">
                        <div>
                            <h1 class="property-title">{prop.display_title().to_string()}</h1>
                            <p class="property-subtitle">{prop.subtitle.clone()}</p>
                        </div>
                        <div class="property-hero-actions">
                            <button class="btn btn-ghost btn-small" id="sharePropertyBtn" type="button" onclick={on_share}>
                                {"🔗 Share"}
                            </button>
                            {
                                match primary_booking_link(prop) {
                                    Some(href) => html! {
                                        <a class="btn btn-small btn-primary" {href} target="_blank" rel="noopener noreferrer">
                                            {"📅 Availability"}
                                        </a>
                                    },
                                    None => html! {},
                                }
                            }
                        </div>
                    </div>

                    { self.render_facts(prop) }

                    <div class="property-desc">
                        {for prop.paragraphs().into_iter().map(|p| html! { <p>{p.to_string()}</p> })}
                    </div>

                    <div class="property-tags">
                        {for safe_amenities(prop).into_iter().map(|a| html! { <span class="tag">{a}</span> })}
                    </div>

                    { Self::render_list("Highlights", &prop.highlights) }
                    { Self::render_list("House Rules", &prop.rules) }
                    { self.render_policies(prop) }
                    { Self::render_reviews(prop) }
                    { self.render_booking() }

                    <div class="property-links">
                        {for prop.links.iter().filter(|l| !l.url.trim().is_empty() && !l.text.trim().is_empty()).map(|link| {
                            let class = if link.is_primary() {
                                "btn btn-small btn-primary"
                            } else {
                                "btn btn-small btn-ghost"
                            };
                            html! {
                                <a {class} href={ensure_https(&link.url)} target="_blank" rel="noopener noreferrer">
                                    {link.text.clone()}
                                </a>
                            }
                        })}
                    </div>
                </div>
            </div>
        }
    }
}

impl PropertyDetail {
    fn render_facts(&self, prop: &PropertyRecord) -> Html {
        let d = &prop.details;
        let mut facts = Vec::new();
        if let Some(location) = &d.location {
            facts.push(location.clone());
        }
        if let Some(sleeps) = d.sleeps {
            facts.push(format!("Sleeps {}", sleeps));
        }
        if let Some(bedrooms) = d.bedrooms {
            facts.push(format!("{} bedrooms", bedrooms));
        }
        if let Some(bathrooms) = d.bathrooms {
            facts.push(format!("{} baths", bathrooms));
        }
        if let (Some(check_in), Some(check_out)) = (&d.check_in, &d.check_out) {
            facts.push(format!("Check-in {} · Check-out {}", check_in, check_out));
        }
        if d.pet_friendly == Some(true) {
            facts.push("Pet friendly".to_string());
        }

        if facts.is_empty() {
            return html! {};
        }
        html! {
            <ul class="property-facts">
                {for facts.into_iter().map(|f| html! { <li>{f}</li> })}
            </ul>
        }
    }

    fn render_list(title: &str, items: &[String]) -> Html {
        if items.is_empty() {
            return html! {};
        }
        html! {
            <div class="property-section">
                <h3>{title.to_string()}</h3>
                <ul>
                    {for items.iter().map(|item| html! { <li>{item.clone()}</li> })}
                </ul>
            </div>
        }
    }

    /// Policies from the catalog win; booking-platform values fill gaps.
    fn render_policies(&self, prop: &PropertyRecord) -> Html {
        let remote = self.extras.as_ref();
        let pick = |local: &Option<String>, remote: Option<&String>| -> Option<String> {
            local
                .clone()
                .or_else(|| remote.filter(|r| r.as_str() != NOT_AVAILABLE).cloned())
        };

        let rows: Vec<(&str, String)> = [
            (
                "Cancellation",
                pick(&prop.policies.cancellation_policy, remote.map(|e| &e.cancellation_policy)),
            ),
            (
                "Payment",
                pick(&prop.policies.payment_schedule, remote.map(|e| &e.payment_policy)),
            ),
            ("Security deposit", prop.policies.security_deposit.clone()),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.map(|v| (label, v)))
        .collect();

        if rows.is_empty() {
            return html! {};
        }
        html! {
            <div class="property-section property-policies">
                <h3>{"Policies"}</h3>
                <dl>
                    {for rows.into_iter().map(|(label, value)| html! {
                        <>
                            <dt>{label.to_string()}</dt>
                            <dd>{value}</dd>
                        </>
                    })}
                </dl>
            </div>
        }
    }

    fn render_reviews(prop: &PropertyRecord) -> Html {
        if prop.reviews.is_empty() {
            return html! {};
        }
        let summary = match (prop.overall_rating, prop.review_count) {
            (Some(rating), Some(count)) => format!("★ {:.2} · {} reviews", rating, count),
            (Some(rating), None) => format!("★ {:.2}", rating),
            _ => String::new(),
        };
        html! {
            <div class="property-section property-reviews">
                <h3>{"Guest Reviews"}</h3>
                <p class="muted">{summary}</p>
                {for prop.reviews.iter().map(|review| html! {
                    <blockquote class="review">
                        <p>{review.text.clone()}</p>
                        <footer>
                            {format!("{} · {} · {}", review.name, review.date, "★".repeat(review.rating.min(5) as usize))}
                        </footer>
                    </blockquote>
                })}
            </div>
        }
    }

    fn render_booking(&self) -> Html {
        let Some(extras) = &self.extras else {
            return html! {
                <div class="booking-embed"><p class="muted">{"Loading booking calendar..."}</p></div>
            };
        };
        let url = ensure_https(&extras.booking_url);

        if extras.is_fallback() || url.is_empty() {
            return html! {
                <div class="booking-embed">
                    <h3>{"Booking"}</h3>
                    <p class="muted">{"Direct booking not available – contact us for reservations."}</p>
                </div>
            };
        }
        html! {
            <div class="booking-embed">
                <iframe
                    src={url}
                    style="width:100%; height:800px; border:none;"
                    title="Booking Calendar & Form"
                    loading="lazy"
                ></iframe>
            </div>
        }
    }
}
