// src/main.rs
mod booking;
mod catalog;
mod components;
mod config;
mod error;
mod image_probe;
mod property_data;
mod router;
mod scheduler;
mod share;
mod slider;
mod url_state;
mod utils;

use booking::BookingClient;
use catalog::PropertyCatalog;
use components::contact_form::ContactForm;
use components::gallery::{Gallery, PropertyPicker};
use components::hero::Hero;
use components::photo_modal::PhotoModal;
use components::property_detail::PropertyDetail;
use components::site_nav::{SiteFooter, SiteNav};
use config::SiteConfig;
use gloo_events::EventListener;
use image_probe::{BrowserProbe, ImageDetector};
use router::{PropertyView, SectionRouter};
use std::rc::Rc;
use url_state::{HistoryMode, Location, NavigationState, Section};
use utils::{scroll_into_view, scroll_to_top};
use yew::prelude::*;

pub enum AppMsg {
    Navigate(NavigationState),
    LocationChanged,
    OpenPhotos(String),
    ClosePhotos,
}

pub struct App {
    config: Rc<SiteConfig>,
    catalog: PropertyCatalog,
    router: SectionRouter,
    booking: BookingClient,
    detector: Rc<ImageDetector<BrowserProbe>>,
    photos_for: Option<String>,
    pending_scroll: Option<Section>,
    _popstate: EventListener,
    _hashchange: EventListener,
}

impl Component for App {
    type Message = AppMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let config = Rc::new(
            SiteConfig::default().with_api_key(option_env!("LODGIFY_API_KEY").map(str::to_string)),
        );
        let catalog = PropertyCatalog::load_embedded();

        let location = Location::current().unwrap_or_else(|e| {
            log::error!("Could not read location: {}", e);
            Location::default()
        });
        let legacy = url_state::normalize(&location).is_some();
        if legacy {
            log::info!("Rewriting legacy property link to fragment form");
        }

        // Resolve the deep link before the first paint so a detail URL
        // never flashes the gallery.
        let (router, _) = SectionRouter::from_state(&url_state::parse(&location), &catalog);
        let strip = legacy || config.clear_query_on_gallery;
        if let Err(e) = url_state::write(&router.state(), HistoryMode::Replace, strip) {
            log::warn!("Could not update address bar: {}", e);
        }

        // Back/forward and fragment-only edits are handled identically.
        let window = gloo_utils::window();
        let popstate = {
            let link = ctx.link().clone();
            EventListener::new(&window, "popstate", move |_| {
                link.send_message(AppMsg::LocationChanged)
            })
        };
        let hashchange = {
            let link = ctx.link().clone();
            EventListener::new(&window, "hashchange", move |_| {
                link.send_message(AppMsg::LocationChanged)
            })
        };

        let detector = Rc::new(ImageDetector::new(
            BrowserProbe::new(config.probe_timeout_ms),
            &config,
        ));

        Self {
            booking: BookingClient::new(config.clone()),
            detector,
            config,
            catalog,
            router,
            photos_for: None,
            pending_scroll: None,
            _popstate: popstate,
            _hashchange: hashchange,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AppMsg::Navigate(state) => {
                self.router.activate(&state, &self.catalog);
                sync_address_bar(&self.router, HistoryMode::Push, &self.config);
                self.close_stale_photos();
                self.pending_scroll = Some(self.router.active());
                true
            }
            AppMsg::LocationChanged => {
                let location = match Location::current() {
                    Ok(location) => location,
                    Err(e) => {
                        log::error!("Could not read location: {}", e);
                        return false;
                    }
                };
                let activation = self
                    .router
                    .activate(&url_state::parse(&location), &self.catalog);
                if activation.needs_rewrite {
                    sync_address_bar(&self.router, HistoryMode::Replace, &self.config);
                }
                let closed = self.close_stale_photos();
                activation.changed || closed
            }
            AppMsg::OpenPhotos(slug) => {
                self.photos_for = Some(slug);
                true
            }
            AppMsg::ClosePhotos => self.photos_for.take().is_some(),
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        match self.pending_scroll.take() {
            Some(Section::Home) => scroll_to_top(),
            Some(section) => scroll_into_view(section.id()),
            None => {}
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let on_navigate =
            link.callback(|section: Section| AppMsg::Navigate(NavigationState::section(section)));
        let on_select =
            link.callback(|slug: String| AppMsg::Navigate(NavigationState::property(&slug)));
        let on_gallery = link.callback(|_: ()| AppMsg::Navigate(NavigationState::gallery()));

        let section_class = |section: Section| {
            classes!("page-section", self.router.is_active(section).then_some("active"))
        };

        html! {
            <>
                <SiteNav active={self.router.active()} {on_navigate} />

                <main id="main">
                    if self.router.hero_visible() {
                        <Hero
                            featured={self.catalog.featured().into_iter().cloned().collect::<Vec<_>>()}
                            config={self.config.clone()}
                            on_select={on_select.clone()}
                            on_browse={on_gallery.clone()}
                        />
                    }

                    <section id={Section::Home.id()} class={section_class(Section::Home)}>
                        <div class="container intro">
                            <h2>{"Mountain homes, managed with care"}</h2>
                            <p>
                                {"Hand-picked vacation rentals across Summit County and Park City. \
                                  Book direct for the lowest price."}
                            </p>
                        </div>
                    </section>

                    <section id={Section::Properties.id()} class={section_class(Section::Properties)}>
                        <PropertyPicker
                            catalog={self.catalog.clone()}
                            active_slug={self.router.active_slug().map(str::to_string)}
                            on_select={on_select.clone()}
                            on_gallery={on_gallery.clone()}
                        />
                        { self.view_properties(ctx, on_select, on_gallery) }
                    </section>

                    <section id={Section::About.id()} class={section_class(Section::About)}>
                        <div class="container">
                            <h2>{"About Us"}</h2>
                            <p>
                                {"High Altitude Property Management cares for homes from Breckenridge \
                                  to Park City: cleaning, maintenance, guest communication and \
                                  direct booking."}
                            </p>
                        </div>
                    </section>

                    <section id={Section::Contact.id()} class={section_class(Section::Contact)}>
                        <div class="container">
                            <h2>{"Contact"}</h2>
                            <ContactForm />
                        </div>
                    </section>
                </main>

                { self.view_photos(ctx) }

                <SiteFooter />
            </>
        }
    }
}

impl App {
    fn view_properties(
        &self,
        ctx: &Context<Self>,
        on_select: Callback<String>,
        on_gallery: Callback<()>,
    ) -> Html {
        let detail = match self.router.view() {
            PropertyView::Detail(slug) => self.catalog.find(slug).cloned(),
            PropertyView::Gallery => None,
        };

        match detail {
            Some(property) => html! {
                <PropertyDetail
                    {property}
                    config={self.config.clone()}
                    booking={self.booking.clone()}
                    on_open_photos={ctx.link().callback(AppMsg::OpenPhotos)}
                    on_back={on_gallery}
                />
            },
            None => html! {
                <Gallery
                    catalog={self.catalog.clone()}
                    config={self.config.clone()}
                    {on_select}
                />
            },
        }
    }

    fn view_photos(&self, ctx: &Context<Self>) -> Html {
        let Some(slug) = self.photos_for.as_deref() else {
            return html! {};
        };
        let property = match self.catalog.resolve(slug) {
            Ok(property) => property,
            Err(e) => {
                log::warn!("Cannot open photos: {}", e);
                return html! {};
            }
        };

        html! {
            <PhotoModal
                property={property.clone()}
                config={self.config.clone()}
                detector={self.detector.clone()}
                on_close={ctx.link().callback(|_: ()| AppMsg::ClosePhotos)}
            />
        }
    }

    /// The photo modal only belongs to the property currently shown.
    fn close_stale_photos(&mut self) -> bool {
        let stale = match &self.photos_for {
            Some(slug) => self.router.active_slug() != Some(slug.as_str()),
            None => false,
        };
        if stale {
            self.photos_for = None;
        }
        stale
    }
}

fn sync_address_bar(router: &SectionRouter, mode: HistoryMode, config: &SiteConfig) {
    if let Err(e) = url_state::write(&router.state(), mode, config.clear_query_on_gallery) {
        log::warn!("Could not update address bar: {}", e);
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
