// src/components/hero.rs
use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::property_data::PropertyRecord;
use crate::scheduler::{AutoAdvance, PauseReason, SchedulerState, Tick};
use crate::slider::{CrossfadeLayers, Direction, Layer, SliderState};
use crate::utils::{background_image, clamp_text, resource_url, FALLBACK_IMG};
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use gloo::utils::document;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

const VISIBLE_THRESHOLD: f64 = 0.1;
const SUBTITLE_MAX: usize = 140;

#[derive(Properties, PartialEq)]
pub struct HeroProps {
    pub featured: Vec<PropertyRecord>,
    pub config: Rc<SiteConfig>,
    pub on_select: Callback<String>,
    pub on_browse: Callback<()>,
}

pub enum HeroMsg {
    Tick,
    FadeDone,
    Preloaded(usize, bool),
    Pause(PauseReason, bool),
    JumpTo(usize),
    Select,
    Browse,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Preload {
    Pending,
    Loaded,
    Failed,
}

struct Slide {
    slug: String,
    title: String,
    subtitle: String,
    src: String,
}

/// Live IntersectionObserver plus the JS closure it calls into.
struct Observer {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array)>,
}

/// Featured-property carousel. Backgrounds crossfade between two reused
/// layers; auto-advance pauses on hover, hidden tab, or when scrolled away.
pub struct Hero {
    slides: Vec<Slide>,
    preload: Vec<Preload>,
    slider: SliderState,
    layers: CrossfadeLayers,
    scheduler: AutoAdvance,
    hero_ref: NodeRef,
    tick_timer: Option<Timeout>,
    fade_timer: Option<Timeout>,
    _visibility: Option<EventListener>,
    observer: Option<Observer>,
}

impl Component for Hero {
    type Message = HeroMsg;
    type Properties = HeroProps;

    fn create(ctx: &Context<Self>) -> Self {
        let config = &ctx.props().config;
        let slides: Vec<Slide> = ctx
            .props()
            .featured
            .iter()
            .map(|prop| Slide {
                slug: prop.slug.clone(),
                title: prop.display_title().to_string(),
                subtitle: clamp_text(&prop.subtitle, SUBTITLE_MAX),
                src: resource_url(&config.cover_path(&prop.slug)),
            })
            .collect();

        let slider = SliderState::build(slides.iter().map(|s| s.src.clone()).collect());
        let layers = CrossfadeLayers::new(slider.current());
        let mut scheduler = AutoAdvance::new(slides.len());
        scheduler.set(PauseReason::Hidden, document().hidden());

        let visibility = (slides.len() > 1).then(|| {
            let link = ctx.link().clone();
            EventListener::new(&document(), "visibilitychange", move |_| {
                link.send_message(HeroMsg::Pause(PauseReason::Hidden, document().hidden()));
            })
        });

        log::info!("Hero initialised with {} featured slides", slides.len());
        let mut hero = Self {
            preload: vec![Preload::Pending; slides.len()],
            slides,
            slider,
            layers,
            scheduler,
            hero_ref: NodeRef::default(),
            tick_timer: None,
            fade_timer: None,
            _visibility: visibility,
            observer: None,
        };
        hero.schedule_tick(ctx, ctx.props().config.hero_interval_ms);
        hero
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && self.slides.len() > 1 {
            match self.observe(ctx) {
                Ok(observer) => self.observer = Some(observer),
                Err(e) => log::warn!("Hero visibility observer unavailable: {}", e),
            }
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let config = ctx.props().config.clone();
        match msg {
            HeroMsg::Tick => {
                let next = self.slider.next_index();
                let next_ready = self.preload.get(next) != Some(&Preload::Pending);
                match self.scheduler.tick(next_ready) {
                    Tick::Advance => {
                        self.slider.advance(Direction::Next);
                        self.start_fade(ctx);
                        self.schedule_tick(ctx, config.hero_interval_ms);
                        true
                    }
                    Tick::Defer => {
                        log::debug!("Hero slide {} not loaded yet, retrying", next);
                        self.schedule_tick(ctx, config.hero_retry_ms);
                        false
                    }
                    Tick::Idle => {
                        self.tick_timer = None;
                        false
                    }
                }
            }
            HeroMsg::FadeDone => {
                self.fade_timer = None;
                self.layers.complete();
                true
            }
            HeroMsg::Preloaded(index, ok) => {
                if let Some(status) = self.preload.get_mut(index) {
                    *status = if ok { Preload::Loaded } else { Preload::Failed };
                }
                if ok {
                    return false;
                }
                log::warn!("Hero image {} failed to load", index);
                if index == self.slider.index() {
                    self.layers.replace_visible(FALLBACK_IMG);
                }
                true
            }
            HeroMsg::Pause(reason, active) => {
                match self.scheduler.set(reason, active) {
                    Some(SchedulerState::Running) => {
                        self.schedule_tick(ctx, config.hero_interval_ms)
                    }
                    Some(SchedulerState::Paused) => self.tick_timer = None,
                    None => {}
                }
                false
            }
            HeroMsg::JumpTo(index) => {
                if !self.slider.jump_to(index as i64) {
                    return false;
                }
                self.start_fade(ctx);
                // Restart the interval so a manual pick gets a full showing.
                self.schedule_tick(ctx, config.hero_interval_ms);
                true
            }
            HeroMsg::Select => {
                if let Some(slide) = self.slides.get(self.slider.index()) {
                    ctx.props().on_select.emit(slide.slug.clone());
                }
                false
            }
            HeroMsg::Browse => {
                ctx.props().on_browse.emit(());
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let fade_ms = ctx.props().config.crossfade_ms;

        let layer = |layer: Layer| {
            let src = self.layers.source(layer);
            let style = format!(
                "{} opacity: {}; transition: opacity {}ms ease-in-out;",
                background_image(src),
                self.layers.opacity(layer),
                fade_ms
            );
            html! { <div class="hero-bg" aria-hidden="true" {style}></div> }
        };

        let caption = match self.slides.get(self.slider.index()) {
            Some(slide) => html! {
                <div class="hero-caption">
                    <h1 class="hero-title">{slide.title.clone()}</h1>
                    <p class="hero-subtitle">{slide.subtitle.clone()}</p>
                    <div class="hero-actions">
                        <button class="btn btn-primary" type="button" onclick={link.callback(|_: MouseEvent| HeroMsg::Select)}>
                            {"View Property"}
                        </button>
                        <button class="btn btn-ghost" type="button" onclick={link.callback(|_: MouseEvent| HeroMsg::Browse)}>
                            {"Browse Properties"}
                        </button>
                    </div>
                </div>
            },
            None => html! {
                <div class="hero-caption">
                    <h1 class="hero-title">{"High Altitude Property Management"}</h1>
                    <div class="hero-actions">
                        <button class="btn btn-primary" type="button" onclick={link.callback(|_: MouseEvent| HeroMsg::Browse)}>
                            {"Browse Properties"}
                        </button>
                    </div>
                </div>
            },
        };

        html! {
            <section
                id="hero"
                class="hero"
                ref={self.hero_ref.clone()}
                onmouseenter={link.callback(|_: MouseEvent| HeroMsg::Pause(PauseReason::Hover, true))}
                onmouseleave={link.callback(|_: MouseEvent| HeroMsg::Pause(PauseReason::Hover, false))}
            >
                { layer(Layer::A) }
                { layer(Layer::B) }
                <div class="hero-overlay"></div>
                { caption }

                if self.slider.controls_visible() {
                    <div class="hero-dots" aria-label="Featured properties">
                        {for (0..self.slides.len()).map(|i| {
                            let active = i == self.slider.index();
                            html! {
                                <button
                                    class={classes!("hero-dot", active.then_some("active"))}
                                    type="button"
                                    aria-label={format!("Show {}", self.slides[i].title)}
                                    onclick={link.callback(move |_: MouseEvent| HeroMsg::JumpTo(i))}
                                />
                            }
                        })}
                    </div>
                }

                <div class="hero-preload" style="display:none;">
                    {for self.slides.iter().enumerate().map(|(i, slide)| html! {
                        <img
                            src={slide.src.clone()}
                            alt=""
                            onload={link.callback(move |_: Event| HeroMsg::Preloaded(i, true))}
                            onerror={link.callback(move |_: Event| HeroMsg::Preloaded(i, false))}
                        />
                    })}
                </div>
            </section>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.scheduler.teardown();
        self.tick_timer = None;
        self.fade_timer = None;
        if let Some(observer) = self.observer.take() {
            observer.observer.disconnect();
        }
    }
}

impl Hero {
    /// Source to show for the current slide; failed preloads get the placeholder.
    fn current_source(&self) -> String {
        match self.preload.get(self.slider.index()) {
            Some(Preload::Failed) => FALLBACK_IMG.to_string(),
            _ => self.slider.current().to_string(),
        }
    }

    fn start_fade(&mut self, ctx: &Context<Self>) {
        let src = self.current_source();
        self.layers.begin(&src);
        let link = ctx.link().clone();
        self.fade_timer = Some(Timeout::new(ctx.props().config.crossfade_ms, move || {
            link.send_message(HeroMsg::FadeDone)
        }));
    }

    fn schedule_tick(&mut self, ctx: &Context<Self>, delay_ms: u32) {
        if !self.scheduler.is_running() {
            self.tick_timer = None;
            return;
        }
        let link = ctx.link().clone();
        self.tick_timer = Some(Timeout::new(delay_ms, move || link.send_message(HeroMsg::Tick)));
    }

    fn observe(&self, ctx: &Context<Self>) -> Result<Observer, SiteError> {
        let element = self
            .hero_ref
            .cast::<web_sys::Element>()
            .ok_or_else(|| SiteError::MissingElement("hero".to_string()))?;

        let link = ctx.link().clone();
        let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                    let offscreen = !entry.is_intersecting();
                    link.send_message(HeroMsg::Pause(PauseReason::Offscreen, offscreen));
                }
            }
        });

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(VISIBLE_THRESHOLD));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        observer.observe(&element);

        Ok(Observer {
            observer,
            _callback: callback,
        })
    }
}
