// src/image_probe.rs
use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::utils::FALLBACK_IMG;
use futures::channel::oneshot;
use futures::future::{self, Either, FutureExt, LocalBoxFuture};
use gloo::events::EventListener;
use gloo::timers::future::TimeoutFuture;
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;
use web_sys::HtmlImageElement;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    Found(String),
    NotFound,
}

/// Checks whether a single image URL loads.
pub trait ImageProbe {
    fn probe(&self, url: &str) -> LocalBoxFuture<'static, ProbeResult>;
}

/// Probes by loading into a detached `<img>`, racing a timeout. A timeout
/// counts as a miss.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserProbe {
    timeout_ms: u32,
}

impl BrowserProbe {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }
}

impl ImageProbe for BrowserProbe {
    fn probe(&self, url: &str) -> LocalBoxFuture<'static, ProbeResult> {
        let url = url.to_string();
        let timeout_ms = self.timeout_ms;

        async move {
            let load = match image_loads(&url) {
                Ok(load) => load,
                Err(e) => {
                    log::warn!("Could not probe {}: {}", url, e);
                    return ProbeResult::NotFound;
                }
            };

            let timeout = TimeoutFuture::new(timeout_ms);
            let loaded = match future::select(Box::pin(load), Box::pin(timeout)).await {
                Either::Left((loaded, _)) => loaded,
                Either::Right(_) => false,
            };

            if loaded {
                ProbeResult::Found(url)
            } else {
                ProbeResult::NotFound
            }
        }
        .boxed_local()
    }
}

fn image_loads(url: &str) -> Result<impl Future<Output = bool>, SiteError> {
    let img = HtmlImageElement::new()?;
    let (tx, rx) = oneshot::channel::<bool>();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let on_load = {
        let tx = tx.clone();
        EventListener::once(&img, "load", move |_| {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(true);
            }
        })
    };
    let on_error = EventListener::once(&img, "error", move |_| {
        if let Some(tx) = tx.borrow_mut().take() {
            let _ = tx.send(false);
        }
    });

    img.set_src(&cache_busted(url));

    Ok(async move {
        let loaded = rx.await.unwrap_or(false);
        drop((on_load, on_error, img));
        loaded
    })
}

fn cache_busted(url: &str) -> String {
    let bust = format!(
        "cb={}_{:x}",
        js_sys::Date::now() as u64,
        (js_sys::Math::random() * u32::MAX as f64) as u32
    );
    if url.contains('?') {
        format!("{}&{}", url, bust)
    } else {
        format!("{}?{}", url, bust)
    }
}

/// Finds a property's photo set by walking `{slug}-1`, `{slug}-2`, ...
/// and stopping after `miss_limit` consecutive indices with no file in any
/// known extension. Results are cached per slug until invalidated.
pub struct ImageDetector<P: ImageProbe> {
    probe: P,
    config: SiteConfig,
    cache: RefCell<HashMap<String, Vec<String>>>,
}

impl<P: ImageProbe> PartialEq for ImageDetector<P> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl<P: ImageProbe> ImageDetector<P> {
    pub fn new(probe: P, config: &SiteConfig) -> Self {
        Self {
            probe,
            config: config.clone(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Candidate URLs for photo `n`, in extension preference order.
    pub fn candidates(&self, slug: &str, n: u32) -> Vec<String> {
        self.config
            .image_exts
            .iter()
            .map(|ext| self.config.image_path(slug, n, ext))
            .collect()
    }

    /// Probes candidates one at a time; the first that loads wins.
    pub async fn first_working(&self, candidates: &[String]) -> ProbeResult {
        for url in candidates {
            if let ProbeResult::Found(found) = self.probe.probe(url).await {
                return ProbeResult::Found(found);
            }
        }
        ProbeResult::NotFound
    }

    pub async fn detect(&self, slug: &str) -> Vec<String> {
        let slug = slug.trim();
        if slug.is_empty() {
            return vec![FALLBACK_IMG.to_string()];
        }
        if let Some(cached) = self.cache.borrow().get(slug) {
            return cached.clone();
        }

        let mut found = Vec::new();
        let mut misses = 0;
        let miss_limit = self.config.miss_limit.max(1);
        for n in 1..=self.config.probe_max {
            match self.first_working(&self.candidates(slug, n)).await {
                ProbeResult::Found(url) => {
                    found.push(url);
                    misses = 0;
                }
                ProbeResult::NotFound => {
                    misses += 1;
                    if misses >= miss_limit {
                        break;
                    }
                }
            }
        }

        log::debug!("Detected {} photos for {}", found.len(), slug);
        let result = if found.is_empty() {
            vec![FALLBACK_IMG.to_string()]
        } else {
            found
        };
        self.cache
            .borrow_mut()
            .insert(slug.to_string(), result.clone());
        result
    }

    pub fn invalidate(&self, slug: &str) {
        self.cache.borrow_mut().remove(slug.trim());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::collections::HashSet;

    #[derive(Clone, Default)]
    struct FakeProbe {
        existing: HashSet<String>,
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl FakeProbe {
        fn with(files: &[&str]) -> Self {
            Self {
                existing: files.iter().map(|f| format!("assets/images/{}", f)).collect(),
                calls: Rc::default(),
            }
        }
    }

    impl ImageProbe for FakeProbe {
        fn probe(&self, url: &str) -> LocalBoxFuture<'static, ProbeResult> {
            self.calls.borrow_mut().push(url.to_string());
            let result = if self.existing.contains(url) {
                ProbeResult::Found(url.to_string())
            } else {
                ProbeResult::NotFound
            };
            future::ready(result).boxed_local()
        }
    }

    fn config() -> SiteConfig {
        SiteConfig::default().with_miss_limit(3).with_probe_max(120)
    }

    #[test]
    fn test_gap_tolerance() {
        let probe = FakeProbe::with(&["a-1.jpg", "a-2.jpg", "a-4.jpg"]);
        let detector = ImageDetector::new(probe, &config());
        let images = block_on(detector.detect("a"));
        assert_eq!(
            images,
            vec!["assets/images/a-1.jpg", "assets/images/a-2.jpg", "assets/images/a-4.jpg"]
        );
    }

    #[test]
    fn test_stops_after_miss_limit() {
        let probe = FakeProbe::with(&["a-1.jpg", "a-5.jpg"]);
        let calls = probe.calls.clone();
        let detector = ImageDetector::new(probe, &config());
        let images = block_on(detector.detect("a"));
        assert_eq!(images, vec!["assets/images/a-1.jpg"]);
        // 1 hit on the first extension, then 3 indices x 4 extensions
        assert_eq!(calls.borrow().len(), 1 + 3 * 4);
    }

    #[test]
    fn test_extension_order_first_match_wins() {
        let probe = FakeProbe::with(&["a-1.png", "a-1.webp", "a-2.webp"]);
        let detector = ImageDetector::new(probe, &config());
        let images = block_on(detector.detect("a"));
        assert_eq!(images, vec!["assets/images/a-1.png", "assets/images/a-2.webp"]);
    }

    #[test]
    fn test_nothing_found_is_placeholder() {
        let detector = ImageDetector::new(FakeProbe::default(), &config());
        assert_eq!(block_on(detector.detect("ghost")), vec![FALLBACK_IMG.to_string()]);
        assert_eq!(block_on(detector.detect("  ")), vec![FALLBACK_IMG.to_string()]);
    }

    #[test]
    fn test_cache_and_invalidate() {
        let probe = FakeProbe::with(&["a-1.jpg"]);
        let calls = probe.calls.clone();
        let detector = ImageDetector::new(probe, &config());

        block_on(detector.detect("a"));
        let first = calls.borrow().len();
        block_on(detector.detect("a"));
        assert_eq!(calls.borrow().len(), first);

        detector.invalidate("a");
        block_on(detector.detect("a"));
        assert_eq!(calls.borrow().len(), first * 2);
    }

    #[test]
    fn test_probe_max_bounds_work() {
        let files: Vec<String> = (1..=10).map(|n| format!("a-{}.jpg", n)).collect();
        let refs: Vec<&str> = files.iter().map(String::as_str).collect();
        let detector = ImageDetector::new(
            FakeProbe::with(&refs),
            &config().with_probe_max(4),
        );
        assert_eq!(block_on(detector.detect("a")).len(), 4);
    }

    #[test]
    fn test_candidates_follow_config_paths() {
        let mut cfg = config();
        cfg.image_base = "img".to_string();
        let detector = ImageDetector::new(FakeProbe::default(), &cfg);
        let expected: Vec<String> = cfg
            .image_exts
            .iter()
            .map(|ext| cfg.image_path("a", 2, ext))
            .collect();
        assert_eq!(detector.candidates("a", 2), expected);
        assert_eq!(detector.candidates("a", 2)[0], "img/a-2.jpg");
    }
}
