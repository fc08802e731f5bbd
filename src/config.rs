// src/config.rs

/// Tunable constants for the site. One instance is built in `main` and
/// handed down through component properties.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub image_base: String,
    pub image_exts: Vec<String>,
    pub probe_max: u32,
    pub miss_limit: u32,
    pub probe_timeout_ms: u32,
    pub hero_interval_ms: u32,
    pub hero_retry_ms: u32,
    pub crossfade_ms: u32,
    pub swipe_threshold_px: f64,
    pub axis_lock_px: f64,
    pub booking_api_base: String,
    pub booking_checkout_base: String,
    pub booking_api_key: Option<String>,
    /// Drop a stale outer `?property=` when navigating to the plain gallery.
    pub clear_query_on_gallery: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            image_base: String::from("assets/images"),
            image_exts: ["jpg", "jpeg", "png", "webp"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            probe_max: 120,
            miss_limit: 3,
            probe_timeout_ms: 2500,
            hero_interval_ms: 6000,
            hero_retry_ms: 500,
            crossfade_ms: 1200,
            swipe_threshold_px: 50.0,
            axis_lock_px: 6.0,
            booking_api_base: String::from("https://api.lodgify.com/v2/properties"),
            booking_checkout_base: String::from(
                "https://checkout.lodgify.com/summitcountyrentals",
            ),
            booking_api_key: None,
            clear_query_on_gallery: true,
        }
    }
}

impl SiteConfig {
    pub fn with_miss_limit(mut self, limit: u32) -> Self {
        self.miss_limit = limit.max(1);
        self
    }

    pub fn with_probe_max(mut self, max: u32) -> Self {
        self.probe_max = max;
        self
    }

    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.booking_api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    /// `{image_base}/{slug}-{n}.{ext}`
    pub fn image_path(&self, slug: &str, n: u32, ext: &str) -> String {
        format!("{}/{}-{}.{}", self.image_base, slug, n, ext)
    }

    /// Cover image is always the first photo as `.jpg`.
    pub fn cover_path(&self, slug: &str) -> String {
        self.image_path(slug, 1, "jpg")
    }

    pub fn checkout_url(&self, booking_id: u64) -> String {
        format!(
            "{}/{}/reservation?currency=USD&adults=1",
            self.booking_checkout_base, booking_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.image_base, "assets/images");
        assert_eq!(config.miss_limit, 3);
        assert_eq!(config.image_exts.first().map(String::as_str), Some("jpg"));
        assert!(config.clear_query_on_gallery);
    }

    #[test]
    fn test_paths() {
        let config = SiteConfig {
            image_base: "img".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(config.cover_path("aspenlogcabin"), "img/aspenlogcabin-1.jpg");
        assert_eq!(config.image_path("a", 4, "webp"), "img/a-4.webp");
        assert_eq!(
            config.checkout_url(501596),
            "https://checkout.lodgify.com/summitcountyrentals/501596/reservation?currency=USD&adults=1"
        );
    }

    #[test]
    fn test_blank_api_key_is_none() {
        let config = SiteConfig::default().with_api_key(Some("  ".to_string()));
        assert!(config.booking_api_key.is_none());
        assert_eq!(SiteConfig::default().with_miss_limit(0).miss_limit, 1);
    }
}
