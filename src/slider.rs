// src/slider.rs
use crate::utils::FALLBACK_IMG;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    fn step(self) -> i64 {
        match self {
            Direction::Prev => -1,
            Direction::Next => 1,
        }
    }
}

/// Ordered photo list plus the index on screen. The index always stays in
/// `[0, len)` and wraps in both directions.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderState {
    images: Vec<String>,
    index: usize,
}

impl Default for SliderState {
    fn default() -> Self {
        Self::build(Vec::new())
    }
}

impl SliderState {
    /// An empty list is replaced by the single placeholder image.
    pub fn build(images: Vec<String>) -> Self {
        let images = if images.is_empty() {
            vec![FALLBACK_IMG.to_string()]
        } else {
            images
        };
        Self { images, index: 0 }
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &str {
        &self.images[self.index]
    }

    pub fn next_index(&self) -> usize {
        self.wrap(self.index as i64 + 1)
    }

    /// No-op below two images. Returns whether the index moved.
    pub fn advance(&mut self, direction: Direction) -> bool {
        if self.images.len() < 2 {
            return false;
        }
        let before = self.index;
        self.index = self.wrap(self.index as i64 + direction.step());
        before != self.index
    }

    pub fn jump_to(&mut self, index: i64) -> bool {
        let before = self.index;
        self.index = self.wrap(index);
        before != self.index
    }

    /// Prev/next/dots are hidden for a single image.
    pub fn controls_visible(&self) -> bool {
        self.images.len() > 1
    }

    /// Horizontal track offset, in percent of the viewport width.
    pub fn offset_percent(&self) -> i64 {
        -(self.index as i64) * 100
    }

    fn wrap(&self, index: i64) -> usize {
        index.rem_euclid(self.images.len() as i64) as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Pointer/touch drag tracking for the photo slider. The axis is decided
/// once the pointer has moved `lock_px` and held until release; only a
/// horizontal drag past `threshold_px` produces a direction.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeTracker {
    threshold_px: f64,
    lock_px: f64,
    start: Option<(f64, f64)>,
    delta: (f64, f64),
    axis: Option<Axis>,
}

impl SwipeTracker {
    pub fn new(threshold_px: f64, lock_px: f64) -> Self {
        Self {
            threshold_px,
            lock_px,
            start: None,
            delta: (0.0, 0.0),
            axis: None,
        }
    }

    pub fn start(&mut self, x: f64, y: f64) {
        self.start = Some((x, y));
        self.delta = (0.0, 0.0);
        self.axis = None;
    }

    /// Returns true when the gesture is locked horizontal, so the caller
    /// should suppress the default scroll.
    pub fn move_to(&mut self, x: f64, y: f64) -> bool {
        let Some((sx, sy)) = self.start else {
            return false;
        };
        self.delta = (x - sx, y - sy);
        let (dx, dy) = self.delta;

        if self.axis.is_none() && dx.abs().max(dy.abs()) >= self.lock_px {
            self.axis = Some(if dx.abs() > dy.abs() {
                Axis::Horizontal
            } else {
                Axis::Vertical
            });
        }
        self.axis == Some(Axis::Horizontal)
    }

    pub fn end(&mut self) -> Option<Direction> {
        self.start.take()?;
        let axis = self.axis.take();
        let dx = self.delta.0;
        self.delta = (0.0, 0.0);

        if axis != Some(Axis::Horizontal) || dx.abs() <= self.threshold_px {
            return None;
        }
        Some(if dx < 0.0 {
            Direction::Next
        } else {
            Direction::Prev
        })
    }

    pub fn cancel(&mut self) {
        self.start = None;
        self.axis = None;
        self.delta = (0.0, 0.0);
    }

    pub fn is_dragging(&self) -> bool {
        self.start.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    A,
    B,
}

impl Layer {
    fn other(self) -> Layer {
        match self {
            Layer::A => Layer::B,
            Layer::B => Layer::A,
        }
    }

    fn slot(self) -> usize {
        match self {
            Layer::A => 0,
            Layer::B => 1,
        }
    }
}

/// Two stacked background layers reused for every hero transition. The
/// incoming image is loaded into the hidden layer, both opacities flip, and
/// the roles swap once the fade completes.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossfadeLayers {
    sources: [String; 2],
    active: Layer,
    fading: bool,
}

impl CrossfadeLayers {
    pub fn new(initial: &str) -> Self {
        Self {
            sources: [initial.to_string(), String::new()],
            active: Layer::A,
            fading: false,
        }
    }

    /// Starts a fade to `src`. A fade already in flight is completed first.
    pub fn begin(&mut self, src: &str) -> Layer {
        if self.fading {
            self.complete();
        }
        let incoming = self.active.other();
        self.sources[incoming.slot()] = src.to_string();
        self.fading = true;
        incoming
    }

    pub fn complete(&mut self) {
        if self.fading {
            self.active = self.active.other();
            self.fading = false;
        }
    }

    /// Swaps the source of whichever layer is currently on screen, leaving
    /// any fade in progress untouched.
    pub fn replace_visible(&mut self, src: &str) {
        let showing = if self.fading {
            self.active.other()
        } else {
            self.active
        };
        self.sources[showing.slot()] = src.to_string();
    }

    pub fn is_fading(&self) -> bool {
        self.fading
    }

    pub fn active(&self) -> Layer {
        self.active
    }

    pub fn source(&self, layer: Layer) -> &str {
        &self.sources[layer.slot()]
    }

    pub fn opacity(&self, layer: Layer) -> f64 {
        let showing = if self.fading {
            layer != self.active
        } else {
            layer == self.active
        };
        if showing {
            1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("assets/images/a-{}.jpg", i)).collect()
    }

    #[test]
    fn test_empty_list_uses_placeholder() {
        let slider = SliderState::build(Vec::new());
        assert_eq!(slider.images(), &[FALLBACK_IMG.to_string()]);
        assert_eq!(slider.index(), 0);
        assert!(!slider.controls_visible());
    }

    #[test]
    fn test_single_image_disables_navigation() {
        let mut slider = SliderState::build(images(1));
        assert!(!slider.controls_visible());
        assert!(!slider.advance(Direction::Next));
        assert!(!slider.advance(Direction::Prev));
        assert_eq!(slider.index(), 0);
    }

    #[test]
    fn test_cyclic_closure() {
        for n in 2..=7 {
            let mut slider = SliderState::build(images(n));
            slider.jump_to(1);
            for _ in 0..n {
                slider.advance(Direction::Next);
            }
            assert_eq!(slider.index(), 1);
            for _ in 0..n {
                slider.advance(Direction::Prev);
            }
            assert_eq!(slider.index(), 1);
        }
    }

    #[test]
    fn test_wraps_backwards_from_zero() {
        let mut slider = SliderState::build(images(4));
        slider.advance(Direction::Prev);
        assert_eq!(slider.index(), 3);
        assert_eq!(slider.offset_percent(), -300);
        assert_eq!(slider.current(), "assets/images/a-4.jpg");
        assert_eq!(slider.next_index(), 0);
    }

    #[test]
    fn test_jump_to_wraps() {
        let mut slider = SliderState::build(images(3));
        slider.jump_to(5);
        assert_eq!(slider.index(), 2);
        slider.jump_to(-1);
        assert_eq!(slider.index(), 2);
        assert!(!slider.jump_to(2));
    }

    #[test]
    fn test_horizontal_swipe() {
        let mut swipe = SwipeTracker::new(50.0, 6.0);
        swipe.start(300.0, 200.0);
        assert!(!swipe.move_to(298.0, 201.0));
        assert!(swipe.move_to(280.0, 203.0));
        assert!(swipe.move_to(220.0, 240.0));
        assert_eq!(swipe.end(), Some(Direction::Next));

        swipe.start(100.0, 100.0);
        swipe.move_to(180.0, 100.0);
        assert_eq!(swipe.end(), Some(Direction::Prev));
    }

    #[test]
    fn test_vertical_lock_is_held() {
        let mut swipe = SwipeTracker::new(50.0, 6.0);
        swipe.start(100.0, 100.0);
        assert!(!swipe.move_to(101.0, 110.0));
        // turns sideways after the lock
        assert!(!swipe.move_to(10.0, 112.0));
        assert_eq!(swipe.end(), None);
    }

    #[test]
    fn test_short_swipe_ignored() {
        let mut swipe = SwipeTracker::new(50.0, 6.0);
        swipe.start(100.0, 100.0);
        swipe.move_to(60.0, 100.0);
        assert_eq!(swipe.end(), None);
        assert_eq!(swipe.end(), None);
        assert!(!swipe.is_dragging());
    }

    #[test]
    fn test_crossfade_swaps_roles() {
        let mut layers = CrossfadeLayers::new("one.jpg");
        assert_eq!(layers.opacity(Layer::A), 1.0);
        assert_eq!(layers.opacity(Layer::B), 0.0);

        let incoming = layers.begin("two.jpg");
        assert_eq!(incoming, Layer::B);
        assert_eq!(layers.source(Layer::B), "two.jpg");
        assert_eq!(layers.opacity(Layer::B), 1.0);
        assert_eq!(layers.opacity(Layer::A), 0.0);

        layers.complete();
        assert_eq!(layers.active(), Layer::B);
        assert_eq!(layers.opacity(Layer::B), 1.0);

        assert_eq!(layers.begin("three.jpg"), Layer::A);
        assert_eq!(layers.begin("four.jpg"), Layer::B);
        assert_eq!(layers.active(), Layer::A);
        assert_eq!(layers.source(Layer::B), "four.jpg");
    }

    #[test]
    fn test_replace_visible_layer() {
        let mut layers = CrossfadeLayers::new("broken.jpg");
        layers.replace_visible(FALLBACK_IMG);
        assert_eq!(layers.source(Layer::A), FALLBACK_IMG);
        assert_eq!(layers.opacity(Layer::A), 1.0);

        // Mid-fade the incoming layer is the one on screen.
        let incoming = layers.begin("next.jpg");
        layers.replace_visible(FALLBACK_IMG);
        assert_eq!(layers.source(incoming), FALLBACK_IMG);
        assert!(layers.is_fading());
        layers.complete();
        assert_eq!(layers.source(layers.active()), FALLBACK_IMG);
    }
}
