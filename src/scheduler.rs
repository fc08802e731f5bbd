// src/scheduler.rs

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseReason {
    Hover,
    Hidden,
    Offscreen,
}

/// What the hero should do when its timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Advance,
    /// Next image still loading; try again shortly.
    Defer,
    Idle,
}

/// Auto-advance for the hero carousel. Running only while there is more
/// than one slide, nothing holds it paused, and it has not been torn down.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoAdvance {
    slides: usize,
    hovered: bool,
    hidden: bool,
    offscreen: bool,
    torn_down: bool,
}

impl AutoAdvance {
    pub fn new(slides: usize) -> Self {
        Self {
            slides,
            hovered: false,
            hidden: false,
            offscreen: false,
            torn_down: false,
        }
    }

    pub fn state(&self) -> SchedulerState {
        let paused = self.hovered || self.hidden || self.offscreen;
        if self.slides > 1 && !paused && !self.torn_down {
            SchedulerState::Running
        } else {
            SchedulerState::Paused
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == SchedulerState::Running
    }

    /// Raises or clears one pause condition. Returns the new state when it
    /// differs from the old one.
    pub fn set(&mut self, reason: PauseReason, active: bool) -> Option<SchedulerState> {
        let before = self.state();
        match reason {
            PauseReason::Hover => self.hovered = active,
            PauseReason::Hidden => self.hidden = active,
            PauseReason::Offscreen => self.offscreen = active,
        }
        let after = self.state();
        if before != after {
            log::debug!("hero auto-advance {:?} ({:?}={})", after, reason, active);
            Some(after)
        } else {
            None
        }
    }

    pub fn tick(&self, next_ready: bool) -> Tick {
        if !self.is_running() {
            Tick::Idle
        } else if next_ready {
            Tick::Advance
        } else {
            Tick::Defer
        }
    }

    pub fn teardown(&mut self) {
        self.torn_down = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_two_slides() {
        assert_eq!(AutoAdvance::new(0).state(), SchedulerState::Paused);
        assert_eq!(AutoAdvance::new(1).state(), SchedulerState::Paused);
        assert_eq!(AutoAdvance::new(2).state(), SchedulerState::Running);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut auto = AutoAdvance::new(3);
        assert_eq!(auto.set(PauseReason::Hover, true), Some(SchedulerState::Paused));
        assert_eq!(auto.set(PauseReason::Hidden, true), None);
        assert_eq!(auto.set(PauseReason::Hover, false), None);
        assert_eq!(auto.set(PauseReason::Hidden, false), Some(SchedulerState::Running));
        assert_eq!(auto.set(PauseReason::Offscreen, false), None);
    }

    #[test]
    fn test_tick_defers_until_loaded() {
        let mut auto = AutoAdvance::new(3);
        assert_eq!(auto.tick(false), Tick::Defer);
        assert_eq!(auto.tick(true), Tick::Advance);
        auto.set(PauseReason::Offscreen, true);
        assert_eq!(auto.tick(true), Tick::Idle);
    }

    #[test]
    fn test_teardown_is_final() {
        let mut auto = AutoAdvance::new(3);
        auto.teardown();
        assert_eq!(auto.set(PauseReason::Hover, false), None);
        assert_eq!(auto.tick(true), Tick::Idle);
    }
}
