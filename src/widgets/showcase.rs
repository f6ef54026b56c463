//! Content sections driven by the generic primitives: FAQ accordion, tabs,
//! testimonial slider, stats counters, modals and the mobile navbar.

use std::time::Duration;

use crate::error::StateError;
use crate::fixtures::{self, CounterSpec};
use crate::state::toggle::DisclosureAction;
use crate::state::{Carousel, Disclosure, NumberFormat, Overflow, PanelMode, Panels, Reducer, Tween};

pub const AUTOPLAY_DELAY: Duration = Duration::from_millis(5000);

/// FAQ accordion with the first entry expanded.
pub fn faq_accordion(mode: PanelMode) -> Panels {
    Panels::new(fixtures::faq().len(), mode).with_open(&[0])
}

pub fn tab_strip() -> Carousel {
    Carousel::new(fixtures::tabs().len(), Overflow::Wrap)
}

pub fn testimonial_slider(autoplay: bool) -> Carousel {
    let slider = Carousel::new(fixtures::testimonials().len(), Overflow::Wrap);
    if autoplay {
        slider.autoplay(AUTOPLAY_DELAY)
    } else {
        slider
    }
}

/// Collapsible navigation for narrow screens.
pub fn mobile_menu() -> Disclosure {
    Disclosure::default()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Counter {
    pub spec: CounterSpec,
    pub tween: Tween,
    format: NumberFormat,
}

impl Counter {
    pub fn new(spec: CounterSpec) -> Self {
        let format = NumberFormat {
            prefix: spec.prefix.to_string(),
            suffix: spec.suffix.to_string(),
            decimals: spec.decimals,
            large: spec.large,
        };
        Self {
            tween: Tween::new(spec.target),
            spec,
            format,
        }
    }

    pub fn display(&self) -> String {
        self.format.format(self.tween.current())
    }

    pub fn final_display(&self) -> String {
        self.format.format(self.tween.target())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsAction {
    /// The panel scrolled into view
    Start,
    /// One animation frame
    Frame,
    /// Jump to the final values
    Finish,
    Reset,
}

/// Stats counters that animate once when they become visible.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsPanel {
    counters: Vec<Counter>,
    started: bool,
}

impl Default for StatsPanel {
    fn default() -> Self {
        Self::new(fixtures::counters())
    }
}

impl StatsPanel {
    pub fn new(specs: Vec<CounterSpec>) -> Self {
        Self {
            counters: specs.into_iter().map(Counter::new).collect(),
            started: false,
        }
    }

    pub fn counters(&self) -> &[Counter] {
        &self.counters
    }

    pub fn is_running(&self) -> bool {
        self.started && !self.is_done()
    }

    pub fn is_done(&self) -> bool {
        self.counters.iter().all(|c| c.tween.is_done())
    }

    /// Time between frames.
    pub fn frame(&self) -> Duration {
        self.counters
            .first()
            .map_or(Tween::DEFAULT_DURATION / Tween::DEFAULT_STEPS, |c| c.tween.frame())
    }
}

impl Reducer for StatsPanel {
    type Action = StatsAction;

    fn apply(&mut self, action: StatsAction) -> Result<(), StateError> {
        match action {
            StatsAction::Start => self.started = true,
            StatsAction::Frame => {
                // Frames before the panel is visible do nothing
                if self.started {
                    for c in &mut self.counters {
                        c.tween.tick();
                    }
                }
            }
            StatsAction::Finish => {
                self.started = true;
                for c in &mut self.counters {
                    c.tween.finish();
                }
            }
            StatsAction::Reset => {
                self.started = false;
                for c in &mut self.counters {
                    c.tween.reset();
                }
            }
        }
        Ok(())
    }
}

// Modals

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalSpec {
    pub id: &'static str,
    pub button: &'static str,
    pub title: &'static str,
}

pub const MODALS: &[ModalSpec] = &[
    ModalSpec {
        id: "demo-modal",
        button: "Demo Modal",
        title: "🚀 Welcome to TuskPHP",
    },
    ModalSpec {
        id: "image-modal",
        button: "Image Gallery",
        title: "🖼️ Image Gallery",
    },
    ModalSpec {
        id: "form-modal",
        button: "Quick Form",
        title: "📝 Quick Contact",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    Open(String),
    Close(String),
    /// Escape closes every open modal
    Escape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modals {
    specs: &'static [ModalSpec],
    states: Vec<Disclosure>,
}

impl Default for Modals {
    fn default() -> Self {
        Self::new(MODALS)
    }
}

impl Modals {
    pub fn new(specs: &'static [ModalSpec]) -> Self {
        Self {
            specs,
            states: vec![Disclosure::default(); specs.len()],
        }
    }

    pub fn specs(&self) -> &'static [ModalSpec] {
        self.specs
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.index(id)
            .map_or(false, |i| self.states[i].is_open())
    }

    /// Page scrolling is locked while any modal is open.
    pub fn scroll_locked(&self) -> bool {
        self.states.iter().any(|d| d.is_open())
    }

    fn index(&self, id: &str) -> Option<usize> {
        self.specs.iter().position(|s| s.id == id)
    }

    fn disclosure(&mut self, id: &str) -> Result<&mut Disclosure, StateError> {
        let i = self.index(id).ok_or_else(|| StateError::missing("modal", id))?;
        Ok(&mut self.states[i])
    }
}

impl Reducer for Modals {
    type Action = ModalAction;

    fn apply(&mut self, action: ModalAction) -> Result<(), StateError> {
        match action {
            ModalAction::Open(id) => self.disclosure(&id)?.apply(DisclosureAction::Open),
            ModalAction::Close(id) => self.disclosure(&id)?.apply(DisclosureAction::Close),
            ModalAction::Escape => {
                for d in &mut self.states {
                    d.apply(DisclosureAction::Close)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::toggle::PanelAction;
    use crate::state::paging::SlideAction;

    #[test]
    fn test_faq_starts_with_first_open() {
        let faq = faq_accordion(PanelMode::Single);
        assert!(faq.is_open(0));
        let faq = faq.reduce(PanelAction::Toggle(3));
        assert!(faq.is_open(3) && !faq.is_open(0));
    }

    #[test]
    fn test_tabs_wrap() {
        let tabs = tab_strip().reduce(SlideAction::Prev);
        assert_eq!(tabs.index(), 4);
    }

    #[test]
    fn test_slider_autoplay() {
        let mut slider = testimonial_slider(true);
        assert!(!slider.advance_if_due(Duration::from_millis(4000)));
        assert!(slider.advance_if_due(Duration::from_millis(1000)));
        assert_eq!(slider.index(), 1);
        assert!(!testimonial_slider(false).is_playing());
    }

    #[test]
    fn test_stats_wait_until_visible() {
        let mut stats = StatsPanel::default();
        stats.apply(StatsAction::Frame).unwrap();
        assert_eq!(stats.counters()[0].display(), "0+");

        stats.apply(StatsAction::Start).unwrap();
        for _ in 0..Tween::DEFAULT_STEPS {
            stats.apply(StatsAction::Frame).unwrap();
        }
        assert!(stats.is_done());
        let shown: Vec<String> = stats.counters().iter().map(Counter::display).collect();
        assert_eq!(shown, vec!["15,000+", "99.9%", "<250ms", "50+", "1.0M+", "24/7"]);
    }

    #[test]
    fn test_stats_frame_rate() {
        let stats = StatsPanel::default();
        assert_eq!(stats.frame(), Duration::from_millis(2000) / 60);
    }

    #[test]
    fn test_modals() {
        let mut m = Modals::default();
        m.apply(ModalAction::Open("image-modal".into())).unwrap();
        m.apply(ModalAction::Open("form-modal".into())).unwrap();
        assert!(m.scroll_locked());
        m.apply(ModalAction::Close("image-modal".into())).unwrap();
        assert!(m.is_open("form-modal") && !m.is_open("image-modal"));

        m.apply(ModalAction::Escape).unwrap();
        assert!(!m.scroll_locked());
        assert!(m.apply(ModalAction::Open("nope".into())).is_err());
    }
}
