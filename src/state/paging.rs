use std::ops::Range;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Reducer;
use crate::error::StateError;

/// Page numbers are 1-based and always within `[1, total_pages]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    per_page: usize,
    len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Next,
    Prev,
    Jump(usize),
    First,
    Last,
}

impl Pager {
    pub fn new(len: usize, per_page: usize) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
            len,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn total_pages(&self) -> usize {
        self.len.div_ceil(self.per_page).max(1)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Item range shown on the current page.
    pub fn range(&self) -> Range<usize> {
        let start = ((self.page - 1) * self.per_page).min(self.len);
        let end = (start + self.per_page).min(self.len);
        start..end
    }

    /// The underlying item count changed (filtering); go back to page one.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.page = 1;
    }
}

impl Reducer for Pager {
    type Action = PageAction;

    fn apply(&mut self, action: PageAction) -> Result<(), StateError> {
        let total = self.total_pages();
        self.page = match action {
            PageAction::Next => (self.page + 1).min(total),
            PageAction::Prev => self.page.saturating_sub(1).max(1),
            PageAction::Jump(page) => page.clamp(1, total),
            PageAction::First => 1,
            PageAction::Last => total,
        };
        Ok(())
    }
}

/// What happens when a carousel moves past either end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    #[default]
    Wrap,
    Clamp,
}

/// Slide or tab selection. Indices are 0-based and within `[0, len)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
    overflow: Overflow,
    playing: bool,
    interval: Duration,
    since_advance: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideAction {
    Next,
    Prev,
    First,
    Last,
    GoTo(usize),
    Play,
    Pause,
    TogglePlay,
}

impl Carousel {
    pub fn new(len: usize, overflow: Overflow) -> Self {
        Self {
            index: 0,
            len,
            overflow,
            playing: false,
            interval: Duration::from_secs(5),
            since_advance: Duration::ZERO,
        }
    }

    pub fn autoplay(mut self, interval: Duration) -> Self {
        self.playing = true;
        self.interval = interval;
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn overflow(&self) -> Overflow {
        self.overflow
    }

    pub fn can_go_next(&self) -> bool {
        self.overflow == Overflow::Wrap || self.index + 1 < self.len
    }

    pub fn can_go_prev(&self) -> bool {
        self.overflow == Overflow::Wrap || self.index > 0
    }

    /// "2 / 5" style counter, 1-based.
    pub fn counter(&self) -> String {
        format!("{} / {}", (self.index + 1).min(self.len), self.len)
    }

    /// Advance on the autoplay timer. Returns true when the slide changed.
    pub fn advance_if_due(&mut self, elapsed: Duration) -> bool {
        if !self.playing || self.len < 2 {
            return false;
        }
        self.since_advance += elapsed;
        if self.since_advance < self.interval {
            return false;
        }
        self.since_advance = Duration::ZERO;
        let before = self.index;
        self.step_forward();
        // A clamped carousel stops at the end instead of spinning in place
        if before == self.index {
            self.playing = false;
        }
        before != self.index
    }

    fn step_forward(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = match self.overflow {
            Overflow::Wrap => (self.index + 1) % self.len,
            Overflow::Clamp => (self.index + 1).min(self.len - 1),
        };
    }

    fn step_back(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = match (self.overflow, self.index) {
            (Overflow::Wrap, 0) => self.len - 1,
            (_, i) => i.saturating_sub(1),
        };
    }
}

impl Reducer for Carousel {
    type Action = SlideAction;

    fn apply(&mut self, action: SlideAction) -> Result<(), StateError> {
        match action {
            SlideAction::Next => self.step_forward(),
            SlideAction::Prev => self.step_back(),
            SlideAction::First => self.index = 0,
            SlideAction::Last => self.index = self.len.saturating_sub(1),
            SlideAction::GoTo(index) => {
                if index >= self.len {
                    return Err(StateError::OutOfRange {
                        kind: "slide",
                        index,
                        len: self.len,
                    });
                }
                self.index = index;
            }
            SlideAction::Play => self.playing = true,
            SlideAction::Pause => self.playing = false,
            SlideAction::TogglePlay => self.playing = !self.playing,
        }
        // Manual navigation restarts the autoplay countdown
        self.since_advance = Duration::ZERO;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pager_totals() {
        assert_eq!(Pager::new(0, 4).total_pages(), 1);
        assert_eq!(Pager::new(4, 4).total_pages(), 1);
        assert_eq!(Pager::new(6, 4).total_pages(), 2);
    }

    #[test]
    fn test_next_at_last_page_is_noop() {
        let mut p = Pager::new(6, 4);
        p.apply(PageAction::Next).unwrap();
        assert_eq!(p.page(), 2);
        assert_eq!(p.range(), 4..6);
        p.apply(PageAction::Next).unwrap();
        assert_eq!(p.page(), 2);
        assert!(!p.has_next());
    }

    #[test]
    fn test_jump_clamps() {
        let mut p = Pager::new(20, 5);
        p.apply(PageAction::Jump(99)).unwrap();
        assert_eq!(p.page(), 4);
        p.apply(PageAction::Jump(0)).unwrap();
        assert_eq!(p.page(), 1);
    }

    #[test]
    fn test_carousel_wraps() {
        let mut c = Carousel::new(3, Overflow::Wrap);
        c.apply(SlideAction::Prev).unwrap();
        assert_eq!(c.index(), 2);
        c.apply(SlideAction::Next).unwrap();
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn test_carousel_clamps() {
        let mut c = Carousel::new(3, Overflow::Clamp);
        c.apply(SlideAction::Prev).unwrap();
        assert_eq!(c.index(), 0);
        assert!(!c.can_go_prev());
        c.apply(SlideAction::Last).unwrap();
        c.apply(SlideAction::Next).unwrap();
        assert_eq!(c.index(), 2);
        assert!(!c.can_go_next());
    }

    #[test]
    fn test_go_to_out_of_range() {
        let mut c = Carousel::new(3, Overflow::Wrap);
        assert!(c.apply(SlideAction::GoTo(3)).is_err());
        assert_eq!(c.index(), 0);
        c.apply(SlideAction::GoTo(1)).unwrap();
        assert_eq!(c.counter(), "2 / 3");
    }

    #[test]
    fn test_autoplay_advances_on_interval() {
        let mut c = Carousel::new(2, Overflow::Wrap).autoplay(Duration::from_secs(5));
        assert!(!c.advance_if_due(Duration::from_secs(3)));
        assert!(c.advance_if_due(Duration::from_secs(2)));
        assert_eq!(c.index(), 1);

        c.apply(SlideAction::Pause).unwrap();
        assert!(!c.advance_if_due(Duration::from_secs(10)));
    }

    #[test]
    fn test_clamped_autoplay_stops_at_end() {
        let mut c = Carousel::new(2, Overflow::Clamp).autoplay(Duration::from_secs(1));
        assert!(c.advance_if_due(Duration::from_secs(1)));
        assert!(!c.advance_if_due(Duration::from_secs(1)));
        assert!(!c.is_playing());
    }

    proptest! {
        #[test]
        fn pager_stays_in_bounds(
            len in 0usize..100,
            per_page in 1usize..10,
            moves in proptest::collection::vec(any::<bool>(), 0..50),
        ) {
            let mut p = Pager::new(len, per_page);
            for forward in moves {
                let action = if forward { PageAction::Next } else { PageAction::Prev };
                p.apply(action).unwrap();
                prop_assert!(p.page() >= 1 && p.page() <= p.total_pages());
            }
        }

        #[test]
        fn carousel_stays_in_bounds(
            len in 1usize..12,
            clamp in any::<bool>(),
            moves in proptest::collection::vec(any::<bool>(), 0..50),
        ) {
            let overflow = if clamp { Overflow::Clamp } else { Overflow::Wrap };
            let mut c = Carousel::new(len, overflow);
            for forward in moves {
                let action = if forward { SlideAction::Next } else { SlideAction::Prev };
                c.apply(action).unwrap();
                prop_assert!(c.index() < len);
            }
        }
    }
}
