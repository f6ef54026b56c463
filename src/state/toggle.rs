use serde::{Deserialize, Serialize};

use super::Reducer;
use crate::error::StateError;

/// A single boolean flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Toggle(bool);

impl Toggle {
    pub fn new(on: bool) -> Self {
        Self(on)
    }

    pub fn is_on(self) -> bool {
        self.0
    }

    pub fn flip(&mut self) -> bool {
        self.0 = !self.0;
        self.0
    }

    pub fn set(&mut self, on: bool) {
        self.0 = on;
    }
}

/// An open/closed surface: modal, chat window, settings drawer, mobile menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Disclosure {
    open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisclosureAction {
    Open,
    Close,
    Toggle,
}

impl Disclosure {
    pub fn is_open(self) -> bool {
        self.open
    }

    /// Value for the `aria-expanded` attribute of the controlling element.
    pub fn aria_expanded(self) -> &'static str {
        if self.open {
            "true"
        } else {
            "false"
        }
    }
}

impl Reducer for Disclosure {
    type Action = DisclosureAction;

    fn apply(&mut self, action: DisclosureAction) -> Result<(), StateError> {
        self.open = match action {
            DisclosureAction::Open => true,
            DisclosureAction::Close => false,
            DisclosureAction::Toggle => !self.open,
        };
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelMode {
    #[default]
    Multiple,
    Single,
}

/// Accordion panels with keyboard focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panels {
    open: Vec<bool>,
    mode: PanelMode,
    focus: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Toggle(usize),
    ExpandAll,
    CollapseAll,
    SwitchMode,
    FocusNext,
    FocusPrev,
    FocusFirst,
    FocusLast,
    /// Toggle whichever panel holds focus (Enter/Space).
    ToggleFocused,
}

impl Panels {
    pub fn new(len: usize, mode: PanelMode) -> Self {
        Self {
            open: vec![false; len],
            mode,
            focus: 0,
        }
    }

    /// Start with the given panels already expanded.
    pub fn with_open(mut self, indices: &[usize]) -> Self {
        for &i in indices {
            if let Some(slot) = self.open.get_mut(i) {
                *slot = true;
            }
        }
        if self.mode == PanelMode::Single {
            self.keep_first_open();
        }
        self
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn mode(&self) -> PanelMode {
        self.mode
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open.get(index).copied().unwrap_or(false)
    }

    pub fn open_count(&self) -> usize {
        self.open.iter().filter(|o| **o).count()
    }

    fn toggle(&mut self, index: usize) -> Result<(), StateError> {
        let len = self.open.len();
        let was_open = *self.open.get(index).ok_or(StateError::OutOfRange {
            kind: "panel",
            index,
            len,
        })?;

        if self.mode == PanelMode::Single {
            self.open.iter_mut().for_each(|o| *o = false);
        }
        self.open[index] = !was_open;
        Ok(())
    }

    fn keep_first_open(&mut self) {
        let mut seen = false;
        for slot in &mut self.open {
            if *slot && seen {
                *slot = false;
            }
            seen |= *slot;
        }
    }
}

impl Reducer for Panels {
    type Action = PanelAction;

    fn apply(&mut self, action: PanelAction) -> Result<(), StateError> {
        let len = self.open.len();
        match action {
            PanelAction::Toggle(i) => self.toggle(i)?,
            PanelAction::ToggleFocused => self.toggle(self.focus)?,
            PanelAction::ExpandAll => self.open.iter_mut().for_each(|o| *o = true),
            PanelAction::CollapseAll => self.open.iter_mut().for_each(|o| *o = false),
            PanelAction::SwitchMode => {
                self.mode = match self.mode {
                    PanelMode::Multiple => {
                        self.keep_first_open();
                        PanelMode::Single
                    }
                    PanelMode::Single => PanelMode::Multiple,
                };
            }
            PanelAction::FocusNext if len > 0 => self.focus = (self.focus + 1) % len,
            PanelAction::FocusPrev if len > 0 => {
                self.focus = self.focus.checked_sub(1).unwrap_or(len - 1)
            }
            PanelAction::FocusFirst => self.focus = 0,
            PanelAction::FocusLast => self.focus = len.saturating_sub(1),
            PanelAction::FocusNext | PanelAction::FocusPrev => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_disclosure_toggle() {
        let d = Disclosure::default().reduce(DisclosureAction::Toggle);
        assert!(d.is_open());
        assert_eq!(d.aria_expanded(), "true");
        let d = d.reduce(DisclosureAction::Toggle);
        assert!(!d.is_open());
        let d = d.reduce(DisclosureAction::Close);
        assert!(!d.is_open());
    }

    #[test]
    fn test_multiple_mode_keeps_panels_open() {
        let mut p = Panels::new(4, PanelMode::Multiple);
        p.apply(PanelAction::Toggle(0)).unwrap();
        p.apply(PanelAction::Toggle(2)).unwrap();
        assert!(p.is_open(0) && p.is_open(2));
        assert_eq!(p.open_count(), 2);
    }

    #[test]
    fn test_single_mode_closes_others() {
        let mut p = Panels::new(3, PanelMode::Single);
        p.apply(PanelAction::Toggle(0)).unwrap();
        p.apply(PanelAction::Toggle(1)).unwrap();
        assert!(!p.is_open(0));
        assert!(p.is_open(1));

        // Closing the open panel leaves everything closed
        p.apply(PanelAction::Toggle(1)).unwrap();
        assert_eq!(p.open_count(), 0);
    }

    #[test]
    fn test_switch_to_single_keeps_first_open_panel() {
        let mut p = Panels::new(4, PanelMode::Multiple);
        p.apply(PanelAction::ExpandAll).unwrap();
        p.apply(PanelAction::Toggle(0)).unwrap();
        p.apply(PanelAction::SwitchMode).unwrap();
        assert_eq!(p.mode(), PanelMode::Single);
        assert!(!p.is_open(0));
        assert!(p.is_open(1));
        assert_eq!(p.open_count(), 1);
    }

    #[test]
    fn test_toggle_out_of_range_is_reported() {
        let mut p = Panels::new(2, PanelMode::Multiple);
        let err = p.apply(PanelAction::Toggle(5)).unwrap_err();
        assert_eq!(
            err,
            StateError::OutOfRange {
                kind: "panel",
                index: 5,
                len: 2
            }
        );
        assert_eq!(p.open_count(), 0);
    }

    #[test]
    fn test_focus_wraps() {
        let mut p = Panels::new(3, PanelMode::Multiple);
        p.apply(PanelAction::FocusPrev).unwrap();
        assert_eq!(p.focus(), 2);
        p.apply(PanelAction::FocusNext).unwrap();
        assert_eq!(p.focus(), 0);
        p.apply(PanelAction::FocusLast).unwrap();
        p.apply(PanelAction::ToggleFocused).unwrap();
        assert!(p.is_open(2));
    }

    proptest! {
        #[test]
        fn toggle_n_times_is_xor_parity(initial in any::<bool>(), n in 0usize..64) {
            let mut t = Toggle::new(initial);
            for _ in 0..n {
                t.flip();
            }
            prop_assert_eq!(t.is_on(), initial ^ (n % 2 == 1));
        }

        #[test]
        fn single_mode_never_has_two_open(ops in proptest::collection::vec(0usize..5, 0..40)) {
            let mut p = Panels::new(5, PanelMode::Single);
            for i in ops {
                p.apply(PanelAction::Toggle(i)).unwrap();
                prop_assert!(p.open_count() <= 1);
            }
        }
    }
}
