use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::StateError;
use crate::state::Reducer;

pub const MAX_TOASTS: usize = 5;
pub const DEFAULT_DISMISS: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
    /// Stays until dismissed
    Loading,
}

impl ToastKind {
    pub const ALL: [ToastKind; 5] = [
        Self::Success,
        Self::Error,
        Self::Warning,
        Self::Info,
        Self::Loading,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Loading => "loading",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Error => "✕",
            Self::Warning => "⚠",
            Self::Info => "ℹ",
            Self::Loading => "⟳",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastPosition {
    #[default]
    TopRight,
    TopLeft,
    TopCenter,
    BottomRight,
    BottomLeft,
    BottomCenter,
}

impl ToastPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopRight => "top-right",
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::BottomRight => "bottom-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
        }
    }

    /// Bottom stacks put the newest toast first.
    pub fn newest_first(self) -> bool {
        matches!(self, Self::BottomRight | Self::BottomLeft | Self::BottomCenter)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
    /// Time left before it goes away; `None` means it stays
    pub remaining: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastAction {
    Show {
        kind: ToastKind,
        title: String,
        message: String,
    },
    Dismiss(u64),
    DismissAll,
    /// Time passed since the last tick
    Tick(Duration),
    SetAutoDismiss(bool),
}

impl ToastAction {
    pub fn show(kind: ToastKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Show {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
    auto_dismiss: bool,
    dismiss_after: Duration,
    position: ToastPosition,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(ToastPosition::default(), DEFAULT_DISMISS)
    }
}

impl ToastQueue {
    pub fn new(position: ToastPosition, dismiss_after: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            next_id: 1,
            auto_dismiss: true,
            dismiss_after,
            position,
        }
    }

    /// Oldest first.
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// In the order the container shows them.
    pub fn stacked(&self) -> Vec<&Toast> {
        if self.position.newest_first() {
            self.toasts.iter().rev().collect()
        } else {
            self.toasts.iter().collect()
        }
    }

    pub fn position(&self) -> ToastPosition {
        self.position
    }

    pub fn auto_dismiss(&self) -> bool {
        self.auto_dismiss
    }

    pub fn dismiss_after(&self) -> Duration {
        self.dismiss_after
    }
}

impl Reducer for ToastQueue {
    type Action = ToastAction;

    fn apply(&mut self, action: ToastAction) -> Result<(), StateError> {
        match action {
            ToastAction::Show {
                kind,
                title,
                message,
            } => {
                if self.toasts.len() >= MAX_TOASTS {
                    let evicted = self.toasts.remove(0);
                    tracing::debug!("Toast {} evicted", evicted.id);
                }
                let remaining = (self.auto_dismiss && kind != ToastKind::Loading)
                    .then_some(self.dismiss_after);
                self.toasts.push(Toast {
                    id: self.next_id,
                    kind,
                    title,
                    message,
                    remaining,
                });
                self.next_id += 1;
            }
            ToastAction::Dismiss(id) => {
                let pos = self
                    .toasts
                    .iter()
                    .position(|t| t.id == id)
                    .ok_or_else(|| StateError::missing("toast", id))?;
                self.toasts.remove(pos);
            }
            ToastAction::DismissAll => self.toasts.clear(),
            ToastAction::Tick(elapsed) => {
                for toast in &mut self.toasts {
                    if let Some(left) = toast.remaining.as_mut() {
                        *left = left.saturating_sub(elapsed);
                    }
                }
                self.toasts.retain(|t| t.remaining != Some(Duration::ZERO));
            }
            ToastAction::SetAutoDismiss(on) => self.auto_dismiss = on,
        }
        Ok(())
    }
}
