//! View-state primitives shared by every component.
//!
//! A component's state is a plain owned value. User input is turned into a
//! closed `Action` and fed through [`Reducer::apply`]; renderers only ever
//! read the resulting state.

pub mod counter;
pub mod listing;
pub mod paging;
pub mod toggle;

pub use counter::{NumberFormat, Tween};
pub use listing::{Listed, Listing};
pub use paging::{Carousel, Overflow, Pager};
pub use toggle::{Disclosure, PanelMode, Panels, Toggle};

use crate::error::StateError;

pub trait Reducer {
    type Action;

    /// Apply one action in place. A returned error leaves the state untouched,
    /// except for the invalid-field flags a blocked form records.
    fn apply(&mut self, action: Self::Action) -> Result<(), StateError>;

    /// `(state, action) -> state`. Modeled misses are logged and ignored.
    fn reduce(mut self, action: Self::Action) -> Self
    where
        Self: Sized,
    {
        if let Err(e) = self.apply(action) {
            tracing::debug!("Ignoring action: {}", e);
        }
        self
    }
}
