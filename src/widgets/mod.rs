//! Stateful site components. Each one owns its view-state and is driven
//! through [`crate::state::Reducer`].

pub mod cart;
pub mod catalog;
pub mod chat;
pub mod checkout;
pub mod contact;
pub mod form;
pub mod preferences;
pub mod pricing;
pub mod search;
pub mod showcase;
pub mod toast;
