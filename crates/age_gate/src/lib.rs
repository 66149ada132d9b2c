//! Age verification overlay: a curtain, a dialog and generated content
//! rows stacked above whatever the host page already shows.
//!
//! The pieces are usable on their own ([`zindex`], [`focus`],
//! [`elements`], [`content`]) and are wired together by [`Modal`] and,
//! one level up, [`AgeGate`].

#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]

pub mod config;
pub mod content;
pub mod elements;
mod error;
pub mod focus;
mod gate;
mod modal;
pub mod reference;
pub mod styles;
pub mod zindex;

pub use config::{ContentConfig, FieldConfig, GateConfig};
pub use error::{ConfigError, ModalError};
pub use gate::{AgeGate, ROOT_ID};
pub use modal::Modal;
pub use styles::StyleMap;
