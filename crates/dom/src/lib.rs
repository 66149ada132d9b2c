//! In-memory DOM used to host and test the age gate overlay.
//!
//! Nodes live in an [`indextree::Arena`]; every mutation goes through
//! [`Document`] so a mutation journal ([`DomUpdate`]) can be kept alongside.

#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]

mod cascade;
mod document;
mod error;
mod node;
mod parser;
mod printing;
pub mod style;
mod updates;

pub use cascade::StyleCascade;
pub use document::Document;
pub use error::DomError;
pub use indextree::NodeId;
pub use node::{DomNode, NodeKind};
pub use printing::{escape_attr, escape_text};
pub use updates::DomUpdate;
