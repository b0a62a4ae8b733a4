//! Map viewport engine for the campaign wiki.
//!
//! Everything in this crate is UI-agnostic: the web front-end feeds it
//! container sizes, image sizes, pointer input and fetched descriptors, and
//! reads back transforms, marker descriptors and detail-panel content.

pub mod clamp;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod models;
pub mod navigator;
pub mod validate;

pub use controller::{ClickOutcome, ContainerKind, DevAction, MapController};
pub use error::MapError;
