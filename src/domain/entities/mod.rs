//! Core domain entities.
//!
//! - [`Link`] - A shortened URL mapping with optional device-specific target
//! - [`ClickEvent`] - One recorded visit on a link
//!
//! Creation inputs live next to their entity: [`CreateLink`] carries raw caller
//! fields, [`NewLink`] and [`NewClickEvent`] are the rows handed to repositories.

pub mod click;
pub mod link;

pub use click::{ClickEvent, DEFAULT_DEVICE_TYPE, NewClickEvent, UNKNOWN_LABEL};
pub use link::{CreateLink, InsertOutcome, Link, NewLink};
