//! Core of a manual image-triage tool: walk an ordered queue of images and,
//! for each one, copy it into any number of checked destination folders,
//! then delete (or recycle) the source, skip ahead, or go back.
//!
//! The presentation layer is not part of this crate. A frontend drives a
//! [`core::Session`] with commands and observes [`core::SessionEvent`]s; the
//! session owns the image queue, the destination set, the ignore/favorite
//! path lists and the running statistics.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod utils;

pub use error::{Result, SiftError};
