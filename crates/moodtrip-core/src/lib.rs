//! moodtrip Core
//!
//! Core types, traits, and utilities shared across moodtrip components.
//!
//! This crate provides:
//! - The VAD vector and the closed set of mood labels
//! - Error types and result handling
//! - The trip catalog boundary consumed after mood inference

pub mod catalog;
pub mod error;
pub mod types;

pub use catalog::{InMemoryCatalog, Trip, TripCatalog};
pub use error::{Error, Result};
pub use types::{Mood, MoodResult, Vad};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::catalog::{Trip, TripCatalog};
    pub use crate::error::{Error, Result};
    pub use crate::types::{Mood, MoodResult, Vad};
}
