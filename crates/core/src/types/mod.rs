//! Core types for StudyKart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod tier;

pub use id::*;
pub use price::Rupees;
pub use tier::Tier;
