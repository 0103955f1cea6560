//! Integration tests for StudyKart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p studykart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `purchase_flow` - Catalog resolution through intent dispatch
//! - `channel_routing` - Support channel ranking
//! - `store_settings` - Settings document parsing and fallbacks
