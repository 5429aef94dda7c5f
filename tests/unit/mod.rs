//! Unit test infrastructure for seedext
//!
//! Tests are organized by module:
//! - `engine/` - diagonal table, extension, scanning, diagnostics
//! - `seed/` - word finder drivers and the search session

pub mod engine;
pub mod helpers;
pub mod seed;
