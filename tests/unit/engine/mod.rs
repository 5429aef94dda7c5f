//! Unit tests for the core engine modules

pub mod diagnostics;
pub mod scan;
