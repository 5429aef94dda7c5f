//! Unit tests for seed modules

pub mod session;
