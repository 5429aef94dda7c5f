//! Scoring utilities

pub mod matrix;
