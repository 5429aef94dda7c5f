//! Word-hit tracking and ungapped extension
//!
//! Modeled on the layout of NCBI BLAST's core/ directory:
//!
//! - **Sequences** (`blast_encoding`, `query_info`)
//! - **Scoring** lives in `utils::matrix`
//! - **Diagonal tracking** (`blast_extend`)
//! - **Extension** (`extension`): X-drop walks, one-hit and two-hit
//! - **Scanning** (`scan`)
//! - **Hit storage** (`blast_hits`)
//! - **Diagnostics** (`blast_diagnostics`)

pub mod constants;
pub mod error;

// Sequences
pub mod blast_encoding;
pub mod query_info;

// Extension
pub mod blast_extend;
pub mod extension;

// Scanning
pub mod scan;

// HSP storage
pub mod blast_hits;

// Diagnostics
pub mod blast_diagnostics;

pub use error::{Result, SeedError};
