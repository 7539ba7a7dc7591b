//! Output rendering for catalog entries and resolution results.
//!
//! # Submodules
//!
//! - [`json`]: JSON for stdout and the dated `resolve-all` report file
//! - [`text`]: Human-readable lines for the terminal
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── 2026-10-18/
//! │   └── epapers.json
//! └── 2026-10-19/
//!     └── epapers.json
//! ```

pub mod json;
pub mod text;
