//! Robot-facing types.
//!
//! - [`leg`]: leg enumeration and per-leg array indexing.
//! - [`joint`]: the two motors of a leg.
//! - [`commands`]: binary command frames and text gait selection.
pub mod commands;
pub mod joint;
pub mod leg;
