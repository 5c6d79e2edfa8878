// src/output/mod.rs
//! Output handling with separate planning and execution.
//!
//! A delivery is first described as an [`OutputPlan`] (pure data), then
//! carried out by [`deliver`], the only place that touches the filesystem
//! or stdout.

mod types;
mod writer;

pub use types::{DeliveryTarget, OutputFormat, OutputPlan, OutputReport};
pub use writer::deliver;
