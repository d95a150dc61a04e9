//! Shared test data for the termdelta workspace.
//!
//! `rows` builds individual rows in the shape the RF2 mappings produce;
//! `scenarios` bundles small datasets with known answers.

pub mod rows;
pub mod scenarios;

pub use rows::*;
