// SPDX-License-Identifier: MPL-2.0
//! Facial landmark data and point editing.
//!
//! A [`LandmarkSet`] holds the per-frame annotation points plus optional iris
//! circles. [`table`] parses the comma-delimited annotation file into sets
//! keyed by frame index. [`LandmarkEditState`] implements the lift/place/undo
//! state machine used to correct individual points.

mod edit;
mod set;
pub mod table;

pub use edit::{hit_threshold, LandmarkEditState};
pub use set::{IrisCircle, LandmarkSet, Point};
pub use table::LandmarkTable;
