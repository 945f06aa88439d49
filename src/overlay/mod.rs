// SPDX-License-Identifier: MPL-2.0
//! Landmark overlay rasterization.

mod renderer;

pub use renderer::{iris_stroke_width, marker_radius, render};
