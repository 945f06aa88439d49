// SPDX-License-Identifier: MPL-2.0
//! `facemark` is a desktop review tool for facial landmark annotations on
//! video, built with the Iced GUI framework.
//!
//! It plays a video alongside its per-frame landmark table, draws the points
//! and iris circles over each frame, and lets a reviewer pick up a misplaced
//! point and drop it where it belongs.

pub mod app;
pub mod config;
pub mod error;
pub mod landmarks;
pub mod media;
pub mod overlay;
pub mod playback;
pub mod session;
pub mod viewer;

#[cfg(test)]
pub mod test_utils;
