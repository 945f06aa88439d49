// SPDX-License-Identifier: MPL-2.0
//! Timer-driven playback position and state.

mod controller;

pub use controller::PlaybackController;
