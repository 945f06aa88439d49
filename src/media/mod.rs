// SPDX-License-Identifier: MPL-2.0
//! Video frame access.
//!
//! `FrameSource` wraps the FFmpeg demux/decode pipeline and exposes
//! frame-index based sequential and random access. `VideoSource` is the seam
//! the session depends on, so the interactive core can be exercised without
//! a real decoder.

mod frame;
mod frame_source;

pub use frame::Frame;
pub use frame_source::{init_ffmpeg, FrameSource, VideoSource};
