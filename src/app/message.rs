// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use iced::widget::scrollable::AbsoluteOffset;
use std::path::PathBuf;

/// Messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Playback timer fired. Carries the tick epoch it was scheduled under,
    /// so ticks from before a transport change are recognized as stale.
    Tick(u64),
    /// Slider dragged to a new frame; preview only.
    SliderMoved(u32),
    /// Slider drag finished; commit the seek.
    SliderReleased,
    Play,
    Stop,
    StepForward,
    StepBack,
    ToggleOverlay,
    FitToView,
    /// Cursor moved over the frame view, in viewport coordinates.
    CursorMoved(iced::Point),
    /// Cursor left the frame view.
    CursorLeft,
    /// Left button down on the frame view. Places the lifted landmark, lifts
    /// one within reach, or starts a pan drag.
    FramePressed,
    /// Left button released over the frame view; ends a pan drag.
    FrameReleased,
    /// The frame scrollable reported a new offset; mirrored into the
    /// session's coordinate mapping.
    FrameScrolled(AbsoluteOffset),
    /// Ctrl+Z: restore the lifted landmark.
    Undo,
    /// Mouse wheel over the frame view; positive zooms in.
    WheelZoomed(f32),
    /// Window resized; the frame viewport follows.
    ViewportResized(iced::Size),
    OpenVideoDialog,
    VideoFileChosen(Option<PathBuf>),
    OpenTableDialog,
    TableFileChosen(Option<PathBuf>),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional video path to open on startup.
    pub video_path: Option<String>,
    /// Optional annotation table to load alongside the video.
    pub landmarks_path: Option<String>,
}
