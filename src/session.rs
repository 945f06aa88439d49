// SPDX-License-Identifier: MPL-2.0
//! The review session: one loaded video, its annotation table, and all
//! interactive state.
//!
//! The session owns the decoder exclusively, so sequential reads and seeks
//! are serialized by construction. Every frame change reloads the landmark
//! set for the new frame from the table and drops any in-flight point edit.

use crate::config::Config;
use crate::error::Result;
use crate::landmarks::{LandmarkEditState, LandmarkSet, LandmarkTable, Point};
use crate::media::{Frame, FrameSource, VideoSource};
use crate::overlay;
use crate::playback::PlaybackController;
use crate::viewer::{DragState, ViewCoordinator};
use std::path::Path;
use std::time::Duration;

pub struct ReviewSession {
    source: Option<Box<dyn VideoSource>>,
    table: Option<LandmarkTable>,
    landmarks: Option<LandmarkSet>,
    edit: LandmarkEditState,
    playback: Option<PlaybackController>,
    view: ViewCoordinator,
    drag: DragState,
    current_frame: Option<Frame>,
    overlay_visible: bool,
    step_frames: i64,
    diagnostic: Option<String>,
}

impl ReviewSession {
    pub fn new(config: &Config) -> Self {
        Self {
            source: None,
            table: None,
            landmarks: None,
            edit: LandmarkEditState::new(),
            playback: None,
            view: ViewCoordinator::new(),
            drag: DragState::default(),
            current_frame: None,
            overlay_visible: config.show_landmarks.unwrap_or(true),
            step_frames: config
                .step_frames
                .unwrap_or(crate::config::DEFAULT_STEP_FRAMES),
            diagnostic: None,
        }
    }

    /// Opens a video file and displays its first frame.
    pub fn load_video<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let source = FrameSource::open(path)?;
        self.install_source(Box::new(source));
        Ok(())
    }

    /// Installs an already-open video source. This is how tests drive the
    /// session without a decoder.
    pub fn install_source(&mut self, mut source: Box<dyn VideoSource>) {
        let mut playback =
            PlaybackController::new(source.length(), source.fps(), self.step_frames);

        let (width, height) = source.frame_size();
        self.view.set_image(width, height);

        if let Some(frame) = source.read_sequential() {
            playback.set_position(frame.index);
            self.set_current_frame(frame);
        } else {
            self.current_frame = None;
            self.landmarks = None;
            self.edit.reset();
        }

        self.source = Some(source);
        self.playback = Some(playback);
        self.diagnostic = None;
    }

    /// Loads an annotation table and applies it to the displayed frame.
    ///
    /// A parse failure leaves no table loaded at all rather than keeping a
    /// stale one.
    pub fn load_landmarks_table<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        match LandmarkTable::load(path) {
            Ok(table) => {
                self.table = Some(table);
                self.refresh_landmarks();
                Ok(())
            }
            Err(e) => {
                self.table = None;
                self.refresh_landmarks();
                Err(e)
            }
        }
    }

    pub fn has_video(&self) -> bool {
        self.source.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.as_ref().is_some_and(PlaybackController::is_playing)
    }

    pub fn tick_epoch(&self) -> u64 {
        self.playback
            .as_ref()
            .map_or(0, PlaybackController::tick_epoch)
    }

    pub fn tick_interval(&self) -> Duration {
        self.playback
            .as_ref()
            .map_or(Duration::from_millis(1000), PlaybackController::tick_interval)
    }

    pub fn play(&mut self) {
        if let Some(playback) = &mut self.playback {
            playback.play();
        }
    }

    pub fn stop(&mut self) {
        if let Some(playback) = &mut self.playback {
            playback.stop();
        }
    }

    /// Handles one playback timer tick tagged with the epoch it was scheduled
    /// under. Stale ticks are discarded; reaching the end of the video stops
    /// playback with the last frame displayed.
    pub fn advance_tick(&mut self, epoch: u64) {
        let Some(playback) = &mut self.playback else {
            return;
        };
        if !playback.tick_is_current(epoch) {
            return;
        }

        let Some(next) = playback.next_frame_index() else {
            playback.stop();
            return;
        };

        let Some(source) = &mut self.source else {
            return;
        };
        match source.read_sequential() {
            Some(frame) => {
                playback.set_position(next);
                self.set_current_frame(frame);
            }
            None => {
                playback.stop();
            }
        }
    }

    /// Seeks to an absolute frame index. Stops playback first.
    ///
    /// An out-of-range target or a failed positional read leaves the
    /// displayed frame and position unchanged and records a diagnostic.
    pub fn seek(&mut self, target: i64) {
        let Some(playback) = &mut self.playback else {
            return;
        };
        playback.stop();
        let Some(index) = playback.validate_seek(target) else {
            self.diagnostic = Some(format!("Seek to frame {target} is out of range"));
            return;
        };

        let Some(source) = &mut self.source else {
            return;
        };
        match source.seek_and_read(i64::from(index)) {
            Some(frame) => {
                playback.set_position(index);
                self.set_current_frame(frame);
            }
            None => {
                self.diagnostic = Some(format!("Could not read frame {index}"));
            }
        }
    }

    /// Jumps forward or backward by the configured step. `direction` is +1
    /// or -1. Stops playback even when the clamped target is the current
    /// frame.
    pub fn step(&mut self, direction: i64) {
        let Some(playback) = &mut self.playback else {
            return;
        };
        playback.stop();
        let target = playback.step_target(direction);
        if target != playback.current_frame_index() {
            self.seek(i64::from(target));
        }
    }

    /// Updates the slider preview while a drag is in progress. Stops
    /// playback, so ticks cannot replace the image under the drag; only the
    /// label changes, no frame is read.
    pub fn slider_drag(&mut self, value: u32) {
        if let Some(playback) = &mut self.playback {
            playback.stop();
            playback.set_drag_position(value);
        }
    }

    /// Commits a finished slider drag as a seek.
    pub fn slider_release(&mut self) {
        let target = self
            .playback
            .as_mut()
            .and_then(PlaybackController::take_drag_position);
        if let Some(target) = target {
            self.seek(i64::from(target));
        }
    }

    /// Lifts the landmark nearest to a viewport position. Returns whether a
    /// point was picked up, so the caller can fall back to panning.
    pub fn lift_at(&mut self, device: Point) -> bool {
        let Some(cursor) = self.view.to_image_coords(device) else {
            return false;
        };
        let Some(frame) = &self.current_frame else {
            return false;
        };
        let height = frame.height;
        let Some(set) = &mut self.landmarks else {
            return false;
        };
        self.edit.lift_nearest(set, cursor, height).is_some()
    }

    /// Places the lifted landmark at a viewport position.
    pub fn place_at(&mut self, device: Point) {
        let Some(target) = self.view.to_image_coords(device) else {
            return;
        };
        if let Some(set) = &mut self.landmarks {
            self.edit.place(set, target);
        }
    }

    /// Restores the lifted landmark to its original position.
    pub fn undo_edit(&mut self) {
        if let Some(set) = &mut self.landmarks {
            self.edit.undo(set);
        }
    }

    pub fn point_is_lifted(&self) -> bool {
        self.edit.is_lifted()
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    pub fn toggle_overlay(&mut self) {
        self.overlay_visible = !self.overlay_visible;
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.view.set_viewport(width, height);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.view.zoom(delta);
    }

    pub fn fit_to_view(&mut self) {
        self.view.fit_to_view();
    }

    pub fn zoom_level(&self) -> i32 {
        self.view.zoom_level()
    }

    /// Starts a grab-and-drag pan from a viewport position.
    pub fn begin_pan(&mut self, device: Point) {
        if self.current_frame.is_some() {
            self.drag.begin(device, self.view.pan());
        }
    }

    /// Moves an active pan drag to the current cursor position.
    pub fn pan_to(&mut self, device: Point) {
        if let Some((x, y)) = self.drag.target_pan(device) {
            self.view.set_pan(x, y);
        }
    }

    pub fn end_pan(&mut self) {
        self.drag.finish();
    }

    pub fn is_panning(&self) -> bool {
        self.drag.is_active()
    }

    /// Scroll offset of the frame view, in device pixels.
    pub fn pan(&self) -> (f32, f32) {
        self.view.pan()
    }

    pub fn max_pan(&self) -> (f32, f32) {
        self.view.max_pan()
    }

    /// Records a scroll offset reported by the frame view widget, keeping
    /// the coordinate mapping in sync with what is on screen.
    pub fn sync_pan(&mut self, x: f32, y: f32) {
        self.view.set_pan(x, y);
    }

    pub fn viewport_size(&self) -> (f32, f32) {
        self.view.viewport()
    }

    /// The frame to display, with the landmark overlay composited when
    /// enabled.
    pub fn composed_frame(&self) -> Option<Frame> {
        let frame = self.current_frame.as_ref()?;
        Some(overlay::render(
            frame,
            self.landmarks.as_ref(),
            self.overlay_visible,
        ))
    }

    /// On-screen size of the displayed frame at the current zoom.
    pub fn display_size(&self) -> Option<(f32, f32)> {
        let frame = self.current_frame.as_ref()?;
        let scale = self.view.scale();
        Some((frame.width as f32 * scale, frame.height as f32 * scale))
    }

    pub fn current_frame_index(&self) -> Option<u32> {
        self.current_frame.as_ref().map(|f| f.index)
    }

    pub fn total_frame_count(&self) -> u32 {
        self.playback
            .as_ref()
            .map_or(0, PlaybackController::total_frame_count)
    }

    /// Slider position, tracking the drag preview while one is active.
    pub fn slider_position(&self) -> u32 {
        self.playback
            .as_ref()
            .map_or(0, PlaybackController::display_position)
    }

    pub fn frame_label(&self) -> String {
        self.playback
            .as_ref()
            .map_or_else(|| "No video loaded".to_owned(), PlaybackController::frame_label)
    }

    /// Takes the pending status line, if an operation recorded one.
    pub fn take_diagnostic(&mut self) -> Option<String> {
        self.diagnostic.take()
    }

    pub fn landmarks(&self) -> Option<&LandmarkSet> {
        self.landmarks.as_ref()
    }

    fn set_current_frame(&mut self, frame: Frame) {
        self.view.set_image(frame.width, frame.height);
        self.current_frame = Some(frame);
        self.refresh_landmarks();
    }

    /// Reloads the landmark set for the displayed frame, dropping any
    /// in-flight edit.
    fn refresh_landmarks(&mut self) {
        self.edit.reset();
        self.landmarks = match (&self.table, &self.current_frame) {
            (Some(table), Some(frame)) => table.get(frame.index).cloned(),
            _ => None,
        };
    }
}
