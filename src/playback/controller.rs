// SPDX-License-Identifier: MPL-2.0
use std::time::Duration;

/// Playback position, transport state and tick bookkeeping for one video.
///
/// The controller owns no timer. The UI schedules ticks at
/// [`tick_interval`](Self::tick_interval) while [`is_playing`](Self::is_playing)
/// and tags each tick with the epoch current at scheduling time. Play, stop
/// and seek bump the epoch, so ticks scheduled before the transition are
/// recognized as stale and discarded instead of advancing the position.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    current_frame_index: u32,
    total_frame_count: u32,
    fps: u32,
    is_playing: bool,
    step_size: i64,
    tick_epoch: u64,
    /// Slider position while a drag is in progress, not yet committed.
    drag_position: Option<u32>,
}

impl PlaybackController {
    pub fn new(total_frame_count: u32, fps: u32, step_size: i64) -> Self {
        Self {
            current_frame_index: 0,
            total_frame_count,
            fps,
            is_playing: false,
            step_size,
            tick_epoch: 0,
            drag_position: None,
        }
    }

    pub fn current_frame_index(&self) -> u32 {
        self.current_frame_index
    }

    pub fn total_frame_count(&self) -> u32 {
        self.total_frame_count
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn tick_epoch(&self) -> u64 {
        self.tick_epoch
    }

    /// Delay between playback ticks at the video's nominal rate.
    pub fn tick_interval(&self) -> Duration {
        let fps = self.fps.max(1);
        Duration::from_millis(1000 / u64::from(fps))
    }

    /// Starts playback. No-op when already playing.
    pub fn play(&mut self) {
        if self.is_playing {
            return;
        }
        self.is_playing = true;
        self.tick_epoch += 1;
    }

    /// Stops playback. No-op when already stopped.
    pub fn stop(&mut self) {
        if !self.is_playing {
            return;
        }
        self.is_playing = false;
        self.tick_epoch += 1;
    }

    /// Whether a tick tagged with `epoch` is still current.
    pub fn tick_is_current(&self, epoch: u64) -> bool {
        self.is_playing && epoch == self.tick_epoch
    }

    /// The frame a current tick should advance to, or `None` at the end of
    /// the video.
    pub fn next_frame_index(&self) -> Option<u32> {
        let next = self.current_frame_index.checked_add(1)?;
        if next < self.total_frame_count {
            Some(next)
        } else {
            None
        }
    }

    /// Records the displayed position after a successful frame read.
    pub fn set_position(&mut self, frame_index: u32) {
        self.current_frame_index = frame_index;
    }

    /// Validates a seek target, returning it only when in range.
    ///
    /// Any seek invalidates in-flight ticks even when playback continues.
    pub fn validate_seek(&mut self, target: i64) -> Option<u32> {
        self.tick_epoch += 1;
        if target < 0 || target >= i64::from(self.total_frame_count) {
            return None;
        }
        Some(target as u32)
    }

    /// Target frame for a fast-forward or rewind jump, clamped to the video
    /// bounds. `direction` is +1 or -1.
    pub fn step_target(&self, direction: i64) -> u32 {
        let target = i64::from(self.current_frame_index) + direction * self.step_size;
        let last = i64::from(self.total_frame_count.saturating_sub(1));
        target.clamp(0, last.max(0)) as u32
    }

    /// Begins or updates a slider drag without committing a seek.
    pub fn set_drag_position(&mut self, frame_index: u32) {
        self.drag_position = Some(frame_index.min(self.total_frame_count.saturating_sub(1)));
    }

    /// Ends a slider drag, returning the position to commit.
    pub fn take_drag_position(&mut self) -> Option<u32> {
        self.drag_position.take()
    }

    /// The position the UI should display: the drag preview while dragging,
    /// otherwise the committed frame.
    pub fn display_position(&self) -> u32 {
        self.drag_position.unwrap_or(self.current_frame_index)
    }

    /// Human-readable position indicator, 1-based as shown to reviewers.
    pub fn frame_label(&self) -> String {
        format!(
            "Frame : {}/{}",
            self.display_position() + 1,
            self.total_frame_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_interval_follows_fps() {
        let controller = PlaybackController::new(100, 25, 30);
        assert_eq!(controller.tick_interval(), Duration::from_millis(40));
    }

    #[test]
    fn zero_fps_does_not_panic() {
        let controller = PlaybackController::new(100, 0, 30);
        assert_eq!(controller.tick_interval(), Duration::from_millis(1000));
    }

    #[test]
    fn play_and_stop_bump_the_epoch() {
        let mut controller = PlaybackController::new(100, 30, 30);
        let epoch = controller.tick_epoch();

        controller.play();
        assert!(controller.is_playing());
        assert_eq!(controller.tick_epoch(), epoch + 1);

        controller.stop();
        assert!(!controller.is_playing());
        assert_eq!(controller.tick_epoch(), epoch + 2);
    }

    #[test]
    fn redundant_transport_calls_are_no_ops() {
        let mut controller = PlaybackController::new(100, 30, 30);
        controller.stop();
        assert_eq!(controller.tick_epoch(), 0);

        controller.play();
        controller.play();
        assert_eq!(controller.tick_epoch(), 1);
    }

    #[test]
    fn stale_ticks_are_rejected() {
        let mut controller = PlaybackController::new(100, 30, 30);
        controller.play();
        let epoch = controller.tick_epoch();
        assert!(controller.tick_is_current(epoch));

        controller.stop();
        assert!(!controller.tick_is_current(epoch));

        // A tick from before a seek is stale even though playback resumed.
        controller.play();
        let epoch = controller.tick_epoch();
        controller.validate_seek(10);
        assert!(!controller.tick_is_current(epoch));
    }

    #[test]
    fn playback_stops_advancing_at_the_last_frame() {
        let mut controller = PlaybackController::new(3, 30, 30);
        assert_eq!(controller.next_frame_index(), Some(1));

        controller.set_position(2);
        assert_eq!(controller.next_frame_index(), None);
    }

    #[test]
    fn out_of_range_seeks_are_rejected() {
        let mut controller = PlaybackController::new(100, 30, 30);
        assert_eq!(controller.validate_seek(-1), None);
        assert_eq!(controller.validate_seek(100), None);
        assert_eq!(controller.validate_seek(99), Some(99));
        assert_eq!(controller.validate_seek(0), Some(0));
    }

    #[test]
    fn step_targets_clamp_to_bounds() {
        let mut controller = PlaybackController::new(100, 30, 30);
        assert_eq!(controller.step_target(-1), 0);
        assert_eq!(controller.step_target(1), 30);

        controller.set_position(90);
        assert_eq!(controller.step_target(1), 99);
        controller.set_position(10);
        assert_eq!(controller.step_target(-1), 0);
    }

    #[test]
    fn drag_previews_without_committing() {
        let mut controller = PlaybackController::new(100, 30, 30);
        controller.set_position(5);

        controller.set_drag_position(42);
        assert_eq!(controller.display_position(), 42);
        assert_eq!(controller.current_frame_index(), 5);
        assert_eq!(controller.frame_label(), "Frame : 43/100");

        assert_eq!(controller.take_drag_position(), Some(42));
        assert_eq!(controller.display_position(), 5);
        assert_eq!(controller.take_drag_position(), None);
    }

    #[test]
    fn frame_label_is_one_based() {
        let controller = PlaybackController::new(562, 30, 30);
        assert_eq!(controller.frame_label(), "Frame : 1/562");
    }
}
