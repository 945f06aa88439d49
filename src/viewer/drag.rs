// SPDX-License-Identifier: MPL-2.0
//! Grab-and-drag state for panning the zoomed frame.

use crate::landmarks::Point;

/// Tracks an in-progress pan drag.
///
/// A drag records the cursor position and pan offset at the moment the
/// button went down; [`target_pan`](Self::target_pan) then turns any later
/// cursor position into the offset that keeps the grabbed image point under
/// the cursor.
#[derive(Debug, Clone, Default)]
pub struct DragState {
    active: bool,
    start_position: Option<Point>,
    start_pan: Option<(f32, f32)>,
}

impl DragState {
    /// Starts a drag at a viewport position with the pan offset in effect.
    pub fn begin(&mut self, position: Point, pan: (f32, f32)) {
        self.active = true;
        self.start_position = Some(position);
        self.start_pan = Some(pan);
    }

    /// Ends the drag, if one is active.
    pub fn finish(&mut self) {
        self.active = false;
        self.start_position = None;
        self.start_pan = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Pan offset implied by the cursor sitting at `position`.
    ///
    /// The content follows the cursor, so the offset moves against the
    /// cursor delta. `None` when no drag is active. The caller clamps the
    /// upper bound; only the negative side is cut off here.
    #[must_use]
    pub fn target_pan(&self, position: Point) -> Option<(f32, f32)> {
        if !self.active {
            return None;
        }
        let start = self.start_position?;
        let (pan_x, pan_y) = self.start_pan?;

        Some((
            (pan_x - (position.x - start.x)).max(0.0),
            (pan_y - (position.y - start.y)).max(0.0),
        ))
    }
}
