// SPDX-License-Identifier: MPL-2.0
use crate::landmarks::{LandmarkSet, Point};

/// Cursor-to-point hit distance in image pixels, inclusive.
///
/// Small frames get a tight radius; high-resolution frames a looser one, so
/// the grab target stays usable at typical display scales.
pub fn hit_threshold(image_height: u32) -> f64 {
    if image_height < 1000 {
        3.0
    } else {
        6.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    /// A point is lifted off the set and follows the cursor until placed.
    Lifted { index: usize, original: Point },
}

/// Lift/place/undo state machine for correcting a single landmark.
///
/// At most one point is in flight at a time. Every transition that does not
/// apply in the current phase is a silent no-op, so stray clicks and
/// keystrokes never corrupt the set.
#[derive(Debug, Clone, Copy)]
pub struct LandmarkEditState {
    phase: Phase,
}

impl Default for LandmarkEditState {
    fn default() -> Self {
        Self::new()
    }
}

impl LandmarkEditState {
    pub fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    /// Whether a point is currently lifted.
    pub fn is_lifted(&self) -> bool {
        matches!(self.phase, Phase::Lifted { .. })
    }

    /// The slot index of the lifted point, if any.
    pub fn lifted_index(&self) -> Option<usize> {
        match self.phase {
            Phase::Lifted { index, .. } => Some(index),
            Phase::Idle => None,
        }
    }

    /// Lifts the present point nearest to `cursor`, if one is within the hit
    /// threshold for `image_height`.
    ///
    /// No-op while a point is already lifted. Ties go to the lowest slot
    /// index. Returns the lifted slot index.
    pub fn lift_nearest(
        &mut self,
        set: &mut LandmarkSet,
        cursor: Point,
        image_height: u32,
    ) -> Option<usize> {
        if self.is_lifted() {
            return None;
        }

        let threshold = hit_threshold(image_height);
        let mut best: Option<(usize, f64)> = None;

        for (index, point) in set.present() {
            let distance = cursor.distance_to(point);
            if distance > threshold {
                continue;
            }
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((index, distance)),
            }
        }

        let (index, _) = best?;
        let original = set.lift(index)?;
        self.phase = Phase::Lifted { index, original };
        Some(index)
    }

    /// Places the lifted point at `target` and returns to idle.
    ///
    /// No-op when nothing is lifted. Returns the placed slot index.
    pub fn place(&mut self, set: &mut LandmarkSet, target: Point) -> Option<usize> {
        match self.phase {
            Phase::Lifted { index, .. } => {
                set.place(index, target);
                self.phase = Phase::Idle;
                Some(index)
            }
            Phase::Idle => None,
        }
    }

    /// Restores the lifted point to its original position and returns to
    /// idle. No-op when nothing is lifted.
    pub fn undo(&mut self, set: &mut LandmarkSet) -> bool {
        match self.phase {
            Phase::Lifted { index, original } => {
                set.place(index, original);
                self.phase = Phase::Idle;
                true
            }
            Phase::Idle => false,
        }
    }

    /// Drops any in-flight edit without touching a set.
    ///
    /// Used when the displayed frame changes and the set is replaced wholesale
    /// from the table.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }
}
