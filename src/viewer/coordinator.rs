// SPDX-License-Identifier: MPL-2.0
use crate::landmarks::Point;

const ZOOM_STEP: f32 = 1.2;

/// Maps between viewport (device) coordinates and image pixel coordinates.
///
/// The image is letterboxed to fit the viewport at zoom level 0 and scaled by
/// 1.2 per wheel step above it. Zooming out below the fit level snaps back to
/// fit instead of shrinking further. While the image fits it stays centered;
/// once it outgrows the viewport a pan offset picks which part is visible,
/// clamped so the viewport never leaves the image.
#[derive(Debug, Clone)]
pub struct ViewCoordinator {
    viewport_width: f32,
    viewport_height: f32,
    image_width: u32,
    image_height: u32,
    zoom_level: i32,
    zoom_factor: f32,
    pan_x: f32,
    pan_y: f32,
}

impl Default for ViewCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewCoordinator {
    pub fn new() -> Self {
        Self {
            viewport_width: 0.0,
            viewport_height: 0.0,
            image_width: 0,
            image_height: 0,
            zoom_level: 0,
            zoom_factor: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }

    pub fn zoom_level(&self) -> i32 {
        self.zoom_level
    }

    pub fn viewport(&self) -> (f32, f32) {
        (self.viewport_width, self.viewport_height)
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport_width = width.max(0.0);
        self.viewport_height = height.max(0.0);
        self.set_pan(self.pan_x, self.pan_y);
    }

    /// Registers the image being displayed. A size change resets to fit.
    pub fn set_image(&mut self, width: u32, height: u32) {
        if width != self.image_width || height != self.image_height {
            self.image_width = width;
            self.image_height = height;
            self.fit_to_view();
        }
    }

    /// Resets to the letterboxed fit level.
    pub fn fit_to_view(&mut self) {
        self.zoom_level = 0;
        self.zoom_factor = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }

    /// Applies one wheel step. Positive deltas zoom in, negative out.
    ///
    /// The image point under the viewport center stays put across the step,
    /// so zooming does not drift away from the region being inspected.
    pub fn zoom(&mut self, delta: f32) {
        let focus = self.viewport_center_in_image();
        if delta > 0.0 {
            self.zoom_level += 1;
            self.zoom_factor *= ZOOM_STEP;
        } else if delta < 0.0 {
            if self.zoom_level > 1 {
                self.zoom_level -= 1;
                self.zoom_factor /= ZOOM_STEP;
            } else {
                self.fit_to_view();
                return;
            }
        } else {
            return;
        }

        if let Some(focus) = focus {
            self.center_on(focus);
        }
    }

    /// Current scroll offset of the view, in device pixels.
    pub fn pan(&self) -> (f32, f32) {
        (self.pan_x, self.pan_y)
    }

    /// Largest valid pan offset per axis at the current scale.
    pub fn max_pan(&self) -> (f32, f32) {
        let scale = self.scale();
        (
            (self.image_width as f32 * scale - self.viewport_width).max(0.0),
            (self.image_height as f32 * scale - self.viewport_height).max(0.0),
        )
    }

    /// Sets the scroll offset, clamped to the scrollable range.
    pub fn set_pan(&mut self, x: f32, y: f32) {
        let (max_x, max_y) = self.max_pan();
        self.pan_x = x.clamp(0.0, max_x);
        self.pan_y = y.clamp(0.0, max_y);
    }

    /// Device position of the image's top-left corner: centering padding
    /// while the image fits, minus the scroll offset once it does not.
    fn image_origin(&self) -> (f32, f32) {
        let scale = self.scale();
        let shown_width = self.image_width as f32 * scale;
        let shown_height = self.image_height as f32 * scale;
        (
            ((self.viewport_width - shown_width) / 2.0).max(0.0) - self.pan_x,
            ((self.viewport_height - shown_height) / 2.0).max(0.0) - self.pan_y,
        )
    }

    /// Image coordinates currently under the viewport center.
    fn viewport_center_in_image(&self) -> Option<Point> {
        if self.image_width == 0 || self.viewport_width <= 0.0 {
            return None;
        }
        let scale = self.scale();
        if scale <= 0.0 {
            return None;
        }
        let (origin_x, origin_y) = self.image_origin();
        Some(Point::new(
            (self.viewport_width / 2.0 - origin_x) / scale,
            (self.viewport_height / 2.0 - origin_y) / scale,
        ))
    }

    /// Pans so `focus` sits at the viewport center, as far as clamping allows.
    fn center_on(&mut self, focus: Point) {
        let scale = self.scale();
        let shown_width = self.image_width as f32 * scale;
        let shown_height = self.image_height as f32 * scale;
        let pad_x = ((self.viewport_width - shown_width) / 2.0).max(0.0);
        let pad_y = ((self.viewport_height - shown_height) / 2.0).max(0.0);
        self.set_pan(
            pad_x + focus.x * scale - self.viewport_width / 2.0,
            pad_y + focus.y * scale - self.viewport_height / 2.0,
        );
    }

    /// Scale from fitting the image into the viewport, before zoom.
    fn fit_scale(&self) -> f32 {
        if self.image_width == 0 || self.image_height == 0 {
            return 1.0;
        }
        let sx = self.viewport_width / self.image_width as f32;
        let sy = self.viewport_height / self.image_height as f32;
        sx.min(sy)
    }

    /// Overall image-to-device scale.
    pub fn scale(&self) -> f32 {
        self.fit_scale() * self.zoom_factor
    }

    /// Converts a viewport position to image pixel coordinates, accounting
    /// for the zoom scale and the pan offset.
    ///
    /// Returns `None` when the position falls on the letterbox outside the
    /// image, or before any image or viewport has been registered.
    pub fn to_image_coords(&self, device: Point) -> Option<Point> {
        if self.image_width == 0 || self.viewport_width <= 0.0 {
            return None;
        }

        let scale = self.scale();
        if scale <= 0.0 {
            return None;
        }

        let (origin_x, origin_y) = self.image_origin();
        let x = (device.x - origin_x) / scale;
        let y = (device.y - origin_y) / scale;

        if x < 0.0 || y < 0.0 || x >= self.image_width as f32 || y >= self.image_height as f32 {
            return None;
        }

        Some(Point::new(x, y))
    }
}
