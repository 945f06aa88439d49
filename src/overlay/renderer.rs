// SPDX-License-Identifier: MPL-2.0
//! Draws landmark markers and iris circles onto a frame.
//!
//! Rendering is pure: the input frame is never mutated. When the overlay is
//! disabled or there is nothing to draw, the input is returned as-is, pixel
//! buffer shared.

use crate::landmarks::LandmarkSet;
use crate::media::Frame;
use tiny_skia::{
    Color, FillRule, IntSize, Paint, PathBuilder, Pixmap, Stroke, Transform,
};

/// Landmark marker radius in pixels, scaled with frame resolution.
pub fn marker_radius(image_height: u32) -> f32 {
    if image_height < 1000 {
        2.0
    } else {
        4.0
    }
}

/// Iris circle stroke width, scaled with frame resolution.
pub fn iris_stroke_width(image_height: u32) -> f32 {
    if image_height < 1000 {
        1.0
    } else {
        3.0
    }
}

fn marker_color() -> Color {
    Color::from_rgba8(255, 0, 0, 255)
}

fn iris_color() -> Color {
    Color::from_rgba8(0, 255, 0, 255)
}

/// Composites the landmark overlay onto `frame`.
///
/// Lifted or undetected points have no marker. Returns the unmodified frame
/// when `draw_overlay` is false, no set is given, or the frame buffer cannot
/// back a pixmap.
pub fn render(frame: &Frame, landmarks: Option<&LandmarkSet>, draw_overlay: bool) -> Frame {
    let set = match landmarks {
        Some(set) if draw_overlay => set,
        _ => return frame.clone(),
    };

    let size = match IntSize::from_wh(frame.width, frame.height) {
        Some(size) => size,
        None => return frame.clone(),
    };
    let mut pixmap = match Pixmap::from_vec(frame.rgba_data.as_ref().clone(), size) {
        Some(pixmap) => pixmap,
        None => return frame.clone(),
    };

    draw_markers(&mut pixmap, set, frame.height);
    draw_irises(&mut pixmap, set, frame.height);

    Frame::from_rgba(pixmap.take(), frame.width, frame.height, frame.index)
}

fn draw_markers(pixmap: &mut Pixmap, set: &LandmarkSet, image_height: u32) {
    let radius = marker_radius(image_height);
    let mut paint = Paint::default();
    paint.set_color(marker_color());
    paint.anti_alias = true;

    for (_, point) in set.present() {
        let mut builder = PathBuilder::new();
        builder.push_circle(point.x, point.y, radius);
        if let Some(path) = builder.finish() {
            pixmap.fill_path(
                &path,
                &paint,
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }
}

fn draw_irises(pixmap: &mut Pixmap, set: &LandmarkSet, image_height: u32) {
    let mut paint = Paint::default();
    paint.set_color(iris_color());
    paint.anti_alias = true;

    let stroke = Stroke {
        width: iris_stroke_width(image_height),
        ..Stroke::default()
    };

    for iris in [set.left_iris, set.right_iris].into_iter().flatten() {
        let mut builder = PathBuilder::new();
        builder.push_circle(iris.center.x, iris.center.y, iris.radius);
        if let Some(path) = builder.finish() {
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }
}
