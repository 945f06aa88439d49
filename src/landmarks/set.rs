// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// A 2D position in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point, computed in f64.
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// An iris annotation: a circle in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrisCircle {
    pub center: Point,
    pub radius: f32,
}

/// The landmark annotations for one frame.
///
/// Every set parsed from the same table has the same number of slots. A slot
/// holds `None` while its point is lifted during editing, or when the table
/// marked the point as absent.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    points: Vec<Option<Point>>,
    pub left_iris: Option<IrisCircle>,
    pub right_iris: Option<IrisCircle>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Option<Point>>) -> Self {
        Self {
            points,
            left_iris: None,
            right_iris: None,
        }
    }

    pub fn with_irises(
        points: Vec<Option<Point>>,
        left_iris: Option<IrisCircle>,
        right_iris: Option<IrisCircle>,
    ) -> Self {
        Self {
            points,
            left_iris,
            right_iris,
        }
    }

    /// Number of landmark slots, lifted or not.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied().flatten()
    }

    /// Iterates over present points with their slot indices.
    pub fn present(&self) -> impl Iterator<Item = (usize, Point)> + '_ {
        self.points
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|p| (i, p)))
    }

    /// Removes the point at `index` from the set, returning it.
    ///
    /// Returns `None` if the slot is already empty or out of range.
    pub fn lift(&mut self, index: usize) -> Option<Point> {
        self.points.get_mut(index).and_then(Option::take)
    }

    /// Sets the point at `index`. Out-of-range indices are ignored.
    pub fn place(&mut self, index: usize, point: Point) {
        if let Some(slot) = self.points.get_mut(index) {
            *slot = Some(point);
        }
    }
}
