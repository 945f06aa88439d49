// SPDX-License-Identifier: MPL-2.0
//! Parser for the comma-delimited landmark annotation table.
//!
//! One row per annotated frame:
//!
//! ```text
//! frame, bbox_x, bbox_y, bbox_w, bbox_h, x0, y0, ..., x67, y67 [, lx, ly, lr, rx, ry, rr]
//! ```
//!
//! The 68 landmark pairs follow the face bounding box; the six optional
//! trailing values are the left and right iris circles. A pair of `-1, -1`
//! marks a landmark the annotation pipeline could not detect.

use crate::error::{Error, Result};
use crate::landmarks::{IrisCircle, LandmarkSet, Point};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Landmark points per annotated frame.
pub const NUM_LANDMARKS: usize = 68;

const BASE_FIELDS: usize = 1 + 4 + NUM_LANDMARKS * 2;
const IRIS_FIELDS: usize = 6;

/// Parsed annotation table, keyed by frame index.
#[derive(Debug, Clone, Default)]
pub struct LandmarkTable {
    rows: BTreeMap<u32, LandmarkSet>,
}

impl LandmarkTable {
    /// Loads and parses an annotation table from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parses annotation rows from table text.
    ///
    /// An optional header line is skipped. Frames missing from the table
    /// simply have no entry; a malformed row fails the whole parse.
    pub fn parse(content: &str) -> Result<Self> {
        let mut rows = BTreeMap::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();

            // Header line: first field is not a frame number.
            if line_no == 0 && fields[0].parse::<u32>().is_err() {
                continue;
            }

            let (frame, set) = parse_row(&fields, line_no + 1)?;
            rows.insert(frame, set);
        }

        Ok(Self { rows })
    }

    /// The landmark set for a frame, if the table annotates it.
    pub fn get(&self, frame_index: u32) -> Option<&LandmarkSet> {
        self.rows.get(&frame_index)
    }

    /// Number of annotated frames.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn parse_row(fields: &[&str], line_no: usize) -> Result<(u32, LandmarkSet)> {
    if fields.len() != BASE_FIELDS && fields.len() != BASE_FIELDS + IRIS_FIELDS {
        return Err(Error::LandmarkTable(format!(
            "line {line_no}: expected {BASE_FIELDS} or {} fields, got {}",
            BASE_FIELDS + IRIS_FIELDS,
            fields.len()
        )));
    }

    let frame: u32 = fields[0].parse().map_err(|_| {
        Error::LandmarkTable(format!("line {line_no}: invalid frame index {:?}", fields[0]))
    })?;

    let value = |i: usize| -> Result<f32> {
        fields[i].parse().map_err(|_| {
            Error::LandmarkTable(format!(
                "line {line_no}: invalid value {:?} in column {}",
                fields[i],
                i + 1
            ))
        })
    };

    // Bounding box columns are validated but not retained; the overlay only
    // draws points and iris circles.
    for i in 1..5 {
        value(i)?;
    }

    let mut points = Vec::with_capacity(NUM_LANDMARKS);
    for n in 0..NUM_LANDMARKS {
        let x = value(5 + n * 2)?;
        let y = value(5 + n * 2 + 1)?;
        if x < 0.0 && y < 0.0 {
            points.push(None);
        } else {
            points.push(Some(Point::new(x, y)));
        }
    }

    let (left_iris, right_iris) = if fields.len() == BASE_FIELDS + IRIS_FIELDS {
        (
            parse_iris(&value, BASE_FIELDS)?,
            parse_iris(&value, BASE_FIELDS + 3)?,
        )
    } else {
        (None, None)
    };

    Ok((frame, LandmarkSet::with_irises(points, left_iris, right_iris)))
}

fn parse_iris(value: &impl Fn(usize) -> Result<f32>, offset: usize) -> Result<Option<IrisCircle>> {
    let x = value(offset)?;
    let y = value(offset + 1)?;
    let r = value(offset + 2)?;
    if x < 0.0 || y < 0.0 || r <= 0.0 {
        return Ok(None);
    }
    Ok(Some(IrisCircle {
        center: Point::new(x, y),
        radius: r,
    }))
}
