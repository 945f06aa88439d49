// SPDX-License-Identifier: MPL-2.0
//! End-to-end review workflow tests against a synthetic video source.

use facemark::config::Config;
use facemark::landmarks::table::NUM_LANDMARKS;
use facemark::landmarks::Point;
use facemark::media::{Frame, VideoSource};
use facemark::session::ReviewSession;
use std::path::PathBuf;

const WIDTH: u32 = 320;
const HEIGHT: u32 = 240;

/// Synthetic video where every pixel of frame N has value N.
struct SyntheticVideo {
    length: u32,
    cursor: u32,
}

impl SyntheticVideo {
    fn new(length: u32) -> Self {
        Self { length, cursor: 0 }
    }

    fn frame(index: u32) -> Frame {
        let value = (index % 256) as u8;
        Frame::from_rgba(vec![value; (WIDTH * HEIGHT * 4) as usize], WIDTH, HEIGHT, index)
    }
}

impl VideoSource for SyntheticVideo {
    fn length(&self) -> u32 {
        self.length
    }

    fn fps(&self) -> u32 {
        30
    }

    fn frame_size(&self) -> (u32, u32) {
        (WIDTH, HEIGHT)
    }

    fn read_sequential(&mut self) -> Option<Frame> {
        if self.cursor >= self.length {
            return None;
        }
        let frame = Self::frame(self.cursor);
        self.cursor += 1;
        Some(frame)
    }

    fn seek_and_read(&mut self, index: i64) -> Option<Frame> {
        if index < 0 || index >= i64::from(self.length) {
            return None;
        }
        self.cursor = index as u32 + 1;
        Some(Self::frame(index as u32))
    }
}

/// Builds a table row annotating `frame` with all landmarks in a cluster
/// around (100, 100), except the first landmark which sits at `first`.
fn table_row(frame: u32, first: (f32, f32)) -> String {
    let mut fields = vec![frame.to_string()];
    fields.extend(["50", "50", "150", "150"].map(String::from));
    fields.push(format!("{}", first.0));
    fields.push(format!("{}", first.1));
    for n in 1..NUM_LANDMARKS {
        fields.push(format!("{}", 100 + n));
        fields.push("100".to_string());
    }
    fields.join(",")
}

fn write_table(rows: &[String]) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("landmarks.csv");
    std::fs::write(&path, rows.join("\n")).expect("write table");
    (dir, path)
}

fn session_with_table(rows: &[String]) -> (ReviewSession, tempfile::TempDir) {
    let mut session = ReviewSession::new(&Config::default());
    session.install_source(Box::new(SyntheticVideo::new(100)));
    // Viewport matching the frame size: device coordinates equal image
    // coordinates.
    session.set_viewport(WIDTH as f32, HEIGHT as f32);

    let (dir, path) = write_table(rows);
    session.load_landmarks_table(&path).expect("load table");
    (session, dir)
}

#[test]
fn annotated_frames_show_the_overlay_and_others_do_not() {
    let rows = vec![table_row(10, (100.0, 100.0))];
    let (mut session, _dir) = session_with_table(&rows);

    // Frame 0 has no annotations: composed output is the raw frame.
    let frame = session.composed_frame().expect("frame displayed");
    assert!(frame.rgba_data.iter().all(|&b| b == 0));

    session.seek(10);
    assert!(session.landmarks().is_some());
    let frame = session.composed_frame().expect("frame displayed");
    assert!(frame.rgba_data.iter().any(|&b| b != 10));

    session.seek(11);
    assert!(session.landmarks().is_none());
    let frame = session.composed_frame().expect("frame displayed");
    assert!(frame.rgba_data.iter().all(|&b| b == 11));
}

#[test]
fn playback_runs_to_the_end_and_stops() {
    let mut session = ReviewSession::new(&Config::default());
    session.install_source(Box::new(SyntheticVideo::new(100)));
    session.play();
    let epoch = session.tick_epoch();

    for _ in 0..200 {
        session.advance_tick(epoch);
    }

    assert_eq!(session.current_frame_index(), Some(99));
    assert!(!session.is_playing());
    assert_eq!(session.frame_label(), "Frame : 100/100");
}

#[test]
fn seek_during_playback_stops_and_invalidates_older_ticks() {
    let mut session = ReviewSession::new(&Config::default());
    session.install_source(Box::new(SyntheticVideo::new(100)));
    session.play();
    let epoch = session.tick_epoch();
    session.advance_tick(epoch);
    assert_eq!(session.current_frame_index(), Some(1));

    session.seek(50);
    assert!(!session.is_playing());
    session.advance_tick(epoch);
    assert_eq!(session.current_frame_index(), Some(50));
}

#[test]
fn failed_seek_keeps_position_and_reports() {
    let rows = vec![table_row(5, (100.0, 100.0))];
    let (mut session, _dir) = session_with_table(&rows);

    session.seek(5);
    assert!(session.landmarks().is_some());

    session.seek(1000);
    assert_eq!(session.current_frame_index(), Some(5));
    assert!(session.landmarks().is_some());
    assert!(session.take_diagnostic().is_some());
}

#[test]
fn lift_place_and_undo_through_viewport_coordinates() {
    let rows = vec![table_row(0, (200.0, 120.0))];
    let (mut session, _dir) = session_with_table(&rows);

    session.lift_at(Point::new(200.0, 120.0));
    assert!(session.point_is_lifted());
    assert_eq!(session.landmarks().unwrap().get(0), None);

    session.place_at(Point::new(210.0, 130.0));
    assert!(!session.point_is_lifted());
    assert_eq!(
        session.landmarks().unwrap().get(0),
        Some(Point::new(210.0, 130.0))
    );

    // Pick it up again and undo: back to where it was placed.
    session.lift_at(Point::new(210.0, 130.0));
    session.undo_edit();
    assert_eq!(
        session.landmarks().unwrap().get(0),
        Some(Point::new(210.0, 130.0))
    );
}

#[test]
fn panning_reaches_landmarks_outside_the_zoomed_view() {
    let rows = vec![table_row(0, (10.0, 10.0))];
    let (mut session, _dir) = session_with_table(&rows);

    // One zoom step: scale 1.2, the 384x288 image is panned to keep the
    // center fixed, pushing the top-left corner off screen.
    session.zoom(1.0);
    let (pan_x, pan_y) = session.pan();
    assert!(pan_x > 0.0 && pan_y > 0.0);

    // Drag the frame down-right until the offset is back at the corner.
    session.begin_pan(Point::new(50.0, 50.0));
    session.pan_to(Point::new(50.0 + pan_x, 50.0 + pan_y));
    session.end_pan();
    assert!(session.pan().0.abs() < 1e-3);
    assert!(session.pan().1.abs() < 1e-3);

    // The corner landmark is now under the viewport at 1.2x its image
    // position.
    assert!(session.lift_at(Point::new(12.0, 12.0)));
    assert!(session.point_is_lifted());
    assert_eq!(session.landmarks().unwrap().get(0), None);
}

#[test]
fn changing_frame_cancels_an_in_flight_edit() {
    let rows = vec![
        table_row(0, (200.0, 120.0)),
        table_row(1, (200.0, 120.0)),
    ];
    let (mut session, _dir) = session_with_table(&rows);

    session.lift_at(Point::new(200.0, 120.0));
    assert!(session.point_is_lifted());

    session.seek(1);
    assert!(!session.point_is_lifted());
    // The new frame's set comes fresh from the table.
    assert_eq!(
        session.landmarks().unwrap().get(0),
        Some(Point::new(200.0, 120.0))
    );
}

#[test]
fn edits_are_discarded_when_leaving_and_revisiting_a_frame() {
    let rows = vec![table_row(0, (200.0, 120.0))];
    let (mut session, _dir) = session_with_table(&rows);

    session.lift_at(Point::new(200.0, 120.0));
    session.place_at(Point::new(10.0, 10.0));

    session.seek(1);
    session.seek(0);
    // Landmarks reload from the table on every frame change.
    assert_eq!(
        session.landmarks().unwrap().get(0),
        Some(Point::new(200.0, 120.0))
    );
}

#[test]
fn malformed_table_clears_any_loaded_annotations() {
    let rows = vec![table_row(0, (200.0, 120.0))];
    let (mut session, _dir) = session_with_table(&rows);
    assert!(session.landmarks().is_some());

    let (_dir2, bad_path) = write_table(&["0,1,2,garbage".to_string()]);
    assert!(session.load_landmarks_table(&bad_path).is_err());
    assert!(session.landmarks().is_none());
}

#[test]
fn slider_drag_only_moves_the_label_until_release() {
    let mut session = ReviewSession::new(&Config::default());
    session.install_source(Box::new(SyntheticVideo::new(100)));

    session.slider_drag(60);
    assert_eq!(session.current_frame_index(), Some(0));
    assert_eq!(session.slider_position(), 60);
    assert_eq!(session.frame_label(), "Frame : 61/100");

    session.slider_release();
    assert_eq!(session.current_frame_index(), Some(60));
    assert_eq!(session.frame_label(), "Frame : 61/100");
}
