// SPDX-License-Identifier: MPL-2.0
//! Message handling for the application.

use super::{App, Message, CONTROLS_HEIGHT, FRAME_SCROLL_ID};
use crate::landmarks::Point;
use iced::widget::scrollable::RelativeOffset;
use iced::widget::{operation, Id};
use iced::Task;
use std::path::PathBuf;

pub fn update(app: &mut App, message: Message) -> Task<Message> {
    let task = match message {
        Message::Tick(epoch) => {
            app.session.advance_tick(epoch);
            Task::none()
        }
        Message::SliderMoved(value) => {
            app.session.slider_drag(value);
            Task::none()
        }
        Message::SliderReleased => {
            app.session.slider_release();
            Task::none()
        }
        Message::Play => {
            app.session.play();
            Task::none()
        }
        Message::Stop => {
            app.session.stop();
            Task::none()
        }
        Message::StepForward => {
            app.session.step(1);
            Task::none()
        }
        Message::StepBack => {
            app.session.step(-1);
            Task::none()
        }
        Message::ToggleOverlay => {
            app.session.toggle_overlay();
            Task::none()
        }
        Message::FitToView => {
            app.session.fit_to_view();
            sync_frame_scroll(app)
        }
        Message::CursorMoved(position) => {
            app.cursor = Some(position);
            if app.session.is_panning() {
                app.session.pan_to(Point::new(position.x, position.y));
                sync_frame_scroll(app)
            } else {
                Task::none()
            }
        }
        Message::CursorLeft => {
            app.cursor = None;
            app.session.end_pan();
            Task::none()
        }
        Message::FramePressed => {
            if let Some(cursor) = app.cursor {
                let position = Point::new(cursor.x, cursor.y);
                if app.session.point_is_lifted() {
                    app.session.place_at(position);
                } else if !app.session.lift_at(position) {
                    // Nothing within reach: grab the frame instead.
                    app.session.begin_pan(position);
                }
            }
            Task::none()
        }
        Message::FrameReleased => {
            app.session.end_pan();
            Task::none()
        }
        Message::FrameScrolled(offset) => {
            app.session.sync_pan(offset.x, offset.y);
            Task::none()
        }
        Message::Undo => {
            app.session.undo_edit();
            Task::none()
        }
        Message::WheelZoomed(delta) => {
            // The wheel zooms only while the cursor is over the frame view.
            if app.cursor.is_some() {
                app.session.zoom(delta);
                sync_frame_scroll(app)
            } else {
                Task::none()
            }
        }
        Message::ViewportResized(size) => {
            app.session
                .set_viewport(size.width, (size.height - CONTROLS_HEIGHT).max(0.0));
            Task::none()
        }
        Message::OpenVideoDialog => Task::perform(
            pick_file("Video", &["mp4", "avi", "mov", "mkv", "webm"]),
            Message::VideoFileChosen,
        ),
        Message::VideoFileChosen(Some(path)) => {
            match app.session.load_video(&path) {
                Ok(()) => app.status = None,
                Err(e) => {
                    eprintln!("Failed to open {}: {e}", path.display());
                    app.status = Some(format!("Failed to open video: {e}"));
                }
            }
            Task::none()
        }
        Message::OpenTableDialog => Task::perform(
            pick_file("Landmark table", &["csv", "txt"]),
            Message::TableFileChosen,
        ),
        Message::TableFileChosen(Some(path)) => {
            match app.session.load_landmarks_table(&path) {
                Ok(()) => app.status = None,
                Err(e) => {
                    eprintln!("Failed to load landmark table {}: {e}", path.display());
                    app.status = Some(format!("Failed to load landmark table: {e}"));
                }
            }
            Task::none()
        }
        Message::VideoFileChosen(None) | Message::TableFileChosen(None) => Task::none(),
    };

    if let Some(diagnostic) = app.session.take_diagnostic() {
        app.status = Some(diagnostic);
    }

    task
}

/// Mirrors the session's pan offset to the frame scrollable, so the widget
/// shows the same region the coordinate mapping assumes.
fn sync_frame_scroll(app: &App) -> Task<Message> {
    let (pan_x, pan_y) = app.session.pan();
    let (max_x, max_y) = app.session.max_pan();
    operation::snap_to(
        Id::new(FRAME_SCROLL_ID),
        RelativeOffset {
            x: if max_x > 0.0 { pan_x / max_x } else { 0.0 },
            y: if max_y > 0.0 { pan_y / max_y } else { 0.0 },
        },
    )
}

async fn pick_file(label: &str, extensions: &[&str]) -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .add_filter(label, extensions)
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}
