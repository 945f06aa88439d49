// SPDX-License-Identifier: MPL-2.0
//! Application root state and the Iced run loop.
//!
//! `App` owns the review session and translates UI messages into session
//! operations. Frame decoding happens inline in the update loop; the session
//! owns the decoder exclusively, so reads never race.

mod message;
mod subscription;
mod update;
mod view;
mod wheel_inert;

pub use message::{Flags, Message};

use crate::config::{self, Config};
use crate::session::ReviewSession;
use iced::{window, Element, Subscription, Task, Theme};

pub const WINDOW_DEFAULT_WIDTH: u32 = 960;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
pub const MIN_WINDOW_WIDTH: u32 = 640;
pub const MIN_WINDOW_HEIGHT: u32 = 480;

/// Vertical space taken by the slider, transport buttons and status line.
/// The frame viewport is the window minus this strip.
pub(crate) const CONTROLS_HEIGHT: f32 = 120.0;

/// Id of the frame scrollable, used to mirror pan offsets into the widget.
pub(crate) const FRAME_SCROLL_ID: &str = "frame-view-scroll";

pub struct App {
    session: ReviewSession,
    /// Last cursor position over the frame view, in viewport coordinates.
    cursor: Option<iced::Point>,
    status: Option<String>,
}

fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy the Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self {
            session: ReviewSession::new(&Config::default()),
            cursor: None,
            status: None,
        }
    }
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = config::load().unwrap_or_default();

        let mut app = App {
            session: ReviewSession::new(&config),
            cursor: None,
            status: None,
        };
        app.session.set_viewport(
            WINDOW_DEFAULT_WIDTH as f32,
            WINDOW_DEFAULT_HEIGHT as f32 - CONTROLS_HEIGHT,
        );

        if let Some(path) = flags.video_path {
            if let Err(e) = app.session.load_video(&path) {
                eprintln!("Failed to open {path}: {e}");
                app.status = Some(format!("Failed to open video: {e}"));
            }
        }
        if let Some(path) = flags.landmarks_path {
            if let Err(e) = app.session.load_landmarks_table(&path) {
                eprintln!("Failed to load landmark table {path}: {e}");
                app.status = Some(format!("Failed to load landmark table: {e}"));
            }
        }

        (app, Task::none())
    }

    fn title(&self) -> String {
        String::from("Facemark")
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::subscription(self)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        update::update(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }
}
