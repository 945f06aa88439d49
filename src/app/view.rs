// SPDX-License-Identifier: MPL-2.0
//! Widget tree for the review window.

use super::wheel_inert::wheel_inert;
use super::{App, Message, FRAME_SCROLL_ID};
use iced::mouse;
use iced::widget::scrollable::{Direction, Scrollbar, Viewport};
use iced::widget::{
    button, column, container, image, mouse_area, row, slider, text, Id, Scrollable,
};
use iced::{Alignment, Element, Length, Padding};

pub fn view(app: &App) -> Element<'_, Message> {
    let frame_area = frame_area(app);
    let controls = controls(app);

    column![frame_area, controls]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn frame_area(app: &App) -> Element<'_, Message> {
    let Some(frame) = app.session.composed_frame() else {
        return container(text("Open a video to begin"))
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Alignment::Center)
            .align_y(Alignment::Center)
            .into();
    };

    let handle = image::Handle::from_rgba(
        frame.width,
        frame.height,
        frame.rgba_data.as_ref().clone(),
    );

    let (shown_width, shown_height) = app
        .session
        .display_size()
        .unwrap_or((frame.width as f32, frame.height as f32));

    let frame_image = image(handle)
        .width(Length::Fixed(shown_width))
        .height(Length::Fixed(shown_height));

    // Centering padding while the image fits the viewport; it collapses to
    // zero once the image outgrows it and the scroll offset takes over.
    let (viewport_width, viewport_height) = app.session.viewport_size();
    let horizontal = ((viewport_width - shown_width) / 2.0).max(0.0);
    let vertical = ((viewport_height - shown_height) / 2.0).max(0.0);
    let centered = container(frame_image).padding(Padding {
        top: vertical,
        right: horizontal,
        bottom: vertical,
        left: horizontal,
    });

    // Scrollbars stay hidden: panning happens by dragging the frame, and the
    // wheel is reserved for zooming.
    let scroll = Scrollable::new(centered)
        .id(Id::new(FRAME_SCROLL_ID))
        .width(Length::Fill)
        .height(Length::Fill)
        .direction(Direction::Both {
            vertical: Scrollbar::hidden(),
            horizontal: Scrollbar::hidden(),
        })
        .on_scroll(|viewport: Viewport| Message::FrameScrolled(viewport.absolute_offset()));

    let interaction = if app.session.is_panning() {
        mouse::Interaction::Grabbing
    } else {
        mouse::Interaction::default()
    };

    mouse_area(wheel_inert(scroll))
        .on_move(Message::CursorMoved)
        .on_exit(Message::CursorLeft)
        .on_press(Message::FramePressed)
        .on_release(Message::FrameReleased)
        .interaction(interaction)
        .into()
}

fn controls(app: &App) -> Element<'_, Message> {
    let has_video = app.session.has_video();

    let position_slider: Element<'_, Message> = if has_video {
        let last_frame = app.session.total_frame_count().saturating_sub(1);
        slider(0..=last_frame, app.session.slider_position(), Message::SliderMoved)
            .on_release(Message::SliderReleased)
            .into()
    } else {
        slider(0..=0u32, 0, Message::SliderMoved).into()
    };

    let transport = if app.session.is_playing() {
        button(text("Stop")).on_press(Message::Stop)
    } else {
        let play = button(text("Play"));
        if has_video {
            play.on_press(Message::Play)
        } else {
            play
        }
    };

    let overlay_label = if app.session.overlay_visible() {
        "Hide Landmarks"
    } else {
        "Show Landmarks"
    };

    let buttons = row![
        button(text("Open Video")).on_press(Message::OpenVideoDialog),
        button(text("Load Landmarks")).on_press(Message::OpenTableDialog),
        button(text("<<")).on_press_maybe(has_video.then_some(Message::StepBack)),
        transport,
        button(text(">>")).on_press_maybe(has_video.then_some(Message::StepForward)),
        button(text(overlay_label)).on_press(Message::ToggleOverlay),
        button(text("Fit")).on_press_maybe(has_video.then_some(Message::FitToView)),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let mut status_line = app.session.frame_label();
    let zoom_level = app.session.zoom_level();
    if zoom_level > 0 {
        status_line.push_str(&format!("    Zoom +{zoom_level}"));
    }
    if let Some(status) = &app.status {
        status_line.push_str(&format!("    {status}"));
    }

    column![position_slider, buttons, text(status_line).size(14)]
        .spacing(8)
        .padding(10)
        .width(Length::Fill)
        .into()
}
