// SPDX-License-Identifier: MPL-2.0
//! Event and timer subscriptions for the application.

use super::{App, Message};
use iced::{event, keyboard, mouse, time, window, Subscription};

pub fn subscription(app: &App) -> Subscription<Message> {
    let events = event::listen_with(|event, status, _window| match event {
        // Delivered window-wide; update() drops it unless the cursor is
        // over the frame view.
        event::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
            let y = match delta {
                mouse::ScrollDelta::Lines { y, .. } => y,
                mouse::ScrollDelta::Pixels { y, .. } => y,
            };
            Some(Message::WheelZoomed(y))
        }
        event::Event::Window(window::Event::Resized(size)) => {
            Some(Message::ViewportResized(size))
        }
        event::Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. })
            if status == event::Status::Ignored =>
        {
            match key.as_ref() {
                keyboard::Key::Character("z") if modifiers.control() => Some(Message::Undo),
                _ => None,
            }
        }
        _ => None,
    });

    // Ticks are tagged with the epoch current at scheduling time, so ticks
    // delivered after a stop or seek are recognized as stale in update().
    let playback = if app.session.is_playing() {
        let epoch = app.session.tick_epoch();
        time::every(app.session.tick_interval())
            .with(epoch)
            .map(|(epoch, _)| Message::Tick(epoch))
    } else {
        Subscription::none()
    };

    Subscription::batch([events, playback])
}
