// SPDX-License-Identifier: MPL-2.0
use facemark::app::{self, Flags};
use pico_args;

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        landmarks_path: args.opt_value_from_str("--landmarks").unwrap(),
        video_path: args
            .finish()
            .into_iter()
            .next()
            .and_then(|s| s.into_string().ok()),
    };

    app::run(flags)
}
