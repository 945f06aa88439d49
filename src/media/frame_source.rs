// SPDX-License-Identifier: MPL-2.0
//! FFmpeg-backed frame access by index.

use crate::error::{Error, Result, VideoError};
use crate::media::Frame;
use std::path::Path;
use std::sync::Once;

/// Static flag to ensure FFmpeg is initialized only once.
static FFMPEG_INIT: Once = Once::new();

/// Initialize FFmpeg with appropriate log level.
///
/// Safe to call multiple times thanks to `std::sync::Once`. Sets the FFmpeg
/// log level to ERROR to suppress per-file warning chatter.
pub fn init_ffmpeg() -> Result<()> {
    let mut init_result: Result<()> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(Error::Video(VideoError::Other(format!(
                "FFmpeg initialization failed: {e}"
            ))));
            return;
        }

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// Frame access contract the session depends on.
///
/// `FrameSource` is the production implementation; tests substitute a
/// synthetic source so the interactive core runs without a decoder.
pub trait VideoSource {
    /// Total number of frames in the video.
    fn length(&self) -> u32;

    /// Nominal frames per second.
    fn fps(&self) -> u32;

    /// Frame dimensions as (width, height).
    fn frame_size(&self) -> (u32, u32);

    /// Advances the decode cursor by one frame. `None` signals end of stream.
    fn read_sequential(&mut self) -> Option<Frame>;

    /// Repositions the decode cursor to `index` and reads that frame.
    ///
    /// Returns `None` when `index` is out of bounds or the decoder cannot
    /// deliver a frame there; both are tolerated, never fatal. Random access
    /// is slower than `read_sequential`, so monotonic playback should prefer
    /// the sequential path.
    fn seek_and_read(&mut self, index: i64) -> Option<Frame>;
}

/// Sequential/random video frame reader built on FFmpeg.
///
/// The decoder handle is exclusively owned: seek and sequential reads against
/// the same source are serialized by ownership, since the underlying decoder
/// is not safe for concurrent positional reads.
pub struct FrameSource {
    ictx: ffmpeg_next::format::context::Input,
    decoder: ffmpeg_next::decoder::Video,
    scaler: ffmpeg_next::software::scaling::Context,
    stream_index: usize,
    /// Stream time base in seconds per PTS unit.
    time_base: f64,
    fps: f64,
    length: u32,
    width: u32,
    height: u32,
    /// Index of the next frame `read_sequential` will deliver.
    cursor: u32,
}

impl FrameSource {
    /// Opens a video file for frame access.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Error::Video(VideoError::IoError(format!(
                "No such file: {}",
                path.display()
            ))));
        }

        init_ffmpeg()?;

        let ictx = ffmpeg_next::format::input(&path)
            .map_err(|e| Error::Video(VideoError::from_message(&e.to_string())))?;

        let input = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or(Error::Video(VideoError::NoVideoStream))?;
        let stream_index = input.index();

        let time_base = input.time_base();
        let time_base = f64::from(time_base.numerator()) / f64::from(time_base.denominator());

        let rate = input.avg_frame_rate();
        let fps = if rate.denominator() != 0 {
            f64::from(rate.numerator()) / f64::from(rate.denominator())
        } else {
            0.0
        };

        // Prefer the container's frame count; fall back to duration * fps for
        // containers that do not record it.
        let stream_frames = input.frames();
        let duration_secs = if ictx.duration() > 0 {
            ictx.duration() as f64 / 1_000_000.0
        } else {
            0.0
        };

        let context_decoder =
            ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
                .map_err(|e| Error::Video(VideoError::from_message(&e.to_string())))?;
        let decoder = context_decoder
            .decoder()
            .video()
            .map_err(|e| Error::Video(VideoError::from_message(&e.to_string())))?;

        let width = decoder.width();
        let height = decoder.height();
        if width == 0 || height == 0 {
            return Err(Error::Video(VideoError::CorruptedFile));
        }

        let scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGBA,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .map_err(|e| Error::Video(VideoError::from_message(&e.to_string())))?;

        let length = if stream_frames > 0 {
            stream_frames as u32
        } else {
            (duration_secs * fps).round() as u32
        };

        Ok(Self {
            ictx,
            decoder,
            scaler,
            stream_index,
            time_base,
            fps,
            length,
            width,
            height,
            cursor: 0,
        })
    }

    /// Decodes the next raw frame from the stream, draining the decoder
    /// before demuxing further packets.
    fn decode_next(&mut self) -> Option<ffmpeg_next::frame::Video> {
        let mut decoded = ffmpeg_next::frame::Video::empty();

        if self.decoder.receive_frame(&mut decoded).is_ok() {
            return Some(decoded);
        }

        for (stream, packet) in self.ictx.packets() {
            if stream.index() != self.stream_index {
                continue;
            }
            if self.decoder.send_packet(&packet).is_err() {
                continue;
            }
            if self.decoder.receive_frame(&mut decoded).is_ok() {
                return Some(decoded);
            }
        }

        // Demuxer exhausted: flush the decoder for any delayed frames.
        let _ = self.decoder.send_eof();
        if self.decoder.receive_frame(&mut decoded).is_ok() {
            return Some(decoded);
        }

        None
    }

    /// Converts a decoded frame to RGBA, handling stride correctly.
    fn to_rgba_frame(&mut self, decoded: &ffmpeg_next::frame::Video, index: u32) -> Option<Frame> {
        let mut rgba_frame = ffmpeg_next::frame::Video::empty();
        self.scaler.run(decoded, &mut rgba_frame).ok()?;

        let width = rgba_frame.width();
        let height = rgba_frame.height();
        let data = rgba_frame.data(0);
        let stride = rgba_frame.stride(0);

        let mut rgba_bytes = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            let row_start = (y as usize) * stride;
            let row_end = row_start + (width * 4) as usize;
            rgba_bytes.extend_from_slice(&data[row_start..row_end]);
        }

        Some(Frame::from_rgba(rgba_bytes, width, height, index))
    }

    /// Presentation time of a decoded frame in seconds.
    fn pts_secs(&self, decoded: &ffmpeg_next::frame::Video) -> Option<f64> {
        decoded.timestamp().map(|pts| pts as f64 * self.time_base)
    }
}

impl VideoSource for FrameSource {
    fn length(&self) -> u32 {
        self.length
    }

    fn fps(&self) -> u32 {
        self.fps.round().max(1.0) as u32
    }

    fn frame_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn read_sequential(&mut self) -> Option<Frame> {
        if self.cursor >= self.length {
            return None;
        }

        let decoded = self.decode_next()?;
        let frame = self.to_rgba_frame(&decoded, self.cursor)?;
        self.cursor += 1;
        Some(frame)
    }

    fn seek_and_read(&mut self, index: i64) -> Option<Frame> {
        if index < 0 || index >= i64::from(self.length) {
            return None;
        }

        let fps = if self.fps > 0.0 { self.fps } else { 30.0 };
        let target_secs = index as f64 / fps;

        // AV_TIME_BASE units (microseconds); the RangeTo bound lets FFmpeg
        // land on the keyframe at or before the target.
        let timestamp = (target_secs * 1_000_000.0) as i64;
        self.ictx.seek(timestamp, ..timestamp).ok()?;
        self.decoder.flush();

        // Decode forward from the keyframe until the target frame time.
        let half_frame = 0.5 / fps;
        loop {
            let decoded = self.decode_next()?;
            let pts = self.pts_secs(&decoded).unwrap_or(target_secs);
            if pts + half_frame >= target_secs {
                let frame = self.to_rgba_frame(&decoded, index as u32)?;
                self.cursor = index as u32 + 1;
                return Some(frame);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_fails_for_nonexistent_file() {
        let result = FrameSource::open("/nonexistent/review.mp4");
        assert!(matches!(
            result,
            Err(Error::Video(VideoError::IoError(_)))
        ));
    }

    #[test]
    fn open_fails_for_non_video_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("not-a-video.mp4");
        std::fs::write(&path, b"plain text, no container").expect("write file");

        assert!(FrameSource::open(&path).is_err());
    }

    #[test]
    fn sequential_reads_walk_the_stream() {
        // Exercised only when a real fixture is present.
        let path = "tests/data/sample.mp4";
        if !std::path::Path::new(path).exists() {
            return;
        }

        let mut source = FrameSource::open(path).expect("open sample video");
        assert!(source.length() > 0);
        assert!(source.fps() > 0);

        let first = source.read_sequential().expect("first frame");
        assert_eq!(first.index, 0);
        assert_eq!(first.size_bytes(), (first.width * first.height * 4) as usize);

        let second = source.read_sequential().expect("second frame");
        assert_eq!(second.index, 1);
    }

    #[test]
    fn seek_out_of_bounds_returns_none() {
        let path = "tests/data/sample.mp4";
        if !std::path::Path::new(path).exists() {
            return;
        }

        let mut source = FrameSource::open(path).expect("open sample video");
        assert!(source.seek_and_read(-1).is_none());
        assert!(source.seek_and_read(i64::from(source.length())).is_none());
    }
}
