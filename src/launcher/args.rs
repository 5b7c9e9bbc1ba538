//! Argument policy
//!
//! Builds the streaming binary's argument list for a channel. Order is fixed:
//! real-time input flag, optional infinite loop, input, channel output.

use crate::controller::ControllerConfig;
use crate::stream::{Channel, StreamSpec};

/// Sink (audio) or device (video) the channel writes to
pub fn output_sink<'a>(
    channel: Channel,
    spec: &'a StreamSpec,
    config: &'a ControllerConfig,
) -> &'a str {
    if let Some(ref sink) = spec.sink {
        return sink;
    }
    match channel {
        Channel::Audio => &config.audio_sink,
        Channel::Video => &config.video_device,
    }
}

/// Build the full argument list for a stream
pub fn build_args(channel: Channel, spec: &StreamSpec, config: &ControllerConfig) -> Vec<String> {
    let mut args: Vec<String> = vec!["-re".into()];

    // Only meaningful for file inputs; live sources ignore it
    if spec.loop_input {
        args.extend(["-stream_loop".into(), "-1".into()]);
    }

    args.extend(["-i".into(), spec.source.clone()]);

    let sink = output_sink(channel, spec, config).to_string();
    match channel {
        Channel::Audio => args.extend([
            "-f".into(),
            "pulse".into(),
            "-ac".into(),
            config.audio_channels.to_string(),
            "-ar".into(),
            config.audio_sample_rate.to_string(),
            sink,
        ]),
        Channel::Video => args.extend([
            "-f".into(),
            "v4l2".into(),
            "-pix_fmt".into(),
            config.pixel_format.clone(),
            "-vcodec".into(),
            "rawvideo".into(),
            sink,
        ]),
    }

    args
}
