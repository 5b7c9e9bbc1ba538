//! Controller configuration

/// Environment variable overriding the streaming binary
pub const PROGRAM_ENV: &str = "FFMPEG_BIN";

/// Controller configuration options
///
/// Holds the per-channel output policy defaults that the argument builder
/// falls back to when a [`StreamSpec`](crate::StreamSpec) carries no sink.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Streaming binary to launch
    pub program: String,

    /// PulseAudio sink for the audio channel
    pub audio_sink: String,

    /// Output channel count for audio
    pub audio_channels: u32,

    /// Output sample rate for audio (Hz)
    pub audio_sample_rate: u32,

    /// v4l2loopback device for the video channel
    pub video_device: String,

    /// Pixel format written to the video device
    pub pixel_format: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            program: "ffmpeg".to_string(),
            audio_sink: "audio_input".to_string(),
            audio_channels: 2,
            audio_sample_rate: 48_000,
            video_device: "/dev/video10".to_string(),
            pixel_format: "yuv420p".to_string(),
        }
    }
}

impl ControllerConfig {
    /// Defaults, with the program taken from `FFMPEG_BIN` when set
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var(PROGRAM_ENV) {
            Ok(program) if !program.trim().is_empty() => config.program(program),
            _ => config,
        }
    }

    /// Set the streaming binary
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Set the default audio sink
    pub fn audio_sink(mut self, sink: impl Into<String>) -> Self {
        self.audio_sink = sink.into();
        self
    }

    /// Set audio channel count and sample rate
    pub fn audio_format(mut self, channels: u32, sample_rate: u32) -> Self {
        self.audio_channels = channels;
        self.audio_sample_rate = sample_rate;
        self
    }

    /// Set the default video device
    pub fn video_device(mut self, device: impl Into<String>) -> Self {
        self.video_device = device.into();
        self
    }

    /// Set the video pixel format
    pub fn pixel_format(mut self, format: impl Into<String>) -> Self {
        self.pixel_format = format.into();
        self
    }
}
