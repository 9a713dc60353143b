use std::path::{Path, PathBuf};

use crate::foundation::error::{FcpxError, FcpxResult};
use crate::foundation::time::Time;

/// Stream facts the builders need to define an asset.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaInfo {
    /// Picture width, 0 without video.
    pub width: u32,
    /// Picture height, 0 without video.
    pub height: u32,
    /// Frame rate numerator.
    pub fps_num: u32,
    /// Frame rate denominator.
    pub fps_den: u32,
    /// Container duration in seconds.
    pub duration_sec: f64,
    /// A video stream is present.
    pub has_video: bool,
    /// An audio stream is present.
    pub has_audio: bool,
    /// Audio sample rate in Hz.
    pub audio_rate: u32,
    /// Audio channel count.
    pub audio_channels: u16,
}

impl Default for MediaInfo {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            fps_num: 24_000,
            fps_den: 1001,
            duration_sec: 10.0,
            has_video: true,
            has_audio: true,
            audio_rate: 48_000,
            audio_channels: 2,
        }
    }
}

impl MediaInfo {
    /// Frames per second, 0 when unknown.
    pub fn frame_rate(&self) -> f64 {
        if self.fps_den == 0 {
            0.0
        } else {
            f64::from(self.fps_num) / f64::from(self.fps_den)
        }
    }

    /// Duration snapped onto the tick grid.
    pub fn duration(&self) -> Time {
        Time::from_seconds(self.duration_sec)
    }
}

/// Reads stream metadata from a media file.
pub trait MediaProber {
    /// Probe the file at `path` (already resolved to an absolute path).
    fn probe(&self, path: &Path) -> FcpxResult<MediaInfo>;
}

/// Prober that answers every path with the same facts.
#[derive(Clone, Debug, Default)]
pub struct FixedProber(pub MediaInfo);

impl MediaProber for FixedProber {
    fn probe(&self, _path: &Path) -> FcpxResult<MediaInfo> {
        Ok(self.0.clone())
    }
}

/// Prober backed by the `ffprobe` executable.
#[derive(Clone, Debug)]
pub struct FfprobeProber {
    program: PathBuf,
}

impl Default for FfprobeProber {
    fn default() -> Self {
        Self {
            program: PathBuf::from("ffprobe"),
        }
    }
}

impl FfprobeProber {
    /// Use a specific `ffprobe` binary.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[cfg(feature = "media-ffmpeg")]
impl MediaProber for FfprobeProber {
    fn probe(&self, path: &Path) -> FcpxResult<MediaInfo> {
        let out = std::process::Command::new(&self.program)
            .args([
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_streams",
                "-show_format",
            ])
            .arg(path)
            .output()
            .map_err(|e| FcpxError::probe(format!("failed to run ffprobe: {e}")))?;
        if !out.status.success() {
            return Err(FcpxError::probe(format!(
                "ffprobe failed for '{}': {}",
                path.display(),
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }
        parse_ffprobe_json(&out.stdout)
    }
}

#[cfg(not(feature = "media-ffmpeg"))]
impl MediaProber for FfprobeProber {
    fn probe(&self, _path: &Path) -> FcpxResult<MediaInfo> {
        Err(FcpxError::probe(format!(
            "probing with '{}' requires the 'media-ffmpeg' feature",
            self.program.display()
        )))
    }
}

/// Interpret `ffprobe -print_format json -show_streams -show_format` output.
#[cfg_attr(not(feature = "media-ffmpeg"), allow(dead_code))]
pub(crate) fn parse_ffprobe_json(bytes: &[u8]) -> FcpxResult<MediaInfo> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        r_frame_rate: Option<String>,
        sample_rate: Option<String>,
        channels: Option<u16>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        #[serde(default)]
        streams: Vec<ProbeStream>,
        format: Option<ProbeFormat>,
    }

    let parsed: ProbeOut = serde_json::from_slice(bytes)
        .map_err(|e| FcpxError::probe(format!("ffprobe json parse failed: {e}")))?;
    let video = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"));
    let audio = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("audio"));
    if video.is_none() && audio.is_none() {
        return Err(FcpxError::probe("no audio or video stream found"));
    }

    let defaults = MediaInfo::default();
    let (fps_num, fps_den) = video
        .and_then(|v| v.r_frame_rate.as_deref())
        .and_then(parse_ff_ratio)
        .filter(|&(n, _)| n > 0)
        .unwrap_or((defaults.fps_num, defaults.fps_den));
    let duration_sec = parsed
        .format
        .as_ref()
        .and_then(|f| f.duration.as_deref())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d > 0.0)
        .unwrap_or(0.0);

    Ok(MediaInfo {
        width: video.and_then(|v| v.width).unwrap_or(0),
        height: video.and_then(|v| v.height).unwrap_or(0),
        fps_num,
        fps_den,
        duration_sec,
        has_video: video.is_some(),
        has_audio: audio.is_some(),
        audio_rate: audio
            .and_then(|a| a.sample_rate.as_deref())
            .and_then(|r| r.parse().ok())
            .unwrap_or(defaults.audio_rate),
        audio_channels: audio
            .and_then(|a| a.channels)
            .unwrap_or(defaults.audio_channels),
    })
}

fn parse_ff_ratio(s: &str) -> Option<(u32, u32)> {
    let mut parts = s.split('/');
    let a = parts.next()?.parse::<u32>().ok()?;
    let b = parts.next()?.parse::<u32>().ok()?;
    if b == 0 {
        return None;
    }
    Some((a, b))
}

#[cfg(test)]
#[path = "../../tests/unit/media/probe.rs"]
mod tests;
