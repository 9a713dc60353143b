use serde::Serialize;

use crate::document::model::Sequence;
use crate::foundation::ids::ResourceId;
use crate::foundation::time::Time;

/// What kind of media an [`Asset`] points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Moving picture, possibly with sound.
    Video,
    /// Sound only.
    Audio,
    /// Still image.
    Image,
}

/// Audio stream description carried by an asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AudioInfo {
    /// Sample rate in Hz.
    pub rate: u32,
    /// Channel count.
    pub channels: u16,
}

impl Default for AudioInfo {
    fn default() -> Self {
        Self {
            rate: 48_000,
            channels: 2,
        }
    }
}

/// Reference to a media file on disk.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Asset {
    /// Resource id.
    pub id: ResourceId,
    /// Display name.
    pub name: String,
    /// Absolute, already-resolved path.
    pub path: String,
    /// Media kind.
    pub media_kind: MediaKind,
    /// Source start.
    pub start: Time,
    /// Source duration; `0s` for stills.
    pub duration: Time,
    /// Format resource describing the picture, if any.
    pub format_id: Option<ResourceId>,
    /// Audio stream, if any.
    pub audio: Option<AudioInfo>,
    /// Opaque security-scoped bookmark token.
    pub bookmark: Option<String>,
}

impl Asset {
    /// New asset with no format, audio or bookmark.
    pub fn new(
        id: ResourceId,
        name: impl Into<String>,
        path: impl Into<String>,
        media_kind: MediaKind,
        duration: Time,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            path: path.into(),
            media_kind,
            start: Time::ZERO,
            duration,
            format_id: None,
            audio: None,
            bookmark: None,
        }
    }

    /// `file://` URL of the underlying file.
    pub fn src_url(&self) -> String {
        format!("file://{}", self.path)
    }

    /// Whether the asset carries picture.
    pub fn has_video(&self) -> bool {
        !matches!(self.media_kind, MediaKind::Audio)
    }

    /// Whether the asset carries sound.
    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }
}

/// Picture format shared by assets and sequences.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Format {
    /// Resource id.
    pub id: ResourceId,
    /// Editor preset name, e.g. `FFVideoFormat1080p2398`.
    pub name: Option<String>,
    /// Duration of one frame; absent for stills.
    pub frame_duration: Option<Time>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Color space label.
    pub color_space: String,
}

impl Format {
    /// Rec. 709 colour space label used by the target editor.
    pub const REC709: &'static str = "1-1-1 (Rec. 709)";

    /// 1920x1080 at 23.976 fps.
    pub fn hd1080p2398(id: ResourceId) -> Self {
        Self {
            id,
            name: Some("FFVideoFormat1080p2398".to_owned()),
            frame_duration: Some(Time::from_ticks(1)),
            width: 1920,
            height: 1080,
            color_space: Self::REC709.to_owned(),
        }
    }

    /// Arbitrary size on the 23.976 grid.
    pub fn video(id: ResourceId, width: u32, height: u32) -> Self {
        Self {
            id,
            name: None,
            frame_duration: Some(Time::from_ticks(1)),
            width,
            height,
            color_space: Self::REC709.to_owned(),
        }
    }

    /// Still-image format (no frame duration).
    pub fn still(id: ResourceId, width: u32, height: u32) -> Self {
        Self {
            id,
            name: Some("FFVideoFormatRateUndefined".to_owned()),
            frame_duration: None,
            width,
            height,
            color_space: Self::REC709.to_owned(),
        }
    }
}

/// Built-in effect, generator or title template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Effect {
    /// Resource id.
    pub id: ResourceId,
    /// Display name.
    pub name: String,
    /// Identity recognized by the editor's effect catalog.
    pub uid: String,
}

/// Compound media owning a nested sequence.
#[derive(Clone, Debug, Serialize)]
pub struct Media {
    /// Resource id.
    pub id: ResourceId,
    /// Display name.
    pub name: String,
    /// Nested sequence.
    pub sequence: Sequence,
}

/// Any definition that lives in the document's resource table.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Resource {
    /// Media file reference.
    Asset(Asset),
    /// Picture format.
    Format(Format),
    /// Effect / title / generator.
    Effect(Effect),
    /// Compound clip.
    Media(Media),
}

impl Resource {
    /// Id of the wrapped definition.
    pub fn id(&self) -> ResourceId {
        match self {
            Self::Asset(a) => a.id,
            Self::Format(f) => f.id,
            Self::Effect(e) => e.id,
            Self::Media(m) => m.id,
        }
    }

    /// Element name used in the document.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Asset(_) => "asset",
            Self::Format(_) => "format",
            Self::Effect(_) => "effect",
            Self::Media(_) => "media",
        }
    }

    /// The asset, if this is one.
    pub fn as_asset(&self) -> Option<&Asset> {
        match self {
            Self::Asset(a) => Some(a),
            _ => None,
        }
    }

    /// The format, if this is one.
    pub fn as_format(&self) -> Option<&Format> {
        match self {
            Self::Format(f) => Some(f),
            _ => None,
        }
    }

    /// The effect, if this is one.
    pub fn as_effect(&self) -> Option<&Effect> {
        match self {
            Self::Effect(e) => Some(e),
            _ => None,
        }
    }

    /// The compound media, if this is one.
    pub fn as_media(&self) -> Option<&Media> {
        match self {
            Self::Media(m) => Some(m),
            _ => None,
        }
    }

    pub(crate) fn check_definition(&self) -> Result<(), String> {
        match self {
            Self::Asset(a) => {
                if a.path.trim().is_empty() {
                    return Err(format!("asset {} has an empty path", a.id));
                }
                if a.media_kind != MediaKind::Image && a.duration.is_zero() {
                    return Err(format!("asset {} needs a non-zero duration", a.id));
                }
                Ok(())
            }
            Self::Format(f) => {
                if f.width == 0 || f.height == 0 {
                    return Err(format!("format {} must have non-zero dimensions", f.id));
                }
                Ok(())
            }
            Self::Effect(e) => {
                if e.uid.trim().is_empty() {
                    return Err(format!("effect {} has an empty uid", e.id));
                }
                Ok(())
            }
            Self::Media(_) => Ok(()),
        }
    }
}
