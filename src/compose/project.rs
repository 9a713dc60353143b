use std::path::Path;

use crate::compose::opts::BuildOpts;
use crate::document::model::{Document, Sequence};
use crate::foundation::error::{FcpxError, FcpxResult};
use crate::foundation::ids::ResourceId;
use crate::foundation::time::Time;
use crate::media::bookmark::{BookmarkGenerator, NoBookmarks};
use crate::media::probe::{FfprobeProber, MediaInfo, MediaProber};
use crate::media::source::resolve_source;
use crate::resources::model::{Asset, AudioInfo, Effect, Format, MediaKind};
use crate::resources::registry::{Registry, Transaction};
use crate::timeline::element::{Element, TitleText};
use crate::timeline::keyframe::{Keyframe, KeyframeAnimation, Param};
use crate::validate::report::ValidationReport;

/// Identity of the editor's built-in "Basic Title" template.
pub const BASIC_TITLE_UID: &str =
    ".../Titles.localized/Bumper:Opener.localized/Basic Title.localized/Basic Title.moti";

/// Lane used for titles and picture-in-picture overlays.
pub const OVERLAY_LANE: i32 = 1;

const PIP_SCALE: &str = "35 35";
const PIP_POSITION: &str = "-30 -17";

/// Builds a single-project document from media files.
///
/// Video, stills and gaps are appended to the primary storyline; audio stacks on its own
/// lane; titles and picture-in-picture overlays sit above. Every import runs in its own
/// transaction and is rolled back on failure.
pub struct ProjectBuilder {
    doc: Document,
    opts: BuildOpts,
    prober: Box<dyn MediaProber>,
    bookmarks: Box<dyn BookmarkGenerator>,
}

impl std::fmt::Debug for ProjectBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectBuilder")
            .field("doc", &self.doc)
            .field("opts", &self.opts)
            .finish_non_exhaustive()
    }
}

impl ProjectBuilder {
    /// New document named after `opts`, probing with `ffprobe` and writing no bookmarks.
    pub fn new(opts: BuildOpts) -> FcpxResult<Self> {
        opts.validate()?;
        let mut doc = Document::with_project(&opts.event_name, &opts.project_name)?;
        doc.version.clone_from(&opts.version);
        Ok(Self {
            doc,
            opts,
            prober: Box::new(FfprobeProber::default()),
            bookmarks: Box::new(NoBookmarks),
        })
    }

    /// Replace the media prober.
    pub fn with_prober(mut self, prober: impl MediaProber + 'static) -> Self {
        self.prober = Box::new(prober);
        self
    }

    /// Replace the bookmark generator.
    pub fn with_bookmarks(mut self, bookmarks: impl BookmarkGenerator + 'static) -> Self {
        self.bookmarks = Box::new(bookmarks);
        self
    }

    /// Settings in effect.
    pub fn opts(&self) -> &BuildOpts {
        &self.opts
    }

    /// Document built so far.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Finish and hand over the document.
    pub fn into_document(self) -> Document {
        self.doc
    }

    fn sequence_mut(&mut self) -> FcpxResult<&mut Sequence> {
        self.doc
            .primary_sequence_mut()
            .ok_or_else(|| FcpxError::validation("document has no project sequence"))
    }

    fn primary_end(&self) -> Time {
        self.doc
            .primary_sequence()
            .map_or(Time::ZERO, |s| s.spine.primary_end())
    }

    /// Append a video file to the primary storyline. Returns the asset id.
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    pub fn add_video(&mut self, path: &Path) -> FcpxResult<ResourceId> {
        let asset = self.import(path, MediaKind::Video)?;
        let offset = self.primary_end();
        let clip = Element::asset_clip(asset.id, asset.name.clone(), offset, asset.duration)
            .with_format(asset.format_id);
        self.sequence_mut()?.spine.add_element(clip)?;
        Ok(asset.id)
    }

    /// Append a still image shown for `duration`, or the configured image duration.
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    pub fn add_image(&mut self, path: &Path, duration: Option<Time>) -> FcpxResult<ResourceId> {
        let asset = self.import(path, MediaKind::Image)?;
        let duration = duration.unwrap_or_else(|| self.opts.image_duration());
        let offset = self.primary_end();
        let still = Element::video(asset.id, asset.name.clone(), offset, duration);
        self.sequence_mut()?.spine.add_element(still)?;
        Ok(asset.id)
    }

    /// Append an audio file to the end of the audio lane.
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    pub fn add_audio(&mut self, path: &Path) -> FcpxResult<ResourceId> {
        let asset = self.import(path, MediaKind::Audio)?;
        let lane = self.opts.audio_lane;
        let seq = self.sequence_mut()?;
        let offset = seq
            .spine
            .elements_by_lane(lane)
            .into_iter()
            .map(Element::end)
            .max()
            .unwrap_or(Time::ZERO);
        let clip = Element::asset_clip(asset.id, asset.name.clone(), offset, asset.duration)
            .with_lane(lane);
        seq.spine.add_element(clip)?;
        Ok(asset.id)
    }

    /// Basic Title showing `text` over `[offset, offset + duration)`.
    pub fn add_title(&mut self, text: &str, offset: Time, duration: Time) -> FcpxResult<()> {
        let effect = self.title_effect()?;
        let title =
            Element::title(effect, TitleText::plain(text), offset, duration).with_lane(OVERLAY_LANE);
        self.sequence_mut()?.spine.add_element(title)
    }

    /// Append an empty stretch to the primary storyline.
    pub fn add_gap(&mut self, duration: Time) -> FcpxResult<()> {
        let offset = self.primary_end();
        self.sequence_mut()?
            .spine
            .add_element(Element::gap(offset, duration))
    }

    /// Overlay `path` on the primary clip playing at `at`, shrunk into a corner.
    ///
    /// The overlay becomes a connected child of that clip, placed in the clip's own time
    /// space, with scale and position animated over its first second.
    #[tracing::instrument(skip(self), fields(path = %path.display(), at = %at))]
    pub fn add_picture_in_picture(
        &mut self,
        path: &Path,
        at: Time,
        duration: Time,
    ) -> FcpxResult<ResourceId> {
        let asset = self.import(path, MediaKind::Video)?;
        let mut overlay = Element::asset_clip(asset.id, asset.name.clone(), Time::ZERO, duration)
            .with_format(asset.format_id)
            .with_lane(OVERLAY_LANE);
        for anim in pip_animations(duration) {
            overlay = overlay.with_animation(anim);
        }

        let seq = self.sequence_mut()?;
        let host = seq
            .spine
            .elements_mut()
            .iter_mut()
            .filter(|e| e.lane_index() == 0 && e.intersects(at, at + Time::from_ticks(1)))
            .min_by_key(|e| e.offset)
            .ok_or_else(|| {
                FcpxError::validation(format!("no primary clip plays at {at} to host an overlay"))
            })?;
        let local = host.start.unwrap_or(Time::ZERO) + at.saturating_sub(host.offset);
        overlay.offset = local;
        host.add_child(overlay)?;
        Ok(asset.id)
    }

    /// Validate, then serialize; strict settings refuse documents with findings.
    pub fn to_fcpxml(&self) -> FcpxResult<(String, ValidationReport)> {
        let report = self.doc.validate();
        if self.opts.strict {
            report.clone().into_result()?;
        } else {
            for finding in report.findings() {
                tracing::warn!(%finding, "writing document with validation finding");
            }
        }
        Ok((self.doc.to_fcpxml(), report))
    }

    fn title_effect(&mut self) -> FcpxResult<ResourceId> {
        if let Some(effect) = self.doc.registry.effect_by_uid(BASIC_TITLE_UID) {
            return Ok(effect.id);
        }
        let mut tx = Transaction::new(&mut self.doc.registry);
        let staged = tx.reserve_id().and_then(|id| {
            tx.create_effect(Effect {
                id,
                name: "Basic Title".to_owned(),
                uid: BASIC_TITLE_UID.to_owned(),
            })
        });
        finish(tx, staged)
    }

    fn probe(&self, path: &Path, kind: MediaKind) -> MediaInfo {
        let mut info = match self.prober.probe(path) {
            Ok(info) => info,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "probe failed; using defaults");
                MediaInfo::default()
            }
        };
        if kind != MediaKind::Image && info.duration().is_zero() {
            tracing::warn!(path = %path.display(), "probe reported no duration; using default");
            info.duration_sec = MediaInfo::default().duration_sec;
        }
        if kind != MediaKind::Audio && (info.width == 0 || info.height == 0) {
            let defaults = MediaInfo::default();
            info.width = defaults.width;
            info.height = defaults.height;
        }
        info
    }

    /// Define (or reuse) the asset for `path`.
    fn import(&mut self, path: &Path, kind: MediaKind) -> FcpxResult<Asset> {
        let resolved = resolve_source(path)?;
        let key = resolved.display().to_string();
        if let Some(existing) = self.doc.registry.asset_by_path(&key) {
            tracing::debug!(id = %existing.id, "reusing asset");
            return Ok(existing.clone());
        }

        let info = self.probe(&resolved, kind);
        let bookmark = self.bookmarks.bookmark(&resolved);
        let name = resolved
            .file_stem()
            .map_or_else(|| key.clone(), |s| s.to_string_lossy().into_owned());

        let mut tx = Transaction::new(&mut self.doc.registry);
        let staged = stage_asset(&mut tx, &key, name, kind, &info, bookmark);
        let asset = finish(tx, staged)?;
        tracing::debug!(id = %asset.id, kind = ?kind, "asset defined");
        Ok(asset)
    }
}

/// Commit on success, roll back on failure.
fn finish<T>(mut tx: Transaction<'_>, staged: FcpxResult<T>) -> FcpxResult<T> {
    match staged {
        Ok(value) => {
            tx.commit()?;
            Ok(value)
        }
        Err(e) => {
            tx.rollback()?;
            Err(e)
        }
    }
}

fn stage_asset(
    tx: &mut Transaction<'_>,
    path: &str,
    name: String,
    kind: MediaKind,
    info: &MediaInfo,
    bookmark: String,
) -> FcpxResult<Asset> {
    let format_id = match kind {
        MediaKind::Audio => None,
        MediaKind::Video => {
            let existing = tx
                .registry()
                .format_for_size(info.width, info.height)
                .map(|f| f.id);
            match existing {
                Some(id) => Some(id),
                None => {
                    let id = tx.reserve_id()?;
                    Some(tx.create_format(Format::video(id, info.width, info.height))?)
                }
            }
        }
        MediaKind::Image => match still_format(tx.registry(), info.width, info.height) {
            Some(id) => Some(id),
            None => {
                let id = tx.reserve_id()?;
                Some(tx.create_format(Format::still(id, info.width, info.height))?)
            }
        },
    };

    let duration = match kind {
        MediaKind::Image => Time::ZERO,
        _ => info.duration(),
    };
    let audio = (kind != MediaKind::Image && info.has_audio).then_some(AudioInfo {
        rate: info.audio_rate,
        channels: info.audio_channels,
    });
    let (resource, _) = tx.get_or_create_asset(path, |id| {
        let mut asset = Asset::new(id, name, path, kind, duration);
        asset.format_id = format_id;
        asset.audio = audio;
        asset.bookmark = Some(bookmark).filter(|b| !b.is_empty());
        asset
    })?;
    resource
        .as_asset()
        .cloned()
        .ok_or_else(|| FcpxError::validation(format!("'{path}' is not an asset")))
}

fn still_format(registry: &Registry, width: u32, height: u32) -> Option<ResourceId> {
    registry
        .formats()
        .find(|f| f.frame_duration.is_none() && f.width == width && f.height == height)
        .map(|f| f.id)
}

fn pip_animations(duration: Time) -> Vec<KeyframeAnimation> {
    let settle = Time::from_seconds(1.0).min(duration);
    let keys = |from: &str, to: &str, param: Param| {
        let anim = KeyframeAnimation::new(param).key(Keyframe::new(Time::ZERO, from));
        if settle.is_zero() {
            anim
        } else {
            anim.key(Keyframe::new(settle, to))
        }
    };
    vec![
        keys("0 0", PIP_POSITION, Param::Position),
        keys("100 100", PIP_SCALE, Param::Scale),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/compose/project.rs"]
mod tests;
