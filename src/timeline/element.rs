use serde::Serialize;

use crate::foundation::error::{FcpxError, FcpxResult};
use crate::foundation::ids::ResourceId;
use crate::foundation::time::Time;
use crate::timeline::keyframe::{Filter, KeyframeAnimation};

/// Element kinds that can sit on a spine or inside another element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Clip of an asset or compound media.
    AssetClip,
    /// Still image or generic video reference.
    Video,
    /// Title template instance.
    Title,
    /// Empty space on the primary storyline.
    Gap,
    /// Generator effect instance.
    Generator,
}

impl ElementKind {
    /// Element name written to the document.
    ///
    /// Generators share the `video` element with stills.
    pub fn tag(self) -> &'static str {
        match self {
            Self::AssetClip => "asset-clip",
            Self::Video | Self::Generator => "video",
            Self::Title => "title",
            Self::Gap => "gap",
        }
    }
}

/// Text content of a title.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TitleText {
    /// Displayed text.
    pub text: String,
    /// Font family.
    pub font: String,
    /// Font size in points.
    pub font_size: u32,
    /// RGBA components in 0..1, space separated.
    pub color: String,
}

impl TitleText {
    /// White Helvetica text.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: "Helvetica".to_owned(),
            font_size: 63,
            color: "1 1 1 1".to_owned(),
        }
    }
}

/// Timed item on a spine. Children are connected items in their parent's time space.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Element {
    /// Kind.
    pub kind: ElementKind,
    /// Display name.
    pub name: String,
    /// Position in the parent timeline.
    pub offset: Time,
    /// Length.
    pub duration: Time,
    /// Source start, when trimmed.
    pub start: Option<Time>,
    /// Lane; `None` and `Some(0)` are the primary lane.
    pub lane: Option<i32>,
    /// Referenced resource.
    pub resource: Option<ResourceId>,
    /// Format reference carried by asset clips.
    pub format: Option<ResourceId>,
    /// Nested elements.
    pub children: Vec<Element>,
    /// Intrinsic animations (transform, crop, volume, opacity).
    pub animations: Vec<KeyframeAnimation>,
    /// Effects applied on top.
    pub filters: Vec<Filter>,
    /// Text for titles.
    pub title: Option<TitleText>,
}

impl Element {
    /// Bare element of `kind`.
    pub fn new(kind: ElementKind, name: impl Into<String>, offset: Time, duration: Time) -> Self {
        Self {
            kind,
            name: name.into(),
            offset,
            duration,
            start: None,
            lane: None,
            resource: None,
            format: None,
            children: Vec::new(),
            animations: Vec::new(),
            filters: Vec::new(),
            title: None,
        }
    }

    /// `asset-clip` referencing `asset`.
    pub fn asset_clip(
        asset: ResourceId,
        name: impl Into<String>,
        offset: Time,
        duration: Time,
    ) -> Self {
        Self::new(ElementKind::AssetClip, name, offset, duration).with_resource(asset)
    }

    /// `video` referencing a still or other picture resource.
    pub fn video(
        resource: ResourceId,
        name: impl Into<String>,
        offset: Time,
        duration: Time,
    ) -> Self {
        Self::new(ElementKind::Video, name, offset, duration).with_resource(resource)
    }

    /// `title` instance of a title effect.
    pub fn title(effect: ResourceId, text: TitleText, offset: Time, duration: Time) -> Self {
        let mut el = Self::new(ElementKind::Title, text.text.clone(), offset, duration)
            .with_resource(effect);
        el.title = Some(text);
        el
    }

    /// Empty `gap`.
    pub fn gap(offset: Time, duration: Time) -> Self {
        Self::new(ElementKind::Gap, "Gap", offset, duration)
    }

    /// Generator instance of a generator effect.
    pub fn generator(
        effect: ResourceId,
        name: impl Into<String>,
        offset: Time,
        duration: Time,
    ) -> Self {
        Self::new(ElementKind::Generator, name, offset, duration).with_resource(effect)
    }

    /// Set the referenced resource.
    pub fn with_resource(mut self, id: ResourceId) -> Self {
        self.resource = Some(id);
        self
    }

    /// Set the lane.
    pub fn with_lane(mut self, lane: i32) -> Self {
        self.lane = Some(lane);
        self
    }

    /// Set the source start.
    pub fn with_start(mut self, start: Time) -> Self {
        self.start = Some(start);
        self
    }

    /// Set the format reference.
    pub fn with_format(mut self, format: Option<ResourceId>) -> Self {
        self.format = format;
        self
    }

    /// Attach an intrinsic animation.
    pub fn with_animation(mut self, animation: KeyframeAnimation) -> Self {
        self.animations.push(animation);
        self
    }

    /// Attach a filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Normalized lane (0 = primary).
    pub fn lane_index(&self) -> i32 {
        self.lane.unwrap_or(0)
    }

    /// Exclusive end, `offset + duration`.
    pub fn end(&self) -> Time {
        self.offset + self.duration
    }

    /// Half-open intersection with `[from, to)`.
    pub fn intersects(&self, from: Time, to: Time) -> bool {
        self.offset < to && from < self.end()
    }

    /// Same lane and intersecting intervals.
    pub fn conflicts_with(&self, other: &Element) -> bool {
        self.lane_index() == other.lane_index() && self.intersects(other.offset, other.end())
    }

    /// Short human-readable identification.
    pub fn describe(&self) -> String {
        match self.resource {
            Some(id) => format!("{} '{}' ({id})", self.kind.tag(), self.name),
            None => format!("{} '{}'", self.kind.tag(), self.name),
        }
    }

    /// Nest `child`, refusing same-lane overlaps with existing children.
    pub fn add_child(&mut self, child: Element) -> FcpxResult<()> {
        if let Some(other) = self.children.iter().find(|c| c.conflicts_with(&child)) {
            return Err(overlap_error(other));
        }
        self.children.push(child);
        Ok(())
    }

    /// Children by ascending offset; ties keep insertion order.
    pub fn ordered_children(&self) -> Vec<&Element> {
        let mut out: Vec<&Element> = self.children.iter().collect();
        out.sort_by_key(|c| c.offset);
        out
    }

    /// Total number of elements in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Element::subtree_len).sum::<usize>()
    }
}

pub(crate) fn overlap_error(other: &Element) -> FcpxError {
    FcpxError::LaneOverlap {
        lane: other.lane_index(),
        with: other.describe(),
        start: other.offset,
        end: other.end(),
    }
}
