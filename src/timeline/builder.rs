use serde::Serialize;

use crate::foundation::error::FcpxResult;
use crate::foundation::ids::ResourceId;
use crate::foundation::time::Time;
use crate::resources::model::Asset;
use crate::timeline::element::{Element, ElementKind, TitleText};
use crate::timeline::spine::Spine;

/// Per-kind counts and lanes of a spine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SpineStatistics {
    /// `asset-clip` count.
    pub asset_clips: usize,
    /// `video` count (stills).
    pub videos: usize,
    /// `title` count.
    pub titles: usize,
    /// `gap` count.
    pub gaps: usize,
    /// Generator count.
    pub generators: usize,
    /// All top-level elements.
    pub total: usize,
    /// Sorted distinct lanes in use.
    pub lanes: Vec<i32>,
}

impl SpineStatistics {
    /// Collect statistics for `spine`.
    pub fn of(spine: &Spine) -> Self {
        let mut stats = Self {
            total: spine.len(),
            lanes: spine.lanes(),
            ..Self::default()
        };
        for el in spine.elements() {
            match el.kind {
                ElementKind::AssetClip => stats.asset_clips += 1,
                ElementKind::Video => stats.videos += 1,
                ElementKind::Title => stats.titles += 1,
                ElementKind::Gap => stats.gaps += 1,
                ElementKind::Generator => stats.generators += 1,
            }
        }
        stats
    }
}

/// Accumulates elements into a [`Spine`], applying the usual overlap rule.
#[derive(Debug, Default)]
pub struct SpineBuilder {
    spine: Spine,
}

impl SpineBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept overlapping insertions from now on.
    pub fn allow_overlaps(mut self, allow: bool) -> Self {
        self.spine.set_allow_overlaps(allow);
        self
    }

    /// Clip of `asset` over its full duration; the clip carries the asset's format.
    pub fn add_asset_clip(
        mut self,
        asset: &Asset,
        offset: Time,
        lane: Option<i32>,
    ) -> FcpxResult<Self> {
        let mut el = Element::asset_clip(asset.id, asset.name.clone(), offset, asset.duration)
            .with_format(asset.format_id);
        el.lane = lane;
        self.spine.add_element(el)?;
        Ok(self)
    }

    /// `video` element referencing `resource`.
    pub fn add_video(
        mut self,
        resource: ResourceId,
        name: impl Into<String>,
        offset: Time,
        duration: Time,
        lane: Option<i32>,
    ) -> FcpxResult<Self> {
        let mut el = Element::video(resource, name, offset, duration);
        el.lane = lane;
        self.spine.add_element(el)?;
        Ok(self)
    }

    /// Title instance of `effect` showing `text`.
    pub fn add_title(
        mut self,
        effect: ResourceId,
        text: impl Into<String>,
        offset: Time,
        duration: Time,
        lane: Option<i32>,
    ) -> FcpxResult<Self> {
        let mut el = Element::title(effect, TitleText::plain(text), offset, duration);
        el.lane = lane;
        self.spine.add_element(el)?;
        Ok(self)
    }

    /// Gap on the primary lane.
    pub fn add_gap(mut self, offset: Time, duration: Time) -> FcpxResult<Self> {
        self.spine.add_element(Element::gap(offset, duration))?;
        Ok(self)
    }

    /// Any prepared element.
    pub fn add_element(mut self, element: Element) -> FcpxResult<Self> {
        self.spine.add_element(element)?;
        Ok(self)
    }

    /// Counts of what has been added so far.
    pub fn statistics(&self) -> SpineStatistics {
        SpineStatistics::of(&self.spine)
    }

    /// Finish building; the returned spine is closed.
    pub fn build(mut self) -> Spine {
        self.spine.close();
        self.spine
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/builder.rs"]
mod tests;
