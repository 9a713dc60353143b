//! Lane-partitioned element storage for one sequence.
//!
//! Intervals are half-open: `[offset, offset + duration)`. Two elements in the same lane
//! conflict when `start < other_end && other_start < end`, so touching at a boundary is fine.
//! Global time order is computed on demand rather than maintained on insert.

use serde::Serialize;

use crate::foundation::error::FcpxResult;
use crate::foundation::time::Time;
use crate::timeline::element::{Element, ElementKind, overlap_error};

/// Ordered-by-semantics collection of top-level elements.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Spine {
    elements: Vec<Element>,
    allow_overlaps: bool,
    #[serde(skip)]
    closed: bool,
}

impl Spine {
    /// Empty spine enforcing lane overlaps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `element`, failing with `LaneOverlap` on a same-lane conflict.
    pub fn add_element(&mut self, element: Element) -> FcpxResult<()> {
        if self.closed {
            tracing::warn!(
                element = %element.describe(),
                "inserting into a spine that was already ordered for output"
            );
        }
        if !self.allow_overlaps
            && let Some(other) = self.elements.iter().find(|e| e.conflicts_with(&element))
        {
            return Err(overlap_error(other));
        }
        self.elements.push(element);
        Ok(())
    }

    /// Toggle the overlap check for subsequent insertions.
    pub fn set_allow_overlaps(&mut self, allow: bool) {
        self.allow_overlaps = allow;
    }

    /// Whether overlaps are currently accepted.
    pub fn allows_overlaps(&self) -> bool {
        self.allow_overlaps
    }

    /// Elements by ascending offset (ties keep insertion order) and mark the spine closed.
    pub fn sort_and_validate(&mut self) -> Vec<&Element> {
        self.close();
        self.ordered()
    }

    pub(crate) fn close(&mut self) {
        self.closed = true;
    }

    /// Elements by ascending offset without closing the spine.
    pub fn ordered(&self) -> Vec<&Element> {
        let mut out: Vec<&Element> = self.elements.iter().collect();
        out.sort_by_key(|e| e.offset);
        out
    }

    /// Whether [`Spine::sort_and_validate`] has run or the spine came out of a builder.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Elements in insertion order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Mutable access to the elements in insertion order.
    pub fn elements_mut(&mut self) -> &mut [Element] {
        &mut self.elements
    }

    /// Number of top-level elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Return `true` when the spine holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements in `lane` (0 and absent are the same lane).
    pub fn elements_by_lane(&self, lane: i32) -> Vec<&Element> {
        self.elements
            .iter()
            .filter(|e| e.lane_index() == lane)
            .collect()
    }

    /// Elements of `kind`.
    pub fn elements_by_type(&self, kind: ElementKind) -> Vec<&Element> {
        self.elements.iter().filter(|e| e.kind == kind).collect()
    }

    /// Elements whose interval intersects `[from, to)`.
    pub fn elements_in_range(&self, from: Time, to: Time) -> Vec<&Element> {
        self.elements
            .iter()
            .filter(|e| e.intersects(from, to))
            .collect()
    }

    /// Sorted distinct lanes in use.
    pub fn lanes(&self) -> Vec<i32> {
        let mut lanes: Vec<i32> = self.elements.iter().map(Element::lane_index).collect();
        lanes.sort_unstable();
        lanes.dedup();
        lanes
    }

    /// End of the primary storyline.
    pub fn primary_end(&self) -> Time {
        self.elements
            .iter()
            .filter(|e| e.lane_index() == 0)
            .map(Element::end)
            .max()
            .unwrap_or(Time::ZERO)
    }

    /// End of the last element in any lane.
    pub fn end(&self) -> Time {
        self.elements
            .iter()
            .map(Element::end)
            .max()
            .unwrap_or(Time::ZERO)
    }

    /// Latest primary-lane element, the usual anchor for connected items.
    pub fn last_primary_mut(&mut self) -> Option<&mut Element> {
        self.elements
            .iter_mut()
            .filter(|e| e.lane_index() == 0)
            .max_by_key(|e| e.offset)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/spine.rs"]
mod tests;
