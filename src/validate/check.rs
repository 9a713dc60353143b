//! Whole-document structural and keyframe validation.
//!
//! Every check runs independently and appends to one report; nothing here fails or mutates.

use std::collections::HashSet;

use crate::document::model::{Document, Sequence};
use crate::foundation::time::{Time, is_frame_aligned};
use crate::resources::model::Resource;
use crate::resources::registry::Registry;
use crate::timeline::element::{Element, ElementKind};
use crate::timeline::keyframe::KeyframeAnimation;
use crate::validate::report::{FindingKind, PathElem, ValidationReport};
use crate::validate::rules::check_keyframe;

/// Effect identities the target editor does not ship; importing them fails silently.
pub const DEFAULT_DENYLIST: &[&str] = &[
    "FFGaussianBlurPro",
    "FFMotionBlurEffect",
    "FFColorGradeEffect",
    "FFGlowEffect",
    "FFCameraShake",
    "FFZoomTransition",
    "FFGlitchEffect",
    "FFVHSEffect",
    "com.apple.effects.glitch",
    "com.apple.effects.vhs",
    "FxPlug:00000000-0000-0000-0000-000000000000",
];

/// Configurable document validator.
#[derive(Clone, Debug)]
pub struct Validator {
    denied: Vec<String>,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            denied: DEFAULT_DENYLIST.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

impl Validator {
    /// Validator with an empty denylist.
    pub fn permissive() -> Self {
        Self { denied: Vec::new() }
    }

    /// Add an identity to the denylist.
    pub fn deny(mut self, identity: impl Into<String>) -> Self {
        self.denied.push(identity.into());
        self
    }

    fn is_denied(&self, identity: &str) -> bool {
        self.denied.iter().any(|d| d.eq_ignore_ascii_case(identity))
    }

    /// Validate `doc` and return every finding.
    #[tracing::instrument(skip_all, fields(resources = doc.registry.len()))]
    pub fn validate(&self, doc: &Document) -> ValidationReport {
        let mut report = ValidationReport::default();
        let mut path = vec![PathElem::Field("resources")];
        self.check_resources(&doc.registry, &mut path, &mut report);

        for (ei, pi, seq) in doc.sequences() {
            let mut path = vec![
                PathElem::Field("library"),
                PathElem::Field("events"),
                PathElem::Index(ei),
                PathElem::Field("projects"),
                PathElem::Index(pi),
                PathElem::Field("sequence"),
            ];
            check_sequence(seq, &doc.registry, &mut path, &mut report);
        }

        tracing::debug!(findings = report.len(), "document validated");
        report
    }

    fn check_resources(
        &self,
        registry: &Registry,
        path: &mut Vec<PathElem>,
        report: &mut ValidationReport,
    ) {
        let mut seen = HashSet::new();
        for (i, resource) in registry.resources().iter().enumerate() {
            path.push(PathElem::Index(i));
            let id = resource.id();
            if !seen.insert(id) {
                report.push(
                    FindingKind::DuplicateId,
                    path,
                    format!("{} id {id} is defined more than once", resource.tag()),
                );
            }

            match resource {
                Resource::Asset(asset) => {
                    if let Some(format) = asset.format_id
                        && registry.get(format).and_then(Resource::as_format).is_none()
                    {
                        report.push(
                            FindingKind::DanglingReference,
                            path,
                            format!("asset {id} references missing format {format}"),
                        );
                    }
                    check_time(asset.start, "start", path, report);
                    check_time(asset.duration, "duration", path, report);
                }
                Resource::Format(format) => {
                    if let Some(fd) = format.frame_duration {
                        check_time(fd, "frameDuration", path, report);
                    }
                }
                Resource::Effect(effect) => {
                    for identity in [&effect.uid, &effect.name] {
                        if self.is_denied(identity) {
                            report.push(
                                FindingKind::DisallowedResourceIdentity,
                                path,
                                format!(
                                    "effect {id} uses '{identity}', which is not a built-in effect"
                                ),
                            );
                        }
                    }
                }
                Resource::Media(media) => {
                    path.push(PathElem::Field("sequence"));
                    check_sequence(&media.sequence, registry, path, report);
                    path.pop();
                }
            }
            path.pop();
        }
    }
}

/// Validate `doc` with the default denylist.
pub fn validate_document(doc: &Document) -> ValidationReport {
    Validator::default().validate(doc)
}

fn check_time(
    t: Time,
    field: &'static str,
    path: &mut Vec<PathElem>,
    report: &mut ValidationReport,
) {
    check_timing_text(&t.to_string(), field, path, report);
}

/// Alignment check on emitted timing text.
pub(crate) fn check_timing_text(
    text: &str,
    field: &'static str,
    path: &mut Vec<PathElem>,
    report: &mut ValidationReport,
) {
    if !is_frame_aligned(text) {
        path.push(PathElem::Field(field));
        report.push(
            FindingKind::FrameAlignmentViolation,
            path,
            format!("'{text}' is not a whole number of 1001/24000s frames"),
        );
        path.pop();
    }
}

fn check_sequence(
    seq: &Sequence,
    registry: &Registry,
    path: &mut Vec<PathElem>,
    report: &mut ValidationReport,
) {
    if registry.get(seq.format).and_then(Resource::as_format).is_none() {
        path.push(PathElem::Field("format"));
        report.push(
            FindingKind::DanglingReference,
            path,
            format!("sequence references missing format {}", seq.format),
        );
        path.pop();
    }
    check_time(seq.tc_start, "tcStart", path, report);
    check_time(seq.duration(), "duration", path, report);

    path.push(PathElem::Field("spine"));
    for (i, el) in seq.spine.ordered().into_iter().enumerate() {
        path.push(PathElem::Index(i));
        check_element(el, registry, path, report);
        path.pop();
    }
    path.pop();
}

fn check_element(
    el: &Element,
    registry: &Registry,
    path: &mut Vec<PathElem>,
    report: &mut ValidationReport,
) {
    check_time(el.offset, "offset", path, report);
    check_time(el.duration, "duration", path, report);
    if let Some(start) = el.start {
        check_time(start, "start", path, report);
    }

    if let Some(id) = el.resource {
        match registry.get(id) {
            None => report.push(
                FindingKind::DanglingReference,
                path,
                format!("{} references missing resource {id}", el.describe()),
            ),
            Some(Resource::Asset(asset)) if el.kind == ElementKind::AssetClip => {
                if el.format != asset.format_id {
                    report.push(
                        FindingKind::FormatMismatch,
                        path,
                        format!(
                            "{} carries format {} but asset {id} uses {}",
                            el.describe(),
                            display_opt(el.format),
                            display_opt(asset.format_id)
                        ),
                    );
                }
            }
            Some(_) => {}
        }
    }
    if let Some(format) = el.format
        && registry.get(format).and_then(Resource::as_format).is_none()
    {
        report.push(
            FindingKind::DanglingReference,
            path,
            format!("{} references missing format {format}", el.describe()),
        );
    }

    path.push(PathElem::Field("animations"));
    for (i, anim) in el.animations.iter().enumerate() {
        path.push(PathElem::Index(i));
        check_animation(anim, path, report);
        path.pop();
    }
    path.pop();

    path.push(PathElem::Field("filters"));
    for (i, filter) in el.filters.iter().enumerate() {
        path.push(PathElem::Index(i));
        if registry
            .get(filter.effect)
            .and_then(Resource::as_effect)
            .is_none()
        {
            report.push(
                FindingKind::DanglingReference,
                path,
                format!("filter '{}' references missing effect {}", filter.name, filter.effect),
            );
        }
        path.push(PathElem::Field("animations"));
        for (j, anim) in filter.animations.iter().enumerate() {
            path.push(PathElem::Index(j));
            check_animation(anim, path, report);
            path.pop();
        }
        path.pop();
        path.pop();
    }
    path.pop();

    path.push(PathElem::Field("children"));
    for (i, child) in el.ordered_children().into_iter().enumerate() {
        path.push(PathElem::Index(i));
        check_element(child, registry, path, report);
        path.pop();
    }
    path.pop();
}

fn check_animation(
    anim: &KeyframeAnimation,
    path: &mut Vec<PathElem>,
    report: &mut ValidationReport,
) {
    path.push(PathElem::Field("keyframes"));
    for (i, kf) in anim.keyframes.iter().enumerate() {
        path.push(PathElem::Index(i));
        for msg in check_keyframe(&anim.param, kf) {
            report.push(FindingKind::KeyframeAttributeViolation, path, msg);
        }
        check_time(kf.time, "time", path, report);
        path.pop();
    }
    path.pop();

    if let Some(i) = anim
        .keyframes
        .windows(2)
        .position(|w| w[0].time >= w[1].time)
    {
        report.push(
            FindingKind::KeyframeOrderViolation,
            path,
            format!(
                "'{}' keyframe {} at {} does not come after keyframe {} at {}",
                anim.param,
                i + 1,
                anim.keyframes[i + 1].time,
                i,
                anim.keyframes[i].time
            ),
        );
    }
}

fn display_opt<T: std::fmt::Display>(v: Option<T>) -> String {
    v.map_or_else(|| "none".to_owned(), |v| v.to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/validate/check.rs"]
mod tests;
