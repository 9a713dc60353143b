//! Document tree to FCPXML text.
//!
//! Spine elements are written in chronological order; intrinsic animations are grouped into
//! the `adjust-*` element the editor expects for their parameter.

use crate::document::model::{Document, Sequence};
use crate::resources::model::{Asset, Effect, Format, Media, Resource};
use crate::serialize::xml::{Attrs, XmlWriter};
use crate::timeline::element::{Element, ElementKind, TitleText};
use crate::timeline::keyframe::{KeyframeAnimation, Param};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const DOCTYPE: &str = "<!DOCTYPE fcpxml>";

/// Serialize `doc` without validating it.
#[tracing::instrument(skip_all, fields(version = %doc.version, resources = doc.registry.len()))]
pub(crate) fn write_document(doc: &Document) -> String {
    let mut em = Emitter {
        w: XmlWriter::new(),
        text_styles: 0,
    };
    em.w.raw_line(XML_DECLARATION);
    em.w.raw_line(DOCTYPE);
    em.w.open("fcpxml", Attrs::new().set("version", &doc.version));

    em.w.open("resources", Attrs::new());
    for resource in doc.registry.resources() {
        em.resource(resource);
    }
    em.w.close();

    em.w.open(
        "library",
        Attrs::new().opt("location", doc.library.location.as_deref()),
    );
    for event in &doc.library.events {
        em.w.open("event", Attrs::new().set("name", &event.name));
        for project in &event.projects {
            em.w.open("project", Attrs::new().set("name", &project.name));
            em.sequence(&project.sequence);
            em.w.close();
        }
        em.w.close();
    }
    em.w.close();

    let out = em.w.finish();
    tracing::debug!(bytes = out.len(), "document serialized");
    out
}

struct Emitter {
    w: XmlWriter,
    text_styles: u32,
}

impl Emitter {
    fn resource(&mut self, resource: &Resource) {
        match resource {
            Resource::Format(f) => self.format(f),
            Resource::Asset(a) => self.asset(a),
            Resource::Effect(e) => self.effect(e),
            Resource::Media(m) => self.media(m),
        }
    }

    fn format(&mut self, f: &Format) {
        self.w.empty(
            "format",
            Attrs::new()
                .set("id", f.id)
                .opt("name", f.name.as_deref())
                .opt("frameDuration", f.frame_duration)
                .set("width", f.width)
                .set("height", f.height)
                .set("colorSpace", &f.color_space),
        );
    }

    fn asset(&mut self, a: &Asset) {
        let mut attrs = Attrs::new()
            .set("id", a.id)
            .set("name", &a.name)
            .set("start", a.start)
            .set("duration", a.duration)
            .set("hasVideo", u8::from(a.has_video()))
            .opt("format", a.format_id);
        if a.has_video() {
            attrs = attrs.set("videoSources", 1);
        }
        attrs = attrs.set("hasAudio", u8::from(a.has_audio()));
        if let Some(audio) = &a.audio {
            attrs = attrs
                .set("audioSources", 1)
                .set("audioChannels", audio.channels)
                .set("audioRate", audio.rate);
        }
        self.w.open("asset", attrs);

        let rep = Attrs::new()
            .set("kind", "original-media")
            .set("src", a.src_url());
        match a.bookmark.as_deref().filter(|b| !b.is_empty()) {
            Some(bookmark) => {
                self.w.open("media-rep", rep);
                self.w.text("bookmark", Attrs::new(), bookmark);
                self.w.close();
            }
            None => self.w.empty("media-rep", rep),
        }
        self.w.close();
    }

    fn effect(&mut self, e: &Effect) {
        self.w.empty(
            "effect",
            Attrs::new()
                .set("id", e.id)
                .set("name", &e.name)
                .set("uid", &e.uid),
        );
    }

    fn media(&mut self, m: &Media) {
        self.w.open("media", Attrs::new().set("id", m.id).set("name", &m.name));
        self.sequence(&m.sequence);
        self.w.close();
    }

    fn sequence(&mut self, seq: &Sequence) {
        self.w.open(
            "sequence",
            Attrs::new()
                .set("format", seq.format)
                .set("duration", seq.duration())
                .set("tcStart", seq.tc_start)
                .set("tcFormat", &seq.tc_format)
                .set("audioLayout", &seq.audio_layout)
                .set("audioRate", &seq.audio_rate),
        );
        self.w.open("spine", Attrs::new());
        for el in seq.spine.ordered() {
            self.element(el);
        }
        self.w.close();
        self.w.close();
    }

    fn element(&mut self, el: &Element) {
        let lane = el.lane.filter(|&l| l != 0);
        let attrs = Attrs::new()
            .opt("ref", el.resource)
            .set("offset", el.offset)
            .set("name", &el.name)
            .opt("start", el.start)
            .set("duration", el.duration)
            .opt("lane", lane)
            .opt("format", el.format.filter(|_| el.kind == ElementKind::AssetClip));

        let bare = el.children.is_empty()
            && el.animations.is_empty()
            && el.filters.is_empty()
            && el.title.is_none();
        if bare {
            self.w.empty(el.kind.tag(), attrs);
            return;
        }
        self.w.open(el.kind.tag(), attrs);

        for anim in el.animations.iter().filter(|a| group_of(&a.param).is_none()) {
            self.animation(anim);
        }
        if let Some(title) = &el.title {
            self.title_text(title);
        }
        for group in GROUPS {
            let anims: Vec<_> = el
                .animations
                .iter()
                .filter(|a| group_of(&a.param) == Some(group))
                .collect();
            if anims.is_empty() {
                continue;
            }
            let attrs = match group {
                "adjust-crop" => Attrs::new().set("mode", "trim"),
                _ => Attrs::new(),
            };
            self.w.open(group, attrs);
            for anim in anims {
                self.animation(anim);
            }
            self.w.close();
        }

        for child in el.ordered_children() {
            self.element(child);
        }

        for filter in &el.filters {
            let attrs = Attrs::new()
                .set("ref", filter.effect)
                .set("name", &filter.name);
            if filter.animations.is_empty() {
                self.w.empty("filter-video", attrs);
                continue;
            }
            self.w.open("filter-video", attrs);
            for anim in &filter.animations {
                self.animation(anim);
            }
            self.w.close();
        }
        self.w.close();
    }

    fn title_text(&mut self, title: &TitleText) {
        self.text_styles += 1;
        let id = format!("ts{}", self.text_styles);
        self.w.open("text", Attrs::new());
        self.w.text("text-style", Attrs::new().set("ref", &id), &title.text);
        self.w.close();
        self.w.open("text-style-def", Attrs::new().set("id", &id));
        self.w.empty(
            "text-style",
            Attrs::new()
                .set("font", &title.font)
                .set("fontSize", title.font_size)
                .set("fontColor", &title.color),
        );
        self.w.close();
    }

    fn animation(&mut self, anim: &KeyframeAnimation) {
        self.w.open("param", Attrs::new().set("name", anim.param.name()));
        self.w.open("keyframeAnimation", Attrs::new());
        for kf in &anim.keyframes {
            self.w.empty(
                "keyframe",
                Attrs::new()
                    .set("time", kf.time)
                    .set("value", &kf.value)
                    .opt("interp", kf.interp.map(|i| i.as_str()))
                    .opt("curve", kf.curve.map(|c| c.as_str())),
            );
        }
        self.w.close();
        self.w.close();
    }
}

/// Adjustment groups in the order the editor's schema lists them.
const GROUPS: [&str; 4] = ["adjust-crop", "adjust-transform", "adjust-blend", "adjust-volume"];

fn group_of(param: &Param) -> Option<&'static str> {
    match param {
        Param::Position | Param::Scale | Param::Rotation | Param::Anchor => {
            Some("adjust-transform")
        }
        Param::Crop => Some("adjust-crop"),
        Param::Opacity => Some("adjust-blend"),
        Param::Volume => Some("adjust-volume"),
        Param::Color | Param::Other(_) => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/serialize/fcpxml.rs"]
mod tests;
