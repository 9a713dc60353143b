use super::*;
use crate::foundation::ids::ResourceId;
use crate::foundation::time::Time;
use crate::resources::model::{AudioInfo, MediaKind};
use crate::resources::registry::Transaction;
use crate::timeline::keyframe::{Curve, Filter, Interp, Keyframe};

fn secs(s: f64) -> Time {
    Time::from_seconds(s)
}

fn sample() -> Document {
    let mut doc = Document::with_project("My Event", "Cut & Paste").unwrap();
    let format = doc.primary_sequence().unwrap().format;
    let (asset, title, blur) = {
        let mut tx = Transaction::new(&mut doc.registry);
        let ids = tx.reserve_ids(3).unwrap();
        let mut asset = Asset::new(ids[0], "clip", "/m/clip one.mov", MediaKind::Video, secs(10.0));
        asset.format_id = Some(format);
        asset.audio = Some(AudioInfo::default());
        asset.bookmark = Some("Ym9vaw==".to_owned());
        tx.create_asset(asset).unwrap();
        tx.create_effect(Effect {
            id: ids[1],
            name: "Basic Title".to_owned(),
            uid: "basic-title".to_owned(),
        })
        .unwrap();
        tx.create_effect(Effect {
            id: ids[2],
            name: "Gaussian Blur".to_owned(),
            uid: "FFGaussianBlur".to_owned(),
        })
        .unwrap();
        tx.commit().unwrap();
        (ids[0], ids[1], ids[2])
    };

    let spine = &mut doc.primary_sequence_mut().unwrap().spine;
    spine
        .add_element(Element::gap(secs(10.0), secs(2.0)))
        .unwrap();
    let mut clip = Element::asset_clip(asset, "clip", Time::ZERO, secs(10.0))
        .with_format(Some(format))
        .with_animation(
            KeyframeAnimation::new(Param::Opacity)
                .key(Keyframe::new(Time::ZERO, "0").interp(Interp::EaseIn))
                .key(Keyframe::new(secs(1.0), "1").curve(Curve::Smooth)),
        )
        .with_animation(
            KeyframeAnimation::new(Param::Position).key(Keyframe::new(Time::ZERO, "0 0")),
        )
        .with_filter(Filter::new(blur, "Gaussian Blur"));
    clip.add_child(
        Element::title(title, TitleText::plain("Hello <world>"), secs(1.0), secs(3.0)).with_lane(1),
    )
    .unwrap();
    spine.add_element(clip).unwrap();
    doc
}

#[test]
fn header_and_root() {
    let xml = write_document(&sample());
    let mut lines = xml.lines();
    assert_eq!(lines.next(), Some(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert_eq!(lines.next(), Some("<!DOCTYPE fcpxml>"));
    assert_eq!(lines.next(), Some(r#"<fcpxml version="1.11">"#));
    assert!(xml.ends_with("</fcpxml>\n"));
}

#[test]
fn resources_carry_issued_ids() {
    let xml = write_document(&sample());
    assert!(xml.contains(
        r#"<format id="r1" name="FFVideoFormat1080p2398" frameDuration="1001/24000s" width="1920" height="1080""#
    ));
    assert!(xml.contains(r#"<asset id="r2" name="clip" start="0s" duration="240240/24000s""#));
    assert!(xml.contains(r#"audioChannels="2" audioRate="48000""#));
    assert!(xml.contains(r#"<media-rep kind="original-media" src="file:///m/clip one.mov">"#));
    assert!(xml.contains("<bookmark>Ym9vaw==</bookmark>"));
    assert!(xml.contains(r#"<effect id="r3" name="Basic Title" uid="basic-title"/>"#));
}

#[test]
fn library_tree_and_sequence_attributes() {
    let xml = write_document(&sample());
    assert!(xml.contains(r#"<event name="My Event">"#));
    assert!(xml.contains(r#"<project name="Cut &amp; Paste">"#));
    assert!(xml.contains(
        r#"<sequence format="r1" duration="288288/24000s" tcStart="0s" tcFormat="NDF" audioLayout="stereo" audioRate="48k">"#
    ));
}

#[test]
fn spine_is_written_in_time_order() {
    let xml = write_document(&sample());
    let clip = xml.find("<asset-clip ").unwrap();
    let gap = xml.find("<gap ").unwrap();
    assert!(clip < gap);
    assert!(xml.contains(
        r#"<asset-clip ref="r2" offset="0s" name="clip" duration="240240/24000s" format="r1">"#
    ));
    assert!(xml.contains(r#"<gap offset="240240/24000s" name="Gap" duration="48048/24000s"/>"#));
}

#[test]
fn animations_go_into_adjustment_groups() {
    let xml = write_document(&sample());
    let transform = xml.find("<adjust-transform>").unwrap();
    let blend = xml.find("<adjust-blend>").unwrap();
    let title = xml.find("<title ").unwrap();
    let filter = xml.find("<filter-video ").unwrap();
    assert!(transform < blend && blend < title && title < filter);
    assert!(xml.contains(r#"<param name="opacity">"#));
    assert!(xml.contains(r#"<keyframe time="0s" value="0" interp="easeIn"/>"#));
    assert!(xml.contains(r#"<keyframe time="24024/24000s" value="1" curve="smooth"/>"#));
    assert!(xml.contains(r#"<filter-video ref="r4" name="Gaussian Blur"/>"#));
}

#[test]
fn titles_get_numbered_text_styles() {
    let xml = write_document(&sample());
    assert!(xml.contains(r#"<title ref="r3" offset="24024/24000s" name="Hello &lt;world&gt;" duration="72072/24000s" lane="1">"#));
    assert!(xml.contains(r#"<text-style ref="ts1">Hello &lt;world&gt;</text-style>"#));
    assert!(xml.contains(r#"<text-style-def id="ts1">"#));
    assert!(xml.contains(r#"fontSize="63" fontColor="1 1 1 1""#));
    assert!(!xml.contains("ts2"));
}

#[test]
fn generators_are_written_as_video() {
    let mut doc = Document::with_project("E", "P").unwrap();
    doc.primary_sequence_mut()
        .unwrap()
        .spine
        .add_element(Element::generator(ResourceId(7), "Solid", Time::ZERO, secs(1.0)))
        .unwrap();
    let xml = write_document(&doc);
    assert!(xml.contains(r#"<video ref="r7" offset="0s" name="Solid" duration="24024/24000s"/>"#));
}

#[test]
fn empty_document_still_has_resources_and_library() {
    let xml = write_document(&Document::new());
    assert!(xml.contains("<resources>\n    </resources>"));
    assert!(xml.contains("<library>\n    </library>"));
}
