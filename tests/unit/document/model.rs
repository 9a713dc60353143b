use super::*;
use crate::foundation::error::FcpxError;
use crate::resources::model::Resource;
use crate::timeline::element::Element;

#[test]
fn with_project_creates_format_and_tree() {
    let doc = Document::with_project("Event", "Project").unwrap();
    assert_eq!(doc.version, DEFAULT_VERSION);
    assert_eq!(doc.registry.len(), 1);
    let seq = doc.primary_sequence().unwrap();
    let format = doc.registry.get(seq.format).and_then(Resource::as_format).unwrap();
    assert_eq!((format.width, format.height), (1920, 1080));
    assert_eq!(seq.tc_format, "NDF");
    assert_eq!(seq.duration(), Time::ZERO);
}

#[test]
fn empty_document_has_no_sequences() {
    let doc = Document::default();
    assert!(doc.primary_sequence().is_none());
    assert_eq!(doc.sequences().count(), 0);
    assert!(doc.validate().is_clean());
}

#[test]
fn sequences_report_indices() {
    let mut doc = Document::with_project("A", "one").unwrap();
    let format = doc.primary_sequence().unwrap().format;
    doc.library.events.push(Event {
        name: "B".to_owned(),
        projects: vec![
            Project {
                name: "two".to_owned(),
                sequence: Sequence::new(format),
            },
            Project {
                name: "three".to_owned(),
                sequence: Sequence::new(format),
            },
        ],
    });
    let idx: Vec<_> = doc.sequences().map(|(e, p, _)| (e, p)).collect();
    assert_eq!(idx, vec![(0, 0), (1, 0), (1, 1)]);
}

#[test]
fn sequence_duration_follows_primary_storyline() {
    let mut doc = Document::with_project("E", "P").unwrap();
    let seq = doc.primary_sequence_mut().unwrap();
    seq.spine
        .add_element(Element::gap(Time::ZERO, Time::from_seconds(3.0)))
        .unwrap();
    seq.spine
        .add_element(
            Element::gap(Time::ZERO, Time::from_seconds(30.0)).with_lane(2),
        )
        .unwrap();
    assert_eq!(seq.duration(), Time::from_seconds(3.0));
}

#[test]
fn strict_output_refuses_invalid_documents() {
    let mut doc = Document::with_project("E", "P").unwrap();
    assert!(doc.to_fcpxml_strict().is_ok());

    let format = doc.primary_sequence().unwrap().format;
    doc.primary_sequence_mut()
        .unwrap()
        .spine
        .add_element(Element::video(format, "not a picture", Time::ZERO, Time::from_seconds(1.0)))
        .unwrap();
    assert!(doc.to_fcpxml_strict().is_ok());

    doc.primary_sequence_mut().unwrap().format = crate::foundation::ids::ResourceId(40);
    let err = doc.to_fcpxml_strict().unwrap_err();
    assert!(
        matches!(err, FcpxError::ValidationFailed { count: 1, .. }),
        "{err}"
    );
    // Lenient output still works.
    assert!(doc.to_fcpxml().contains(r#"format="r40""#));
}
