use super::*;

#[test]
fn defaults_are_valid() {
    let opts = BuildOpts::default();
    opts.validate().unwrap();
    assert_eq!(opts.version, "1.11");
    assert_eq!(opts.image_duration(), Time::from_seconds(5.0));
    assert!(opts.strict);
    assert_eq!(opts.audio_lane, -1);
}

#[test]
fn partial_json_keeps_defaults() {
    let opts = BuildOpts::from_json_str(r#"{"project_name": "Trailer", "strict": false}"#).unwrap();
    assert_eq!(opts.project_name, "Trailer");
    assert!(!opts.strict);
    assert_eq!(opts.event_name, BuildOpts::default().event_name);
}

#[test]
fn unknown_keys_are_rejected() {
    let err = BuildOpts::from_json_str(r#"{"projct_name": "x"}"#).unwrap_err();
    assert_eq!(err.code(), "VALIDATION");
}

#[test]
fn nonsense_values_are_rejected() {
    for json in [
        r#"{"image_duration_sec": 0}"#,
        r#"{"title_duration_sec": -2}"#,
        r#"{"version": " "}"#,
        r#"{"audio_lane": 0}"#,
    ] {
        assert!(BuildOpts::from_json_str(json).is_err(), "{json}");
    }
}

#[test]
fn loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("opts.json");
    std::fs::write(&path, r#"{"title_text": "Hello"}"#).unwrap();
    let opts = BuildOpts::from_json_file(&path).unwrap();
    assert_eq!(opts.title_text.as_deref(), Some("Hello"));

    let err = BuildOpts::from_json_file(&dir.path().join("missing.json")).unwrap_err();
    assert_eq!(err.code(), "IO");
}
