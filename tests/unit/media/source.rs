use super::*;

#[test]
fn existing_file_resolves_to_absolute_path() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("clip.mov");
    std::fs::write(&file, b"x").unwrap();
    let resolved = resolve_source(&file).unwrap();
    assert!(resolved.is_absolute());
    assert_eq!(resolved, std::fs::canonicalize(&file).unwrap());
}

#[test]
fn missing_file_is_source_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = resolve_source(dir.path().join("gone.mov")).unwrap_err();
    assert!(matches!(err, FcpxError::SourceNotFound(ref p) if p.ends_with("gone.mov")), "{err}");
}

#[test]
fn directories_are_not_sources() {
    let dir = tempfile::tempdir().unwrap();
    let err = resolve_source(dir.path()).unwrap_err();
    assert_eq!(err.code(), "SOURCE_NOT_FOUND");
}

#[test]
fn kinds_follow_extensions() {
    assert_eq!(media_kind_for(Path::new("a/still.PNG")), MediaKind::Image);
    assert_eq!(media_kind_for(Path::new("song.m4a")), MediaKind::Audio);
    assert_eq!(media_kind_for(Path::new("take.mov")), MediaKind::Video);
    assert_eq!(media_kind_for(Path::new("noext")), MediaKind::Video);
}
