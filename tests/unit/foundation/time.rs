use super::*;

#[test]
fn from_seconds_snaps_to_nearest_tick() {
    assert_eq!(from_seconds(1.0), "24024/24000s");
    assert_eq!(from_seconds(10.0), "240240/24000s");
    assert_eq!(from_seconds(0.0), "0s");
}

#[test]
fn from_seconds_rejects_garbage_as_zero() {
    assert_eq!(Time::from_seconds(f64::NAN), Time::ZERO);
    assert_eq!(Time::from_seconds(-3.0), Time::ZERO);
    assert_eq!(Time::from_seconds(f64::INFINITY), Time::ZERO);
}

#[test]
fn parse_accepts_zero_and_canonical() {
    assert_eq!(parse("0s").unwrap(), 0);
    assert_eq!(parse("24024/24000s").unwrap(), 24024);
    assert_eq!(Time::parse("240240/24000s").unwrap().ticks(), 240);
}

#[test]
fn parse_normalizes_foreign_rationals() {
    // 1001/30000s is 0.8 ticks; rounds to one tick.
    assert_eq!(parse("1001/30000s").unwrap(), 1001);
    // 5 seconds over a different denominator.
    assert_eq!(parse("5/1s").unwrap(), 120 * 1001);
    assert_eq!(parse("100/1s").unwrap(), Time::from_seconds(100.0).numerator());
}

#[test]
fn parse_rejects_malformed_text() {
    for text in ["", "s", "10", "10s", "1/0s", "a/24000s", "1/24000", "-1001/24000s", "1 /2s"] {
        let err = Time::parse(text).unwrap_err();
        assert!(
            matches!(err, FcpxError::MalformedDuration(_)),
            "{text}: {err}"
        );
    }
}

#[test]
fn add_sums_in_tick_space() {
    assert_eq!(add("24024/24000s", "24024/24000s").unwrap(), "48048/24000s");
    assert_eq!(add("0s", "0s").unwrap(), "0s");
    assert!(add("0s", "junk").is_err());
}

#[test]
fn frame_alignment_law() {
    assert!(is_frame_aligned("0s"));
    assert!(is_frame_aligned("0/24000s"));
    assert!(is_frame_aligned("1001/24000s"));
    assert!(is_frame_aligned("240240/24000s"));
    assert!(!is_frame_aligned("1000/24000s"));
    assert!(!is_frame_aligned("1001/30000s"));
    assert!(!is_frame_aligned("5s"));
}

#[test]
fn parse_aligned_distinguishes_off_grid_from_malformed() {
    assert_eq!(Time::parse_aligned("2002/24000s").unwrap().ticks(), 2);
    assert!(matches!(
        Time::parse_aligned("1000/24000s"),
        Err(FcpxError::FrameAlignmentViolation(_))
    ));
    assert!(matches!(
        Time::parse_aligned("nope"),
        Err(FcpxError::MalformedDuration(_))
    ));
}

#[test]
fn arithmetic_stays_in_ticks() {
    let a = Time::from_ticks(10);
    let b = Time::from_ticks(4);
    assert_eq!((a + b).ticks(), 14);
    assert_eq!(a.checked_sub(b), Some(Time::from_ticks(6)));
    assert_eq!(b.checked_sub(a), None);
    assert_eq!(b.saturating_sub(a), Time::ZERO);
}

#[test]
fn serde_uses_canonical_text() {
    let t = Time::from_ticks(24);
    let json = serde_json::to_string(&t).unwrap();
    assert_eq!(json, "\"24024/24000s\"");
    let back: Time = serde_json::from_str(&json).unwrap();
    assert_eq!(back, t);
    assert!(serde_json::from_str::<Time>("\"12\"").is_err());
}
