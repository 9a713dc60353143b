use super::*;
use crate::foundation::time::Time;
use crate::timeline::keyframe::{Curve, Interp};

fn kf(value: &str) -> Keyframe {
    Keyframe::new(Time::ZERO, value)
}

#[test]
fn position_rejects_curve_and_interp() {
    let v = check_keyframe(&Param::Position, &kf("0 0").curve(Curve::Smooth));
    assert_eq!(v.len(), 1);
    assert!(v[0].contains("curve"), "{v:?}");
    let v = check_keyframe(&Param::Position, &kf("0 0").interp(Interp::Linear));
    assert_eq!(v.len(), 1);
    assert!(check_keyframe(&Param::Position, &kf("-10.5 20")).is_empty());
}

#[test]
fn scale_allows_curve_but_not_interp() {
    assert!(check_keyframe(&Param::Scale, &kf("50 50").curve(Curve::Hold)).is_empty());
    assert_eq!(
        check_keyframe(&Param::Scale, &kf("50 50").interp(Interp::EaseIn)).len(),
        1
    );
    assert_eq!(check_keyframe(&Param::Scale, &kf("150 50")).len(), 1);
    assert_eq!(check_keyframe(&Param::Scale, &kf("-1 50")).len(), 1);
    assert_eq!(check_keyframe(&Param::Scale, &kf("50")).len(), 1);
}

#[test]
fn opacity_range_is_unit_interval() {
    assert!(
        check_keyframe(
            &Param::Opacity,
            &kf("0.5").interp(Interp::EaseInOut).curve(Curve::Smooth)
        )
        .is_empty()
    );
    assert_eq!(check_keyframe(&Param::Opacity, &kf("1.5")).len(), 1);
    assert_eq!(check_keyframe(&Param::Opacity, &kf("0.2 0.3")).len(), 1);
}

#[test]
fn volume_accepts_gain_or_decibels() {
    for ok in ["0", "1.25", "-6dB", "20dB", "-60dB", "0 dB"] {
        assert!(check_keyframe(&Param::Volume, &kf(ok)).is_empty(), "{ok}");
    }
    for bad in ["-0.5", "21dB", "-61dB", "loud", "dB", ""] {
        assert_eq!(check_keyframe(&Param::Volume, &kf(bad)).len(), 1, "{bad}");
    }
}

#[test]
fn color_needs_three_or_four_unit_components() {
    assert!(check_keyframe(&Param::Color, &kf("1 0 0")).is_empty());
    assert!(check_keyframe(&Param::Color, &kf("1 0 0 0.5")).is_empty());
    assert_eq!(check_keyframe(&Param::Color, &kf("1 0")).len(), 1);
    assert_eq!(check_keyframe(&Param::Color, &kf("1 0 2")).len(), 1);
}

#[test]
fn rotation_anchor_crop_shapes() {
    assert!(check_keyframe(&Param::Rotation, &kf("-45")).is_empty());
    assert_eq!(check_keyframe(&Param::Rotation, &kf("1 2")).len(), 1);
    assert!(check_keyframe(&Param::Anchor, &kf("0 0").curve(Curve::Linear)).is_empty());
    assert!(check_keyframe(&Param::Crop, &kf("10 10")).is_empty());
    assert_eq!(
        check_keyframe(&Param::Crop, &kf("10 10").interp(Interp::Linear)).len(),
        1
    );
}

#[test]
fn unknown_params_are_permissive() {
    let p = Param::from_name("amount");
    assert_eq!(p, Param::Other("amount".to_owned()));
    let k = kf("whatever").interp(Interp::EaseOut).curve(Curve::Smooth);
    assert!(check_keyframe(&p, &k).is_empty());
}

#[test]
fn param_names_round_trip_case_insensitively() {
    assert_eq!(Param::from_name("Position"), Param::Position);
    assert_eq!(Param::from_name("VOLUME").name(), "volume");
    assert_eq!(Param::from_name("blurAmount").name(), "blurAmount");
}

#[test]
fn value_errors_report_each_problem() {
    let v = check_keyframe(
        &Param::Position,
        &kf("1").interp(Interp::Linear).curve(Curve::Hold),
    );
    assert_eq!(v.len(), 3, "{v:?}");
}
