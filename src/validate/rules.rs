//! Per-parameter keyframe rules.

use smallvec::SmallVec;

use crate::timeline::keyframe::{Keyframe, Param};

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum ValueShape {
    /// Whitespace-separated floats; count must be one of `counts`, each within `range`.
    Floats {
        counts: &'static [usize],
        range: Option<(f64, f64)>,
    },
    /// Non-negative linear gain, or `<x>dB` with `x` in `[-60, 20]`.
    Gain,
    /// No value check.
    Any,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct KeyframeRule {
    pub(crate) interp: bool,
    pub(crate) curve: bool,
    pub(crate) shape: ValueShape,
}

const fn floats(counts: &'static [usize], range: Option<(f64, f64)>) -> ValueShape {
    ValueShape::Floats { counts, range }
}

pub(crate) fn rule_for(param: &Param) -> KeyframeRule {
    let (interp, curve, shape) = match param {
        Param::Position => (false, false, floats(&[2], None)),
        Param::Scale => (false, true, floats(&[2], Some((0.0, 100.0)))),
        Param::Rotation => (false, true, floats(&[1], None)),
        Param::Anchor => (false, true, floats(&[2], None)),
        Param::Opacity => (true, true, floats(&[1], Some((0.0, 1.0)))),
        Param::Volume => (true, true, ValueShape::Gain),
        Param::Color => (true, true, floats(&[3, 4], Some((0.0, 1.0)))),
        Param::Crop => (false, true, floats(&[2], None)),
        Param::Other(_) => (true, true, ValueShape::Any),
    };
    KeyframeRule {
        interp,
        curve,
        shape,
    }
}

const DB_RANGE: (f64, f64) = (-60.0, 20.0);

fn parse_floats(value: &str) -> Option<SmallVec<[f64; 4]>> {
    value
        .split_whitespace()
        .map(|t| t.parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect()
}

pub(crate) fn check_value(shape: ValueShape, value: &str) -> Result<(), String> {
    match shape {
        ValueShape::Any => Ok(()),
        ValueShape::Gain => {
            let v = value.trim();
            if let Some(db) = v.strip_suffix("dB") {
                let x = db
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|x| x.is_finite())
                    .ok_or_else(|| format!("'{value}' is not a valid dB value"))?;
                if x < DB_RANGE.0 || x > DB_RANGE.1 {
                    return Err(format!(
                        "'{value}' is outside [{}, {}] dB",
                        DB_RANGE.0, DB_RANGE.1
                    ));
                }
                return Ok(());
            }
            let x = v
                .parse::<f64>()
                .ok()
                .filter(|x| x.is_finite())
                .ok_or_else(|| format!("'{value}' is not a number or dB value"))?;
            if x < 0.0 {
                return Err(format!("'{value}' must be >= 0"));
            }
            Ok(())
        }
        ValueShape::Floats { counts, range } => {
            let nums =
                parse_floats(value).ok_or_else(|| format!("'{value}' is not a list of numbers"))?;
            if !counts.contains(&nums.len()) {
                let expected = counts
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" or ");
                return Err(format!(
                    "'{value}' has {} component(s), expected {expected}",
                    nums.len()
                ));
            }
            if let Some((lo, hi)) = range
                && let Some(bad) = nums.iter().find(|&&n| n < lo || n > hi)
            {
                return Err(format!("component {bad} in '{value}' is outside [{lo}, {hi}]"));
            }
            Ok(())
        }
    }
}

/// Violations of a single keyframe against its parameter's rule.
pub(crate) fn check_keyframe(param: &Param, keyframe: &Keyframe) -> Vec<String> {
    let rule = rule_for(param);
    let mut out = Vec::new();
    if let Some(interp) = keyframe.interp
        && !rule.interp
    {
        out.push(format!(
            "'{param}' keyframes do not accept interp (got \"{}\")",
            interp.as_str()
        ));
    }
    if let Some(curve) = keyframe.curve
        && !rule.curve
    {
        out.push(format!(
            "'{param}' keyframes do not accept curve (got \"{}\")",
            curve.as_str()
        ));
    }
    if let Err(msg) = check_value(rule.shape, &keyframe.value) {
        out.push(format!("'{param}' value {msg}"));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/validate/rules.rs"]
mod tests;
