//! Frame-aligned time on the 1001/24000 s editing grid.
//!
//! All arithmetic happens in tick space. Text is produced and parsed only at the document
//! boundary, so a [`Time`] can never drift off the grid.

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use crate::foundation::error::{FcpxError, FcpxResult};

/// Denominator of every emitted duration.
pub const TIMEBASE: u64 = 24_000;

/// Numerator width of one tick over [`TIMEBASE`].
pub const TICK_WIDTH: u64 = 1_001;

/// Non-negative time value counted in ticks of `1001/24000` seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(u64);

impl Time {
    /// `0s`.
    pub const ZERO: Self = Self(0);

    /// Build from a raw tick count.
    pub const fn from_ticks(ticks: u64) -> Self {
        Self(ticks)
    }

    /// Raw tick count.
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Numerator of the canonical `n/24000s` form.
    pub fn numerator(self) -> u128 {
        u128::from(self.0) * u128::from(TICK_WIDTH)
    }

    /// Return `true` for `0s`.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Snap seconds to the nearest tick.
    ///
    /// Both neighbouring ticks are reconstructed back to seconds and the closer one wins; ties
    /// resolve to the lower tick. Non-finite and negative inputs map to zero.
    pub fn from_seconds(secs: f64) -> Self {
        if !secs.is_finite() || secs <= 0.0 {
            return Self::ZERO;
        }
        let tick_secs = TICK_WIDTH as f64 / TIMEBASE as f64;
        let exact = secs / tick_secs;
        let floor = exact.floor();
        let ceil = exact.ceil();
        let floor_err = (secs - floor * tick_secs).abs();
        let ceil_err = (ceil * tick_secs - secs).abs();
        let ticks = if ceil_err < floor_err { ceil } else { floor };
        Self(ticks as u64)
    }

    /// Seconds as floating point, for display and probing only.
    pub fn seconds(self) -> f64 {
        self.0 as f64 * TICK_WIDTH as f64 / TIMEBASE as f64
    }

    /// Parse `0s` or `<num>/<den>s`, rounding any rational onto the tick grid.
    pub fn parse(text: &str) -> FcpxResult<Self> {
        if text == "0s" {
            return Ok(Self::ZERO);
        }
        let (num, den) =
            split_rational(text).ok_or_else(|| FcpxError::MalformedDuration(text.to_owned()))?;
        if den == 0 {
            return Err(FcpxError::MalformedDuration(text.to_owned()));
        }
        let q = u128::from(num) * u128::from(TIMEBASE);
        let d = u128::from(den) * u128::from(TICK_WIDTH);
        let ticks = (2 * q + d) / (2 * d);
        u64::try_from(ticks)
            .map(Self)
            .map_err(|_| FcpxError::MalformedDuration(text.to_owned()))
    }

    /// Parse text that must already sit on the grid.
    pub fn parse_aligned(text: &str) -> FcpxResult<Self> {
        if is_frame_aligned(text) {
            return Self::parse(text);
        }
        Self::parse(text)?;
        Err(FcpxError::FrameAlignmentViolation(text.to_owned()))
    }

    /// `self + rhs`, or `None` on overflow.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// `self - rhs`, or `None` when `rhs > self`.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// `self - rhs` clamped at zero.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Add for Time {
    type Output = Time;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("0s");
        }
        write!(f, "{}/{TIMEBASE}s", self.numerator())
    }
}

impl FromStr for Time {
    type Err = FcpxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for Time {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Time {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

fn split_rational(text: &str) -> Option<(u64, u64)> {
    let body = text.strip_suffix('s')?;
    let (num, den) = body.split_once('/')?;
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(num) || !digits(den) {
        return None;
    }
    Some((num.parse().ok()?, den.parse().ok()?))
}

/// Canonical duration text for `secs`.
pub fn from_seconds(secs: f64) -> String {
    Time::from_seconds(secs).to_string()
}

/// Parse duration text and return the numerator over 24000 (`ticks * 1001`).
pub fn parse(text: &str) -> FcpxResult<u128> {
    Time::parse(text).map(Time::numerator)
}

/// Sum two duration strings in tick space.
pub fn add(a: &str, b: &str) -> FcpxResult<String> {
    Ok((Time::parse(a)? + Time::parse(b)?).to_string())
}

/// `true` iff `text` is `0s` or `n/24000s` with `n` divisible by 1001.
pub fn is_frame_aligned(text: &str) -> bool {
    if text == "0s" {
        return true;
    }
    match split_rational(text) {
        Some((num, den)) => den == TIMEBASE && num % TICK_WIDTH == 0,
        None => false,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/time.rs"]
mod tests;
