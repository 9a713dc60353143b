use std::fmt;

use serde::Serialize;

use crate::foundation::ids::ResourceId;
use crate::foundation::time::Time;

/// Keyframe interpolation (`interp` attribute).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Interp {
    /// `linear`
    Linear,
    /// `easeIn`
    EaseIn,
    /// `easeOut`
    EaseOut,
    /// `easeInOut`
    EaseInOut,
}

impl Interp {
    /// Attribute text.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseIn => "easeIn",
            Self::EaseOut => "easeOut",
            Self::EaseInOut => "easeInOut",
        }
    }
}

/// Keyframe curve shape (`curve` attribute).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Curve {
    /// `linear`
    Linear,
    /// `smooth`
    Smooth,
    /// `hold`
    Hold,
}

impl Curve {
    /// Attribute text.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Smooth => "smooth",
            Self::Hold => "hold",
        }
    }
}

/// Animated parameter identity.
///
/// Known names get their own variant so keyframe rules are matched exhaustively; anything
/// else is kept verbatim in [`Param::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Param {
    /// `position`: x y offset.
    Position,
    /// `scale`: x y percentage.
    Scale,
    /// `rotation`: degrees.
    Rotation,
    /// `anchor`: x y.
    Anchor,
    /// `opacity`: 0..1.
    Opacity,
    /// `volume`: linear gain or dB.
    Volume,
    /// `color`: RGB(A) components.
    Color,
    /// `crop`: x y.
    Crop,
    /// Any other parameter name.
    Other(String),
}

impl Param {
    /// Map a parameter name onto its variant.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "position" => Self::Position,
            "scale" => Self::Scale,
            "rotation" => Self::Rotation,
            "anchor" => Self::Anchor,
            "opacity" => Self::Opacity,
            "volume" => Self::Volume,
            "color" => Self::Color,
            "crop" => Self::Crop,
            _ => Self::Other(name.to_owned()),
        }
    }

    /// Name written to the `param` element.
    pub fn name(&self) -> &str {
        match self {
            Self::Position => "position",
            Self::Scale => "scale",
            Self::Rotation => "rotation",
            Self::Anchor => "anchor",
            Self::Opacity => "opacity",
            Self::Volume => "volume",
            Self::Color => "color",
            Self::Crop => "crop",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Param {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

/// One keyframe of an animation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Keyframe {
    /// Time relative to the owning element.
    pub time: Time,
    /// Value text, e.g. `"0 0"` or `"-6dB"`.
    pub value: String,
    /// Optional interpolation.
    pub interp: Option<Interp>,
    /// Optional curve.
    pub curve: Option<Curve>,
}

impl Keyframe {
    /// Keyframe without interp/curve.
    pub fn new(time: Time, value: impl Into<String>) -> Self {
        Self {
            time,
            value: value.into(),
            interp: None,
            curve: None,
        }
    }

    /// Set `interp`.
    pub fn interp(mut self, interp: Interp) -> Self {
        self.interp = Some(interp);
        self
    }

    /// Set `curve`.
    pub fn curve(mut self, curve: Curve) -> Self {
        self.curve = Some(curve);
        self
    }
}

/// Keyframes for a single parameter; order is significant.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KeyframeAnimation {
    /// Animated parameter.
    pub param: Param,
    /// Keyframes, expected strictly increasing in time.
    pub keyframes: Vec<Keyframe>,
}

impl KeyframeAnimation {
    /// Empty animation for `param`.
    pub fn new(param: Param) -> Self {
        Self {
            param,
            keyframes: Vec::new(),
        }
    }

    /// Append a keyframe.
    pub fn key(mut self, keyframe: Keyframe) -> Self {
        self.keyframes.push(keyframe);
        self
    }
}

/// Effect applied to an element, with its own animated parameters.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Filter {
    /// Effect resource.
    pub effect: ResourceId,
    /// Display name.
    pub name: String,
    /// Animated parameters.
    pub animations: Vec<KeyframeAnimation>,
}

impl Filter {
    /// Filter with no animations.
    pub fn new(effect: ResourceId, name: impl Into<String>) -> Self {
        Self {
            effect,
            name: name.into(),
            animations: Vec::new(),
        }
    }

    /// Attach an animation.
    pub fn with_animation(mut self, animation: KeyframeAnimation) -> Self {
        self.animations.push(animation);
        self
    }
}
