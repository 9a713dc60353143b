//! fcpx builds FCPXML project documents that are valid by construction.
//!
//! The core is small and strict:
//!
//! - [`Time`] keeps every timestamp on the 1001/24000 s tick grid
//! - a [`Registry`] issues never-reused [`ResourceId`]s and publishes resources through
//!   all-or-nothing [`Transaction`]s
//! - a [`Spine`] holds lane-partitioned [`Element`]s and refuses same-lane overlaps
//! - a [`Validator`] checks a whole [`Document`] and reports [`Finding`]s without mutating it
//!
//! [`ProjectBuilder`] layers file import, probing and common clip shapes on top.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compose;
mod document;
mod foundation;
mod media;
mod resources;
mod serialize;
mod timeline;
mod validate;

/// Tick-grid time values and the string-level helpers.
pub use crate::foundation::time;

pub use crate::foundation::error::{FcpxError, FcpxResult};
pub use crate::foundation::ids::ResourceId;
pub use crate::foundation::time::{TICK_WIDTH, TIMEBASE, Time};

pub use crate::resources::model::{Asset, AudioInfo, Effect, Format, Media, MediaKind, Resource};
pub use crate::resources::registry::{Registry, Transaction, TransactionState};

pub use crate::timeline::builder::{SpineBuilder, SpineStatistics};
pub use crate::timeline::element::{Element, ElementKind, TitleText};
pub use crate::timeline::keyframe::{Curve, Filter, Interp, Keyframe, KeyframeAnimation, Param};
pub use crate::timeline::spine::Spine;

pub use crate::document::model::{DEFAULT_VERSION, Document, Event, Library, Project, Sequence};

pub use crate::validate::check::{DEFAULT_DENYLIST, Validator, validate_document};
pub use crate::validate::report::{Finding, FindingKind, ValidationReport};

pub use crate::media::bookmark::{BookmarkGenerator, CommandBookmarks, NoBookmarks};
pub use crate::media::probe::{FfprobeProber, FixedProber, MediaInfo, MediaProber};
pub use crate::media::source::{media_kind_for, resolve_source};

pub use crate::compose::opts::BuildOpts;
pub use crate::compose::project::{BASIC_TITLE_UID, OVERLAY_LANE, ProjectBuilder};
