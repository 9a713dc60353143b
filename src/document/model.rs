use serde::Serialize;

use crate::foundation::error::FcpxResult;
use crate::foundation::ids::ResourceId;
use crate::foundation::time::Time;
use crate::resources::model::Format;
use crate::resources::registry::{Registry, Transaction};
use crate::serialize::fcpxml;
use crate::timeline::spine::Spine;
use crate::validate::check::Validator;
use crate::validate::report::ValidationReport;

/// FCPXML dialect version written by default.
pub const DEFAULT_VERSION: &str = "1.11";

/// A sequence and the spine it owns.
#[derive(Clone, Debug, Serialize)]
pub struct Sequence {
    /// Format resource.
    pub format: ResourceId,
    /// Timecode origin.
    pub tc_start: Time,
    /// Timecode format, `NDF` or `DF`.
    pub tc_format: String,
    /// Audio layout label.
    pub audio_layout: String,
    /// Audio rate label.
    pub audio_rate: String,
    /// Timeline content.
    pub spine: Spine,
}

impl Sequence {
    /// Empty stereo 48k sequence in `format`.
    pub fn new(format: ResourceId) -> Self {
        Self {
            format,
            tc_start: Time::ZERO,
            tc_format: "NDF".to_owned(),
            audio_layout: "stereo".to_owned(),
            audio_rate: "48k".to_owned(),
            spine: Spine::new(),
        }
    }

    /// Length of the primary storyline.
    pub fn duration(&self) -> Time {
        self.spine.primary_end()
    }
}

/// Project holding one sequence.
#[derive(Clone, Debug, Serialize)]
pub struct Project {
    /// Display name.
    pub name: String,
    /// The project's sequence.
    pub sequence: Sequence,
}

/// Event grouping projects.
#[derive(Clone, Debug, Serialize)]
pub struct Event {
    /// Display name.
    pub name: String,
    /// Projects in the event.
    pub projects: Vec<Project>,
}

/// Library root.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Library {
    /// Library bundle location URL.
    pub location: Option<String>,
    /// Events.
    pub events: Vec<Event>,
}

/// Whole project document: resource table plus library tree.
#[derive(Clone, Debug, Serialize)]
pub struct Document {
    /// Root `version` attribute.
    pub version: String,
    /// Resource table.
    pub registry: Registry,
    /// Library tree.
    pub library: Library,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document.
    pub fn new() -> Self {
        Self {
            version: DEFAULT_VERSION.to_owned(),
            registry: Registry::new(),
            library: Library::default(),
        }
    }

    /// Document with one event, one project and a 1080p23.98 format.
    pub fn with_project(event: &str, project: &str) -> FcpxResult<Self> {
        let mut doc = Self::new();
        let format = {
            let mut tx = Transaction::new(&mut doc.registry);
            let id = tx.reserve_id()?;
            tx.create_format(Format::hd1080p2398(id))?;
            tx.commit()?;
            id
        };
        doc.library.events.push(Event {
            name: event.to_owned(),
            projects: vec![Project {
                name: project.to_owned(),
                sequence: Sequence::new(format),
            }],
        });
        Ok(doc)
    }

    /// First project's sequence.
    pub fn primary_sequence(&self) -> Option<&Sequence> {
        self.library
            .events
            .iter()
            .flat_map(|e| e.projects.iter())
            .map(|p| &p.sequence)
            .next()
    }

    /// Mutable first project's sequence.
    pub fn primary_sequence_mut(&mut self) -> Option<&mut Sequence> {
        self.library
            .events
            .iter_mut()
            .flat_map(|e| e.projects.iter_mut())
            .map(|p| &mut p.sequence)
            .next()
    }

    /// Every library sequence with its event/project indices.
    pub fn sequences(&self) -> impl Iterator<Item = (usize, usize, &Sequence)> {
        self.library.events.iter().enumerate().flat_map(|(ei, e)| {
            e.projects
                .iter()
                .enumerate()
                .map(move |(pi, p)| (ei, pi, &p.sequence))
        })
    }

    /// Run the default validator.
    pub fn validate(&self) -> ValidationReport {
        Validator::default().validate(self)
    }

    /// Serialize without validating.
    pub fn to_fcpxml(&self) -> String {
        fcpxml::write_document(self)
    }

    /// Serialize only when the default validator reports nothing.
    pub fn to_fcpxml_strict(&self) -> FcpxResult<String> {
        self.validate().into_result()?;
        Ok(self.to_fcpxml())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/model.rs"]
mod tests;
