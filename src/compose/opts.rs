use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::model::DEFAULT_VERSION;
use crate::foundation::error::{FcpxError, FcpxResult};
use crate::foundation::time::Time;

/// Settings for [`ProjectBuilder`](crate::ProjectBuilder), loadable from JSON.
///
/// Missing keys take their defaults; unknown keys are rejected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildOpts {
    /// Event name.
    pub event_name: String,
    /// Project name.
    pub project_name: String,
    /// FCPXML version written to the root element.
    pub version: String,
    /// How long a still image stays on screen.
    pub image_duration_sec: f64,
    /// Optional opening title shown over the start of the timeline.
    pub title_text: Option<String>,
    /// How long the opening title stays on screen.
    pub title_duration_sec: f64,
    /// Refuse to write a document that has validation findings.
    pub strict: bool,
    /// Lane used for audio-only clips.
    pub audio_lane: i32,
}

impl Default for BuildOpts {
    fn default() -> Self {
        Self {
            event_name: "fcpx Event".to_owned(),
            project_name: "fcpx Project".to_owned(),
            version: DEFAULT_VERSION.to_owned(),
            image_duration_sec: 5.0,
            title_text: None,
            title_duration_sec: 3.0,
            strict: true,
            audio_lane: -1,
        }
    }
}

impl BuildOpts {
    /// Parse from JSON text.
    pub fn from_json_str(text: &str) -> FcpxResult<Self> {
        let opts: Self = serde_json::from_str(text)
            .map_err(|e| FcpxError::validation(format!("invalid build options: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Read and parse a JSON file.
    pub fn from_json_file(path: &Path) -> FcpxResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject settings no document could satisfy.
    pub fn validate(&self) -> FcpxResult<()> {
        if self.version.trim().is_empty() {
            return Err(FcpxError::validation("version must not be empty"));
        }
        for (name, secs) in [
            ("image_duration_sec", self.image_duration_sec),
            ("title_duration_sec", self.title_duration_sec),
        ] {
            if Time::from_seconds(secs).is_zero() {
                return Err(FcpxError::validation(format!(
                    "{name} must be at least one frame, got {secs}"
                )));
            }
        }
        if self.audio_lane == 0 {
            return Err(FcpxError::validation(
                "audio_lane must not be the primary lane",
            ));
        }
        Ok(())
    }

    /// Still image duration on the tick grid.
    pub fn image_duration(&self) -> Time {
        Time::from_seconds(self.image_duration_sec)
    }

    /// Opening title duration on the tick grid.
    pub fn title_duration(&self) -> Time {
        Time::from_seconds(self.title_duration_sec)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/opts.rs"]
mod tests;
