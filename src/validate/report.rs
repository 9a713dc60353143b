use std::fmt;

use serde::Serialize;

use crate::foundation::error::{FcpxError, FcpxResult};

/// Category of a validator finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum FindingKind {
    /// Two resources share an id.
    DuplicateId,
    /// A reference does not resolve to a committed resource.
    DanglingReference,
    /// An asset clip's format differs from its asset's.
    FormatMismatch,
    /// A timing value is off the tick grid.
    FrameAlignmentViolation,
    /// A resource identity is on the denylist.
    DisallowedResourceIdentity,
    /// A keyframe carries a forbidden attribute or a bad value.
    KeyframeAttributeViolation,
    /// Keyframe times are not strictly increasing.
    KeyframeOrderViolation,
}

impl FindingKind {
    /// Stable name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DuplicateId => "DuplicateId",
            Self::DanglingReference => "DanglingReference",
            Self::FormatMismatch => "FormatMismatch",
            Self::FrameAlignmentViolation => "FrameAlignmentViolation",
            Self::DisallowedResourceIdentity => "DisallowedResourceIdentity",
            Self::KeyframeAttributeViolation => "KeyframeAttributeViolation",
            Self::KeyframeOrderViolation => "KeyframeOrderViolation",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PathElem {
    Field(&'static str),
    Index(usize),
}

pub(crate) fn format_path(path: &[PathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            PathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            PathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

/// One validator finding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Category.
    pub kind: FindingKind,
    /// `$`-rooted location, e.g. `$.library.events[0].projects[0].sequence.spine[3]`.
    pub path: String,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.path, self.message)
    }
}

/// Everything the validator found, in discovery order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    findings: Vec<Finding>,
}

impl ValidationReport {
    pub(crate) fn push(&mut self, kind: FindingKind, path: &[PathElem], message: impl Into<String>) {
        self.findings.push(Finding {
            kind,
            path: format_path(path),
            message: message.into(),
        });
    }

    /// No findings.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Number of findings.
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Return `true` when there are no findings.
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// All findings.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Findings of one kind.
    pub fn of_kind(&self, kind: FindingKind) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.kind == kind)
    }

    /// Count of one kind.
    pub fn count(&self, kind: FindingKind) -> usize {
        self.of_kind(kind).count()
    }

    /// Drop findings `keep` rejects.
    pub fn retain(&mut self, keep: impl FnMut(&Finding) -> bool) {
        self.findings.retain(keep);
    }

    /// Consume into the finding list.
    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }

    /// Strict policy: any finding becomes [`FcpxError::ValidationFailed`].
    pub fn into_result(self) -> FcpxResult<()> {
        match self.findings.first() {
            None => Ok(()),
            Some(first) => Err(FcpxError::ValidationFailed {
                count: self.findings.len(),
                first: first.to_string(),
            }),
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, finding) in self.findings.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{finding}")?;
        }
        Ok(())
    }
}
