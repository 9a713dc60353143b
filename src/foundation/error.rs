use crate::foundation::ids::ResourceId;
use crate::foundation::time::Time;

/// Convenience result type used across the crate.
pub type FcpxResult<T> = Result<T, FcpxError>;

/// Construction-time error taxonomy.
///
/// Validator findings are not errors; see [`crate::ValidationReport`].
#[derive(thiserror::Error, Debug)]
pub enum FcpxError {
    /// A staging method or commit was called on a closed transaction.
    #[error("transaction is closed ({state})")]
    TransactionClosed {
        /// `"rolled back"` or `"committed"`.
        state: &'static str,
    },

    /// Text is not `0s` or `<num>/<den>s`.
    #[error("malformed duration '{0}'")]
    MalformedDuration(String),

    /// Well-formed duration text that is not a whole number of ticks over 24000.
    #[error("duration '{0}' is not frame-aligned (expected n/24000s with n divisible by 1001)")]
    FrameAlignmentViolation(String),

    /// Insertion would overlap an existing element in the same lane.
    #[error("lane {lane} overlap with {with} at [{start}, {end})")]
    LaneOverlap {
        /// Normalized lane index (0 = primary).
        lane: i32,
        /// Short description of the conflicting element.
        with: String,
        /// Start of the conflicting element.
        start: Time,
        /// Exclusive end of the conflicting element.
        end: Time,
    },

    /// A resource was staged under an id this transaction never reserved.
    #[error("resource id {0} was not reserved by this transaction")]
    UnreservedId(ResourceId),

    /// A resource id was staged twice.
    #[error("resource id {0} is already defined")]
    DuplicateResource(ResourceId),

    /// The registry has no ids left to issue.
    #[error("resource id space exhausted ({issued} issued, {requested} requested)")]
    IdSpaceExhausted {
        /// Ids issued so far.
        issued: u32,
        /// Ids requested by the failing call.
        requested: usize,
    },

    /// A media file does not exist.
    #[error("source not found: {0}")]
    SourceNotFound(String),

    /// Invalid caller-provided values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Strict serialization refused a document with validator findings.
    #[error("document has {count} validation finding(s); first: {first}")]
    ValidationFailed {
        /// Number of findings.
        count: usize,
        /// Rendered first finding.
        first: String,
    },

    /// Media probing failed.
    #[error("probe error: {0}")]
    Probe(String),

    /// Filesystem error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FcpxError {
    /// Build a [`FcpxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FcpxError::Probe`] value.
    pub fn probe(msg: impl Into<String>) -> Self {
        Self::Probe(msg.into())
    }

    /// Stable machine-readable code for the error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TransactionClosed { .. } => "TRANSACTION_CLOSED",
            Self::MalformedDuration(_) => "MALFORMED_DURATION",
            Self::FrameAlignmentViolation(_) => "FRAME_ALIGNMENT_VIOLATION",
            Self::LaneOverlap { .. } => "LANE_OVERLAP",
            Self::UnreservedId(_) => "UNRESERVED_ID",
            Self::DuplicateResource(_) => "DUPLICATE_RESOURCE",
            Self::IdSpaceExhausted { .. } => "ID_SPACE_EXHAUSTED",
            Self::SourceNotFound(_) => "SOURCE_NOT_FOUND",
            Self::Validation(_) => "VALIDATION",
            Self::ValidationFailed { .. } => "VALIDATION_FAILED",
            Self::Probe(_) => "PROBE",
            Self::Io(_) => "IO",
            Self::Other(_) => "OTHER",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
