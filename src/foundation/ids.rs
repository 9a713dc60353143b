use std::fmt;

/// Document-unique resource identifier, rendered `r<N>`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ResourceId(pub(crate) u32);

impl ResourceId {
    /// Numeric part of the id.
    pub fn index(self) -> u32 {
        self.0
    }

    /// Parse `r<N>` text.
    pub fn parse(text: &str) -> Option<Self> {
        let n = text.strip_prefix('r')?;
        if n.is_empty() || !n.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        n.parse().ok().map(Self)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}
