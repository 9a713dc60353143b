//! Convenience builders layered over the document core.

pub(crate) mod opts;
pub(crate) mod project;
