//! FCPXML output.

pub(crate) mod fcpxml;
pub(crate) mod xml;
