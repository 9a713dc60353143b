//! Read-only document validation.
//!
//! The validator never fails; it returns a [`report::ValidationReport`] and leaves the policy
//! (strict, log-and-continue, filter by kind) to the caller.

pub(crate) mod check;
pub(crate) mod report;
pub(crate) mod rules;
