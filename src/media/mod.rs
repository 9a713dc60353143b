//! Collaborators consulted by the convenience builders: filesystem, prober, bookmarks.

pub(crate) mod bookmark;
pub(crate) mod probe;
pub(crate) mod source;
