pub(crate) mod error;
pub(crate) mod ids;
pub mod time;
