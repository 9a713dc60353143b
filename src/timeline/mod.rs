pub(crate) mod builder;
pub(crate) mod element;
pub(crate) mod keyframe;
pub(crate) mod spine;
