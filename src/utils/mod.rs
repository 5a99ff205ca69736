//! Small helpers shared by the builder.

pub mod date;
pub mod minify;
pub mod slug;
