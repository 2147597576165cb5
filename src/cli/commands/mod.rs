//! Command implementations

pub mod completions;
pub mod demos;
pub mod explain;
pub mod fill;
pub mod render;
pub mod renderers;
