//! Renderers that dispatch nested UI Schemas (objects and arrays)

pub mod array_list;
pub mod object;
