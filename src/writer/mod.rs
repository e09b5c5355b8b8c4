//! Render the generated C++ header artifacts.

pub mod enumeration;
pub mod header;
