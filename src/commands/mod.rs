pub mod clone;
pub mod completions;
pub mod create;
pub mod list;
pub mod remove;
pub mod rename;
pub mod reset;
