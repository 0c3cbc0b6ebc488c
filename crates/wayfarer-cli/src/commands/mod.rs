pub mod add;
pub mod common;
pub mod list;
pub mod remove;
pub mod theme;
