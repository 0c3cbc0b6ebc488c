//! Headless screen logic; front-ends render the state these expose.

mod add_entry;
mod home;

pub use add_entry::AddEntryScreen;
pub use home::{HomeScreen, EMPTY_LIST_MESSAGE};
