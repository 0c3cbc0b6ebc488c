//! wayfarer-core - Core library for Wayfarer
//!
//! This crate contains the diary entry model, the key-value persistence layer,
//! the entry capture flow, and the headless screen logic shared by every
//! Wayfarer front-end.

pub mod capture;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod navigation;
pub mod screens;
pub mod store;
pub mod theme;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
pub use models::{DiaryEntry, EntryId, UNKNOWN_LOCATION};
pub use store::EntryStore;
