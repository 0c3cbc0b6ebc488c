//! Database layer for Wayfarer

mod connection;
mod migrations;

pub use connection::Database;
