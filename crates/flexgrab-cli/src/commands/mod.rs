//! Command implementations.

pub mod auth;
pub mod blocks;
pub mod grabber;
pub mod prefs;
