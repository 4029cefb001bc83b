//! `rollcall` - a local-first class attendance register
//!
//! This library provides the core functionality for recording class
//! attendance entries, persisting them in a local key-value store, and
//! computing filtered summary and table views.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod projection;
pub mod record;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::{AttendanceRecord, Month};
pub use store::{RecordStore, StoreStats};
