//! Observability for the plant care service
//!
//! Structured JSON logging keyed by a closed set of [`Event`]s.
//!
//! # Usage
//!
//! ```ignore
//! use plantcare::observability::{Event, Logger};
//!
//! Logger::info(Event::RecordCreated, &[("id", "65f1c0a2b3d4e5f601234567")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};
