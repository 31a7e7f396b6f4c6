//! The sequencing side of a splitting session.
//!
//! - [`Splitter`] - Holds the configuration and starts sessions
//! - [`Split`] - The session driver, producing chunks one at a time

mod session;

pub use session::{Split, Splitter};
