//! Terminal front end for the Pokédex detail screen.
//!
//! The binary in `main.rs` wires these pieces together; they live in a
//! library so integration tests can drive the screen against the mock
//! server.

pub mod config;
pub mod render;
pub mod screen;
pub mod transport;

pub use config::{Args, Command};
pub use screen::{Applied, Controller, PendingLookup, Screen, Ticket};
pub use transport::UreqTransport;
