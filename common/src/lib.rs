//! # Modscan Common
//!
//! Shared vocabulary of the workspace: Modbus unit identifiers and transport
//! methods, probe targets, discovered device handles, local network
//! attachments and the logging macros used by every other crate.

pub mod config;
pub mod device;
pub mod error;
pub mod logging;
pub mod modbus;
pub mod network;
pub mod target;
pub mod utils;

#[doc(hidden)]
pub use tracing as __tracing;
