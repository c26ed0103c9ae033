//! # Modscan Protocols
//!
//! Wire level of a probe: opening Modbus sessions over TCP, RTU-over-TCP and
//! serial RTU lines, and reading the identification register block of a unit.

pub mod error;
pub mod frame;
pub mod register;
pub mod serial;
pub mod session;

pub use error::ProbeError;
pub use register::{RegisterAccess, RegisterBlock, Reply};
pub use session::{Session, Transport};
pub use tokio_modbus::ExceptionCode;
