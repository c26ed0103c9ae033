//! End-to-end checks of the scanners against scripted collaborators and a
//! loopback Modbus server.

pub mod fakes;

mod network;
