pub mod engine;
pub mod profile;
pub mod scanner;

#[cfg(test)]
mod testing;

pub use engine::{ModbusProbeEngine, ProbeEngine, Progress};
pub use profile::{DeviceProfile, ProfileRegistry, Signature};
pub use scanner::net::{NetScanner, NetworkScan};
pub use scanner::serial::{SerialScan, SerialScanner};
pub use scanner::{ScanSnapshot, ScanState, ScanStrategy, Scanner};
