//! Raw RTU frames written outside of a Modbus client context.

/// Broadcast "return query data" diagnostics request (function 0x08,
/// sub-function 0x0000) with a 0x5555 payload. Every device on the line
/// ignores it, but auto-bauding devices lock onto the line speed.
const WAKE_PDU: [u8; 6] = [0x00, 0x08, 0x00, 0x00, 0x55, 0x55];

/// Modbus RTU CRC-16 (polynomial 0xA001, initial value 0xFFFF).
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;
    for byte in data {
        crc ^= u16::from(*byte);
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ 0xA001;
            } else {
                crc >>= 1;
            }
        }
    }
    crc
}

/// Appends the CRC, low byte first as RTU framing requires.
pub fn create_frame(pdu: &[u8]) -> Vec<u8> {
    let mut buffer: Vec<u8> = Vec::with_capacity(pdu.len() + 2);
    buffer.extend_from_slice(pdu);
    buffer.extend_from_slice(&crc16(pdu).to_le_bytes());
    buffer
}

pub fn wake_frame() -> Vec<u8> {
    create_frame(&WAKE_PDU)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
