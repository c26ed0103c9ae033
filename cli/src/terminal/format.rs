use std::time::Duration;

use colored::*;
use modscan_common::device::Device;
use modscan_common::network::attachment::NetworkAttachment;
use modscan_common::target::ProbeTarget;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

/// Short location of a probe target, e.g. `192.168.1.20:502` or `/dev/ttyUSB0`.
pub fn target_location(target: &ProbeTarget) -> String {
    match target {
        ProbeTarget::Network(net) => net.socket_addr().to_string(),
        ProbeTarget::Serial(serial) => serial.device.clone(),
    }
}

pub fn device_to_details(device: &Device) -> Vec<Detail> {
    let mut details: Vec<Detail> = Vec::new();

    match &device.target {
        ProbeTarget::Network(net) => {
            details.push(("Host".to_string(), net.host.to_string().color(colors::IPV4_ADDR)));
            details.push(("Port".to_string(), net.port.to_string().normal()));
        }
        ProbeTarget::Serial(serial) => {
            details.push(("Device".to_string(), serial.device.clone().color(colors::SERIAL_PATH)));
            details.push(("Rate".to_string(), format!("{} bps", serial.rate).normal()));
        }
    }

    details.push(("Method".to_string(), device.target.method().to_string().normal()));
    details.push(("Unit".to_string(), device.unit().to_string().color(colors::UNIT)));
    details.push(("Vendor".to_string(), device.vendor.clone().color(colors::SECONDARY)));
    details.push(("Latency".to_string(), millis(device.latency).color(colors::LATENCY)));
    details.push(("Timeout".to_string(), millis(device.timeout).normal()));

    details
}

pub fn attachment_to_details(attachment: &NetworkAttachment) -> Vec<Detail> {
    let network: ColoredString = format!(
        "{}/{}",
        attachment.network.network().to_string().color(colors::IPV4_ADDR),
        attachment.network.prefix().to_string().color(colors::IPV4_PREFIX)
    )
    .color(colors::SEPARATOR);

    vec![
        ("Network".to_string(), network),
        ("Address".to_string(), attachment.address.to_string().color(colors::IPV4_ADDR)),
        ("Hosts".to_string(), attachment.hosts().count().to_string().normal()),
    ]
}

fn millis(duration: Duration) -> String {
    format!("{} ms", duration.as_millis())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
