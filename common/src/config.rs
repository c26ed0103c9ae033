use std::time::Duration;

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(500);

pub struct Config {
    /// Upper bound for a single connect or register read during a probe.
    pub probe_timeout: Duration,
    /// 0 prints everything, 1 drops headers, 2 prints only the summary.
    pub quiet: u8,
    /// Disables the 'q' key listener that stops a running scan.
    pub disable_input: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            quiet: 0,
            disable_input: false,
        }
    }
}
