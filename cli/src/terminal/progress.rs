use colored::*;
use indicatif::ProgressStyle;

use crate::terminal::colors;

const TIP: &str = "press 'q' to finish early";

pub fn scan_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} [{bar:32.green/bright_black}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▆▁")
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ])
}

/// Status line next to the bar.
pub fn scan_message(found: usize, input_enabled: bool) -> String {
    let found: ColoredString = format!("{found} devices").green().bold();
    let mut msg: String = format!("{found} so far").color(colors::TEXT_DEFAULT).to_string();
    if input_enabled {
        msg.push_str(&format!(" · {}", TIP.italic().white()));
    }
    msg
}
