//! Box-drawn error reports
//!
//! Shared by the build script (robot.toml validation) and the binary
//! (configuration errors at startup).

/// Width of the text column inside the box
const WIDTH: usize = 64;

/// Format message lines with box drawing, truncating long lines
pub fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > WIDTH {
                format!("{}...", line.chars().take(WIDTH - 3).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<width$} ║", truncated, width = WIDTH)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
