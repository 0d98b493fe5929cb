//! Build script for kairos-sim
//!
//! Validates robot.toml at compile time so a broken embedded default never
//! ships.

use std::fs;
use std::path::Path;

#[path = "src/report.rs"]
mod report;

use report::format_error_lines;

/// Sections the simulator understands
const KNOWN_SECTIONS: [&str; 4] = ["geometry", "selector", "supervisor", "hub"];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=robot.toml");
    println!("cargo:rerun-if-changed=src/report.rs");

    let config_path = Path::new("robot.toml");
    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read robot.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in robot.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let errors = validate_sections(&config);
    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: robot.toml validation failed                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&errors.join("\n"))
        );
    }
}

/// Reject unknown top-level sections and out-of-range timing values
fn validate_sections(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(table) = config.as_table() else {
        errors.push("top level must be a table".to_string());
        return errors;
    };

    for key in table.keys() {
        if !KNOWN_SECTIONS.contains(&key.as_str()) {
            errors.push(format!("unknown section [{}]", key));
        }
    }

    if let Some(threshold) = config
        .get("selector")
        .and_then(|s| s.get("trigger_threshold"))
        .and_then(|v| v.as_float())
    {
        if !(threshold > 0.0 && threshold <= 1.0) {
            errors.push(format!("selector.trigger_threshold {} not in (0, 1]", threshold));
        }
    }

    if let Some(speedup) = config
        .get("geometry")
        .and_then(|s| s.get("speedup"))
        .and_then(|v| v.as_integer())
    {
        if speedup < 1 {
            errors.push("geometry.speedup must be at least 1".to_string());
        }
    }

    errors
}
