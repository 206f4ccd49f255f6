//! Shared utilities for CLI commands

use std::io::BufRead;

use tabled::{Table, settings::Style};

use crate::cli::error::{CliError, CliResult};

/// Truncate a string with ellipsis if it exceeds max length
pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Display an optional field, `-` when missing or blank
pub fn or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

/// Stored timestamps are `YYYY-MM-DD HH:MM:SS`; tables only show the minute.
pub fn short_timestamp(ts: &str) -> String {
    ts.chars().take(16).collect()
}

/// Apply consistent table styling
pub fn apply_table_style(table: &mut Table) {
    table.with(Style::rounded());
}

/// Read a password from the first line of `input`, without the line ending.
pub fn read_password(mut input: impl BufRead) -> CliResult<String> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| CliError::invalid_argument(format!("failed to read password: {}", e)))?;

    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        return Err(CliError::invalid_argument("password must not be empty"));
    }
    Ok(password.to_string())
}
