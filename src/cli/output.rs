//! Shared output formatting helpers for the CLI.

use std::io::IsTerminal;

use serde::Serialize;

const BOLD: &str = "1";
const DIM: &str = "2";
const RED: &str = "1;31";
const GREEN: &str = "1;32";
const YELLOW: &str = "33";

fn paint_out(code: &str, text: &str) -> String {
    if std::io::stdout().is_terminal() {
        format!("\x1b[{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

fn paint_err(code: &str, text: &str) -> String {
    if std::io::stderr().is_terminal() {
        format!("\x1b[{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

/// Prints a value as pretty JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(err) => error(&format!("cannot serialize output: {err}")),
    }
}

/// Longest a table column may grow.
const MAX_COL_WIDTH: usize = 60;

/// Prints a simple formatted table to stdout.
///
/// Column widths fit the content up to a cap; longer cells are truncated.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        println!("{}", paint_out(DIM, "  (no results)"));
        return;
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count()).min(MAX_COL_WIDTH);
            }
        }
    }

    let header_line = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{h:<width$}", width = widths[i]))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", paint_out(BOLD, &header_line));
    println!(
        "{}",
        widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("  ")
    );

    for row in rows {
        let line = row
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| {
                widths.get(i).map(|&width| {
                    let truncated: String = cell.chars().take(width).collect();
                    format!("{truncated:<width$}")
                })
            })
            .collect::<Vec<_>>()
            .join("  ");
        println!("{line}");
    }
}

/// Prints a green success message.
pub fn success(msg: &str) {
    println!("{} {msg}", paint_out(GREEN, "✓"));
}

/// Prints a yellow warning to stderr.
pub fn warn(msg: &str) {
    eprintln!("{} {msg}", paint_err(YELLOW, "⚠"));
}

/// Prints a red error to stderr.
pub fn error(msg: &str) {
    eprintln!("{} {msg}", paint_err(RED, "✗"));
}

/// Prints an informational message to stderr (suppressed in quiet mode).
pub fn info(msg: &str, quiet: bool) {
    if !quiet {
        eprintln!("{} {msg}", paint_err(DIM, "•"));
    }
}

/// Prints a `Label: value` detail line with a bold label.
pub fn detail(label: &str, value: &str) {
    println!("  {} {value}", paint_out(BOLD, label));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_table_handles_empty_rows() {
        // Must not panic.
        print_table(&["Id", "Name"], &[]);
    }

    #[test]
    fn test_print_table_uneven_rows() {
        // Rows narrower/wider than the header list must not panic.
        print_table(
            &["Id", "Name"],
            &[vec!["1".to_string()], vec![
                "2".to_string(),
                "two".to_string(),
                "extra".to_string(),
            ]],
        );
    }
}
