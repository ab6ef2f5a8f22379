//! GitHub Actions workflow commands.
//!
//! Groups and annotations are written to stdout; step outputs are appended
//! to the file named by `GITHUB_OUTPUT`.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Escape a value for use in a workflow command message.
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Start a collapsible log group.
pub fn start_group(name: &str) {
    println!("::group::{}", escape_data(name));
}

/// End the current log group.
pub fn end_group() {
    println!("::endgroup::");
}

/// Emit an error annotation, which also marks the step as failed in the UI.
pub fn error(message: &str) {
    println!("::error::{}", escape_data(message));
}

/// Set a step output when running under GitHub Actions.
///
/// Returns `Ok(false)` when `GITHUB_OUTPUT` is not set.
pub fn set_output(name: &str, value: &str) -> io::Result<bool> {
    match std::env::var_os("GITHUB_OUTPUT") {
        Some(path) if !path.is_empty() => {
            append_output(Path::new(&path), name, value)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Append `name=value` to an output file, using a heredoc for multi-line values.
pub fn append_output(path: &Path, name: &str, value: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if value.contains('\n') {
        let delimiter = format!(
            "ghadelimiter_{}",
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        );
        writeln!(file, "{name}<<{delimiter}\n{value}\n{delimiter}")
    } else {
        writeln!(file, "{name}={value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_data() {
        assert_eq!(escape_data("50% done\nnext\r"), "50%25 done%0Anext%0D");
    }

    #[test]
    fn test_append_single_line_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output");
        append_output(&path, "time", "12:00:00 UTC").unwrap();
        append_output(&path, "other", "x").unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "time=12:00:00 UTC\nother=x\n");
    }

    #[test]
    fn test_append_multi_line_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output");
        append_output(&path, "summary", "a\nb").unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("summary<<ghadelimiter_"));
        assert_eq!(lines[1], "a");
        assert_eq!(lines[2], "b");
        assert_eq!(lines[3], lines[0].trim_start_matches("summary<<"));
    }
}
