use std::fmt::Display;

use anyhow::anyhow;
use ssrpack_error::BuildError;

pub const ERROR_MARKER: &str = "[ERROR]";
pub const WARNING_MARKER: &str = "[WARNING]";

/// Splits esbuild's stderr into one message per diagnostic whose header carries `marker`.
pub fn collect_diagnostics(stderr: &str, marker: &str) -> Vec<String> {
  let mut blocks: Vec<String> = Vec::new();

  for line in stderr.lines() {
    if line.contains(ERROR_MARKER) || line.contains(WARNING_MARKER) {
      let header = line.trim_start_matches(|c: char| c == '✘' || c == '▲' || c.is_whitespace());
      blocks.push(header.to_string());
      continue;
    }
    if is_summary_line(line) {
      continue;
    }
    if let Some(block) = blocks.last_mut() {
      block.push('\n');
      block.push_str(line);
    }
  }

  blocks
    .into_iter()
    .filter(|block| block.starts_with(marker))
    .map(|block| block.trim_end().to_string())
    .collect()
}

// "1 error", "2 warnings", "1 warning and 1 error"
fn is_summary_line(line: &str) -> bool {
  let line = line.trim();
  line.starts_with(|c: char| c.is_ascii_digit())
    && (line.ends_with("error") || line.ends_with("errors") || line.ends_with("warning") || line.ends_with("warnings"))
}

pub fn errors_from_stderr(stderr: &str, status: impl Display) -> BuildError {
  let errors = collect_diagnostics(stderr, ERROR_MARKER);
  if errors.is_empty() {
    let stderr = stderr.trim();
    if stderr.is_empty() {
      return anyhow!("esbuild exited with {status}").into();
    }
    return anyhow!("esbuild exited with {status}\n{stderr}").into();
  }
  errors.into_iter().map(|error| anyhow!(error)).collect::<Vec<_>>().into()
}

#[test]
fn test_collect_diagnostics() {
  let stderr = "▲ [WARNING] Unused import [unused]\n\n    src/a.js:1:0:\n\n\
    ✘ [ERROR] Could not resolve \"react\"\n\n    src/a.js:2:18:\n\n\
    ✘ [ERROR] Unexpected \"}\"\n\n    src/b.js:4:0:\n\n1 warning and 2 errors\n";

  let errors = collect_diagnostics(stderr, ERROR_MARKER);
  assert_eq!(
    errors,
    vec![
      "[ERROR] Could not resolve \"react\"\n\n    src/a.js:2:18:",
      "[ERROR] Unexpected \"}\"\n\n    src/b.js:4:0:",
    ]
  );

  let warnings = collect_diagnostics(stderr, WARNING_MARKER);
  assert_eq!(warnings, vec!["[WARNING] Unused import [unused]\n\n    src/a.js:1:0:"]);
}

#[test]
fn test_errors_from_unrecognized_stderr() {
  let error = errors_from_stderr("segfault\n", "exit status: 139");
  assert_eq!(error.len(), 1);
  assert_eq!(error[0].to_string(), "esbuild exited with exit status: 139\nsegfault");

  let error = errors_from_stderr("", "exit status: 1");
  assert_eq!(error[0].to_string(), "esbuild exited with exit status: 1");
}
