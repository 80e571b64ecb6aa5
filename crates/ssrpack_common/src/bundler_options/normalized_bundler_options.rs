use std::path::PathBuf;

use crate::Platform;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedBundlerOptions {
  pub platform: Platform,
  pub target: String,
  pub minify: bool,
  /// Always absolute when set.
  pub cwd: Option<PathBuf>,
}

impl Default for NormalizedBundlerOptions {
  fn default() -> Self {
    Self { platform: Platform::Node, target: "node18".to_string(), minify: false, cwd: None }
  }
}
