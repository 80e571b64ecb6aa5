pub mod normalized_bundler_options;
pub mod output_format;
pub mod platform;

use std::path::PathBuf;

use serde::Deserialize;

use crate::Platform;

/// Engine settings shared by every evaluation. Unset fields fall back to a server-side build.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BundlerOptions {
  pub platform: Option<Platform>,
  /// Runtime version the engine lowers syntax for, e.g. `node18`.
  pub target: Option<String>,
  pub minify: Option<bool>,
  /// Base directory for relative entry paths. Unset means the process working directory.
  pub cwd: Option<PathBuf>,
}
