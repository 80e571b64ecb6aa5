use std::path::PathBuf;

use crate::{OutputFormat, Platform};

/// What the engine is asked to do for a single entry.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
  pub entry_points: Vec<PathBuf>,
  pub platform: Platform,
  pub target: String,
  pub bundle: bool,
  pub minify: bool,
  pub metafile: bool,
  pub outfile: PathBuf,
  pub format: OutputFormat,
}
