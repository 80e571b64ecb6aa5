use std::path::PathBuf;

use clap::Args;

use crate::types::{output_format::OutputFormat, platform::Platform};

#[derive(Args)]
pub struct InputArgs {
  /// Entry modules to bundle, each ending in `.js` or `.jsx`.
  #[clap(required = true, value_name = "ENTRY")]
  pub entries: Vec<PathBuf>,

  /// Report the bundle paths without running esbuild.
  #[clap(long)]
  pub skip_build: bool,

  #[clap(long)]
  pub cwd: Option<PathBuf>,
}

#[derive(Args)]
pub struct OutputArgs {
  #[clap(long, short = 'f', default_value = "esm")]
  pub format: OutputFormat,

  /// Print a size breakdown of each bundle.
  #[clap(long)]
  pub meta_display: bool,

  /// Write `<name>.bundle.meta.json` next to each bundle.
  #[clap(long)]
  pub meta_file: bool,

  #[clap(long)]
  pub no_color: bool,

  /// Overrides the `SSRPACK_LOG` filter, e.g. `debug`.
  #[clap(long)]
  pub log_level: Option<String>,
}

#[derive(Args)]
pub struct EnhanceArgs {
  #[clap(long, short)]
  pub platform: Option<Platform>,

  #[clap(long)]
  pub target: Option<String>,

  #[clap(long, short = 'm')]
  pub minify: bool,

  /// Path to the esbuild executable.
  #[clap(long)]
  pub esbuild: Option<PathBuf>,
}
