mod bundler;
mod esbuild;
mod evaluator;
mod reporter;
mod utils;

pub use crate::{
  bundler::Bundler,
  esbuild::{EsbuildBundler, EsbuildOptions, ESBUILD_BINARY_PATH},
  evaluator::ModuleEvaluator,
  reporter::{BuildStatus, Reporter},
  utils::{
    analyze_metafile::analyze_metafile,
    derive_file_names::{derive_file_names, BundleFileNames},
    normalize_options::normalize_options,
  },
};
pub use ssrpack_common::*;
pub use ssrpack_error::{BuildError, BuildResult};
pub use ssrpack_fs::{FileSystem, OsFileSystem};
