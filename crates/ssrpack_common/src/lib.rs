mod bundler_options;
mod types;

pub use crate::{
  bundler_options::{
    normalized_bundler_options::NormalizedBundlerOptions, output_format::OutputFormat,
    platform::Platform, BundlerOptions,
  },
  types::{
    build_config::BuildConfig,
    build_output::BuildOutput,
    build_request::BuildRequest,
    metafile::{Metafile, MetafileOutput, MetafileOutputInput},
  },
};
