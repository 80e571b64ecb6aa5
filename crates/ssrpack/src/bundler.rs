use std::future::Future;

use ssrpack_common::{BuildConfig, BuildOutput};
use ssrpack_error::BuildResult;

/// An engine able to turn one entry module into a single bundle file.
///
/// The engine writes the bundle to `config.outfile` itself. When `config.metafile` is set it must
/// hand the build report back in [`BuildOutput::metafile`].
pub trait Bundler: Send + Sync {
  fn build(&self, config: &BuildConfig) -> impl Future<Output = BuildResult<BuildOutput>> + Send;
}
