use crate::Metafile;

#[derive(Debug, Default, Clone)]
pub struct BuildOutput {
  /// Only present when the build asked for it.
  pub metafile: Option<Metafile>,
}
