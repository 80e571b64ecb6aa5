use std::path::PathBuf;

use crate::OutputFormat;

/// One call into the evaluator. Whether the bundle is stale is decided by the caller.
#[allow(clippy::struct_excessive_bools)] // Using raw booleans is more clear in this case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
  /// Entry module; its file name must end in `.js` or `.jsx`.
  pub entry_path: PathBuf,
  pub rebuild_required: bool,
  pub emit_meta_to_console: bool,
  pub emit_meta_to_file: bool,
  pub format: OutputFormat,
}

impl BuildRequest {
  pub fn new(entry_path: impl Into<PathBuf>, format: OutputFormat) -> Self {
    Self {
      entry_path: entry_path.into(),
      rebuild_required: true,
      emit_meta_to_console: false,
      emit_meta_to_file: false,
      format,
    }
  }

  #[must_use]
  pub fn with_rebuild_required(mut self, rebuild_required: bool) -> Self {
    self.rebuild_required = rebuild_required;
    self
  }

  #[must_use]
  pub fn with_meta_to_console(mut self, emit: bool) -> Self {
    self.emit_meta_to_console = emit;
    self
  }

  #[must_use]
  pub fn with_meta_to_file(mut self, emit: bool) -> Self {
    self.emit_meta_to_file = emit;
    self
  }

  #[inline]
  pub fn collects_metafile(&self) -> bool {
    self.emit_meta_to_console || self.emit_meta_to_file
  }
}
