use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
  Rebuilt,
  Skipped,
}

/// Console sink for everything an evaluation tells the user.
pub trait Reporter: Send + Sync {
  fn analysis(&self, text: &str);

  fn status(&self, status: BuildStatus, entry: &Path, bundle: &Path);
}
