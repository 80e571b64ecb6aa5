use std::{
  fmt::Display,
  ops::{Deref, DerefMut},
};

/// Every failure collected while evaluating one entry.
///
/// The engine may report several diagnostics for a single build, so the errors are kept as a list
/// instead of being flattened into one message.
#[derive(Debug)]
pub struct BuildError(pub Vec<anyhow::Error>);

impl BuildError {
  pub fn into_vec(self) -> Vec<anyhow::Error> {
    self.0
  }
}

impl Display for BuildError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for (index, error) in self.0.iter().enumerate() {
      if index > 0 {
        writeln!(f)?;
      }
      write!(f, "{error:#}")?;
    }
    Ok(())
  }
}

impl Deref for BuildError {
  type Target = Vec<anyhow::Error>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![error])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors)
  }
}

impl From<std::io::Error> for BuildError {
  fn from(error: std::io::Error) -> Self {
    Self(vec![error.into()])
  }
}

pub type BuildResult<T> = anyhow::Result<T, BuildError>;

#[test]
fn test_display_joins_errors() {
  let error = BuildError::from(vec![anyhow::anyhow!("first"), anyhow::anyhow!("second")]);
  assert_eq!(error.len(), 2);
  assert_eq!(error.to_string(), "first\nsecond");
}

#[test]
fn test_io_error_is_kept_as_source() {
  let error = BuildError::from(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"));
  assert!(error[0].downcast_ref::<std::io::Error>().is_some());
}
