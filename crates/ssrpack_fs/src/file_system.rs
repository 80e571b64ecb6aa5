use std::{io, path::Path};

/// Where evaluation artifacts other than the bundle itself are persisted.
pub trait FileSystem: Send + Sync {
  /// Replaces the whole content of `path`, creating the file when it is missing.
  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()>;

  fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

  fn exists(&self, path: &Path) -> bool;

  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    String::from_utf8(self.read(path)?)
      .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
  }
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
    (**self).write(path, content)
  }

  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    (**self).read(path)
  }

  fn exists(&self, path: &Path) -> bool {
    (**self).exists(path)
  }
}
