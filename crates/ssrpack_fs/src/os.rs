use std::{io, path::Path};

use crate::FileSystem;

#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
    std::fs::write(path, content)
  }

  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    std::fs::read(path)
  }

  fn exists(&self, path: &Path) -> bool {
    path.exists()
  }
}

#[test]
fn test_write_overwrites_existing_file() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("entry.bundle.meta.json");

  OsFileSystem.write(&path, b"{\"inputs\":{},\"outputs\":{}}").unwrap();
  OsFileSystem.write(&path, b"{}").unwrap();

  assert!(OsFileSystem.exists(&path));
  assert_eq!(OsFileSystem.read_to_string(&path).unwrap(), "{}");
}

#[test]
fn test_write_into_missing_dir_fails() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("missing").join("entry.bundle.meta.json");

  let err = OsFileSystem.write(&path, b"{}").unwrap_err();
  assert_eq!(err.kind(), io::ErrorKind::NotFound);
}
