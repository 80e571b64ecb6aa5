use std::{
  io,
  path::{Path, PathBuf},
  sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
  },
};

use dashmap::DashMap;

use crate::FileSystem;

/// An in-memory file table. Clones share the same files.
#[derive(Debug, Default, Clone)]
pub struct MemoryFileSystem {
  files: Arc<DashMap<PathBuf, Vec<u8>>>,
  writes: Arc<AtomicUsize>,
}

impl MemoryFileSystem {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of `write` calls made so far, successful or not.
  pub fn write_count(&self) -> usize {
    self.writes.load(Ordering::SeqCst)
  }

  pub fn paths(&self) -> Vec<PathBuf> {
    let mut paths = self.files.iter().map(|entry| entry.key().clone()).collect::<Vec<_>>();
    paths.sort();
    paths
  }
}

impl FileSystem for MemoryFileSystem {
  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
    self.writes.fetch_add(1, Ordering::SeqCst);
    self.files.insert(path.to_path_buf(), content.to_vec());
    Ok(())
  }

  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    self.files.get(path).map(|content| content.value().clone()).ok_or_else(|| {
      io::Error::new(io::ErrorKind::NotFound, format!("{} does not exist", path.display()))
    })
  }

  fn exists(&self, path: &Path) -> bool {
    self.files.contains_key(path)
  }
}

#[test]
fn test_clones_share_files() {
  let fs = MemoryFileSystem::new();
  let other = fs.clone();
  let path = Path::new("src/pages/Home.bundle.meta.json");

  other.write(path, b"{}").unwrap();
  other.write(path, b"[]").unwrap();

  assert!(fs.exists(path));
  assert_eq!(fs.read_to_string(path).unwrap(), "[]");
  assert_eq!(fs.write_count(), 2);
  assert_eq!(fs.paths(), vec![path.to_path_buf()]);
}

#[test]
fn test_read_missing_file() {
  let fs = MemoryFileSystem::new();
  let err = fs.read(Path::new("nope.json")).unwrap_err();
  assert_eq!(err.kind(), io::ErrorKind::NotFound);
}
