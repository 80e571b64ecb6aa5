use std::{borrow::Cow, path::Path};

use sugar_path::SugarPath;

pub trait PathExt {
  /// Forward-slash form of the path, falling back to a lossy conversion for non-utf8 paths.
  fn to_slash_string(&self) -> String;

  fn file_name_str(&self) -> Option<&str>;
}

impl PathExt for Path {
  fn to_slash_string(&self) -> String {
    self.to_slash().map_or_else(|| self.to_string_lossy().replace('\\', "/"), Cow::into_owned)
  }

  fn file_name_str(&self) -> Option<&str> {
    self.file_name().and_then(|name| name.to_str())
  }
}

#[test]
fn test_to_slash_string() {
  let path = Path::new("src").join("pages").join("Home.bundle.mjs");
  assert_eq!(path.to_slash_string(), "src/pages/Home.bundle.mjs");
  assert_eq!(Path::new("Home.jsx").to_slash_string(), "Home.jsx");
}

#[test]
fn test_file_name_str() {
  assert_eq!(Path::new("a/b/c/widget.jsx").file_name_str(), Some("widget.jsx"));
  assert_eq!(Path::new("").file_name_str(), None);
}
