use std::path::Path;

use anyhow::anyhow;
use ssrpack_common::OutputFormat;
use ssrpack_utils::path_ext::PathExt;

// `.jsx` first so `Home.jsx` never matches as `Home.jsx` minus `.js`.
const SOURCE_EXTENSIONS: [&str; 2] = [".jsx", ".js"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleFileNames {
  pub bundle: String,
  pub meta: Option<String>,
}

/// Derives the bundle (and optionally metafile) file names from the entry's last path segment.
pub fn derive_file_names(
  entry_path: &Path,
  format: OutputFormat,
  with_meta: bool,
) -> anyhow::Result<BundleFileNames> {
  let file_name = entry_path
    .file_name_str()
    .ok_or_else(|| anyhow!("Entry path \"{}\" has no usable file name", entry_path.display()))?;

  let stem = SOURCE_EXTENSIONS
    .iter()
    .find_map(|extension| file_name.strip_suffix(extension))
    .filter(|stem| !stem.is_empty())
    .ok_or_else(|| {
      anyhow!("Entry file \"{}\" must end in `.js` or `.jsx`", entry_path.display())
    })?;

  Ok(BundleFileNames {
    bundle: format!("{stem}{}", format.bundle_suffix()),
    meta: with_meta.then(|| format!("{stem}.bundle.meta.json")),
  })
}

#[test]
fn test_bundle_name_per_format() {
  let names = derive_file_names(Path::new("src/pages/Home.jsx"), OutputFormat::Esm, false).unwrap();
  assert_eq!(names, BundleFileNames { bundle: "Home.bundle.mjs".to_string(), meta: None });

  let names = derive_file_names(Path::new("src/pages/Home.js"), OutputFormat::Cjs, false).unwrap();
  assert_eq!(names.bundle, "Home.bundle.js");
}

#[test]
fn test_meta_name() {
  let names = derive_file_names(Path::new("a/b/c/widget.jsx"), OutputFormat::Cjs, true).unwrap();
  assert_eq!(names.bundle, "widget.bundle.js");
  assert_eq!(names.meta.as_deref(), Some("widget.bundle.meta.json"));
}

#[test]
fn test_only_trailing_extension_is_replaced() {
  let names = derive_file_names(Path::new("Home.test.js"), OutputFormat::Esm, false).unwrap();
  assert_eq!(names.bundle, "Home.test.bundle.mjs");

  let names = derive_file_names(Path::new("app.jsx.js"), OutputFormat::Esm, false).unwrap();
  assert_eq!(names.bundle, "app.jsx.bundle.mjs");
}

#[test]
fn test_rejects_unrecognized_entries() {
  for entry in ["src/Home.ts", "src/Home.JS", "src/.js", "", "src/pages/", ".."] {
    let err = derive_file_names(Path::new(entry), OutputFormat::Esm, false).unwrap_err();
    let message = err.to_string();
    assert!(
      message.contains("must end in") || message.contains("no usable file name"),
      "{entry}: {message}"
    );
  }
}
