use ssrpack_common::{BundlerOptions, NormalizedBundlerOptions};
use sugar_path::SugarPath;

pub fn normalize_options(raw_options: BundlerOptions) -> NormalizedBundlerOptions {
  let defaults = NormalizedBundlerOptions::default();

  NormalizedBundlerOptions {
    platform: raw_options.platform.unwrap_or(defaults.platform),
    target: raw_options.target.filter(|target| !target.is_empty()).unwrap_or(defaults.target),
    minify: raw_options.minify.unwrap_or(defaults.minify),
    cwd: raw_options.cwd.map(|cwd| cwd.absolutize()),
  }
}

#[test]
fn test_defaults_to_server_build() {
  use ssrpack_common::Platform;

  let options = normalize_options(BundlerOptions::default());
  assert_eq!(options.platform, Platform::Node);
  assert_eq!(options.target, "node18");
  assert!(!options.minify);
  assert_eq!(options.cwd, None);
}

#[test]
fn test_keeps_explicit_values() {
  use ssrpack_common::Platform;

  let options = normalize_options(BundlerOptions {
    platform: Some(Platform::Neutral),
    target: Some("node20".to_string()),
    minify: Some(true),
    cwd: Some("project".into()),
  });
  assert_eq!(options.platform, Platform::Neutral);
  assert_eq!(options.target, "node20");
  assert!(options.minify);
  let cwd = options.cwd.unwrap();
  assert!(cwd.is_absolute());
  assert!(cwd.ends_with("project"));
}
