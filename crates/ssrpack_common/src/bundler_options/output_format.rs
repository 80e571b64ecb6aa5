use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  #[default]
  Esm,
  #[serde(alias = "commonjs")]
  Cjs,
}

impl OutputFormat {
  /// Suffix that replaces the `.js`/`.jsx` extension of the entry file.
  #[inline]
  pub fn bundle_suffix(self) -> &'static str {
    match self {
      Self::Esm => ".bundle.mjs",
      Self::Cjs => ".bundle.js",
    }
  }
}

impl FromStr for OutputFormat {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "esm" => Ok(Self::Esm),
      "cjs" | "commonjs" => Ok(Self::Cjs),
      _ => Err(format!("Invalid format \"{s}\".")),
    }
  }
}

impl Display for OutputFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Esm => write!(f, "esm"),
      Self::Cjs => write!(f, "cjs"),
    }
  }
}

#[test]
fn test_output_format_from_str() {
  assert_eq!("esm".parse::<OutputFormat>().unwrap(), OutputFormat::Esm);
  assert_eq!("commonjs".parse::<OutputFormat>().unwrap(), OutputFormat::Cjs);
  assert_eq!("cjs".parse::<OutputFormat>().unwrap(), OutputFormat::Cjs);
  assert!("umd".parse::<OutputFormat>().is_err());
}

#[test]
fn test_output_format_deserialize_alias() {
  let format: OutputFormat = serde_json::from_str("\"commonjs\"").unwrap();
  assert_eq!(format, OutputFormat::Cjs);
  assert_eq!(format.to_string(), "cjs");
  assert_eq!(format.bundle_suffix(), ".bundle.js");
}
