use std::{fmt::Display, str::FromStr};

use serde::Deserialize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
  #[default]
  Node,
  Browser,
  Neutral,
}

impl FromStr for Platform {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "node" => Ok(Self::Node),
      "browser" => Ok(Self::Browser),
      "neutral" => Ok(Self::Neutral),
      _ => Err(format!("Invalid platform \"{s}\".")),
    }
  }
}

impl Display for Platform {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Node => write!(f, "node"),
      Self::Browser => write!(f, "browser"),
      Self::Neutral => write!(f, "neutral"),
    }
  }
}
