use clap::ValueEnum;

#[derive(PartialEq, Eq, Clone, Copy, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum Platform {
  Node,
  Browser,
  Neutral,
}

impl From<Platform> for ssrpack::Platform {
  fn from(value: Platform) -> Self {
    match value {
      Platform::Node => ssrpack::Platform::Node,
      Platform::Browser => ssrpack::Platform::Browser,
      Platform::Neutral => ssrpack::Platform::Neutral,
    }
  }
}
