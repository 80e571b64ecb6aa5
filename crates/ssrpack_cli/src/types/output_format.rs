use clap::ValueEnum;

#[derive(PartialEq, Eq, Clone, Copy, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum OutputFormat {
  Esm,
  #[value(alias = "commonjs")]
  Cjs,
}

impl From<OutputFormat> for ssrpack::OutputFormat {
  fn from(value: OutputFormat) -> Self {
    match value {
      OutputFormat::Esm => ssrpack::OutputFormat::Esm,
      OutputFormat::Cjs => ssrpack::OutputFormat::Cjs,
    }
  }
}
