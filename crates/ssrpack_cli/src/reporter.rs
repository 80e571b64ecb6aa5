use std::path::Path;

use ansi_term::Colour;
use ssrpack::{BuildStatus, Reporter};
use ssrpack_utils::path_ext::PathExt;

const PREFIX: &str = "[ssrpack]";

#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
  colored: bool,
}

impl ConsoleReporter {
  pub fn new(colored: bool) -> Self {
    Self { colored }
  }

  pub fn render_status(&self, status: BuildStatus, entry: &Path, bundle: &Path) -> String {
    let message = match status {
      BuildStatus::Rebuilt => "esbuild rebuilt",
      BuildStatus::Skipped => "esbuild rebuild not required for",
    };
    let entry = entry.to_slash_string();
    let bundle = bundle.to_slash_string();

    if !self.colored {
      return format!("{PREFIX} {message} {entry} => {bundle}");
    }

    let magenta = Colour::Purple;
    format!(
      "{} {} {} {}",
      magenta.paint(format!("{PREFIX} {message}")),
      Colour::Cyan.bold().paint(entry),
      magenta.paint("=>"),
      Colour::Cyan.paint(bundle)
    )
  }
}

impl Reporter for ConsoleReporter {
  fn analysis(&self, text: &str) {
    println!("{text}");
  }

  fn status(&self, status: BuildStatus, entry: &Path, bundle: &Path) {
    println!("{}", self.render_status(status, entry, bundle));
  }
}

#[test]
fn test_render_status_plain() {
  let reporter = ConsoleReporter::new(false);
  let entry = Path::new("src/pages/Home.jsx");
  let bundle = Path::new("src/pages").join("Home.bundle.mjs");

  assert_eq!(
    reporter.render_status(BuildStatus::Rebuilt, entry, &bundle),
    "[ssrpack] esbuild rebuilt src/pages/Home.jsx => src/pages/Home.bundle.mjs"
  );
  assert_eq!(
    reporter.render_status(BuildStatus::Skipped, entry, &bundle),
    "[ssrpack] esbuild rebuild not required for src/pages/Home.jsx => src/pages/Home.bundle.mjs"
  );
}

#[test]
fn test_render_status_colored() {
  let line = ConsoleReporter::new(true).render_status(
    BuildStatus::Rebuilt,
    Path::new("Home.js"),
    Path::new("Home.bundle.js"),
  );
  assert!(line.contains("\u{1b}["));
  assert!(line.contains("Home.bundle.js"));
}
