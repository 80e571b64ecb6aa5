mod args;
mod reporter;
mod types;

use std::{process::ExitCode, time::Instant};

use ansi_term::Colour;
use args::{EnhanceArgs, InputArgs, OutputArgs};
use clap::Parser;
use futures::future::join_all;
use tracing_subscriber::EnvFilter;

use reporter::ConsoleReporter;
use ssrpack::{
  BuildRequest, BundlerOptions, EsbuildBundler, EsbuildOptions, ModuleEvaluator, OsFileSystem,
};

const LOG_ENV: &str = "SSRPACK_LOG";

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Commands {
  #[clap(flatten)]
  input: InputArgs,

  #[clap(flatten)]
  output: OutputArgs,

  #[clap(flatten)]
  enhance: EnhanceArgs,
}

fn init_tracing(log_level: Option<&str>, colored: bool) {
  let filter = match log_level {
    Some(level) => EnvFilter::new(level),
    None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_ansi(colored)
    .with_writer(std::io::stderr)
    .init();
}

#[tokio::main]
async fn main() -> ExitCode {
  let args = Commands::parse();
  let colored = !args.output.no_color;
  init_tracing(args.output.log_level.as_deref(), colored);

  let InputArgs { entries, skip_build, cwd } = args.input;

  let bundler = EsbuildBundler::new(EsbuildOptions { binary: args.enhance.esbuild, cwd: cwd.clone() });
  let evaluator = ModuleEvaluator::new(
    bundler,
    OsFileSystem,
    ConsoleReporter::new(colored),
    BundlerOptions {
      platform: args.enhance.platform.map(Into::into),
      target: args.enhance.target,
      minify: Some(args.enhance.minify),
      cwd,
    },
  );

  let requests = entries
    .into_iter()
    .map(|entry| {
      BuildRequest::new(entry, args.output.format.into())
        .with_rebuild_required(!skip_build)
        .with_meta_to_console(args.output.meta_display)
        .with_meta_to_file(args.output.meta_file)
    })
    .collect::<Vec<_>>();

  let start = Instant::now();
  let results = join_all(requests.iter().map(|request| evaluator.evaluate(request))).await;

  let mut failed = false;
  for (request, result) in requests.iter().zip(results) {
    if let Err(errors) = result {
      failed = true;
      println!("{} {}", Colour::Red.paint("Failed:"), request.entry_path.display());
      for error in errors.into_vec() {
        println!("{} {:#}", Colour::Red.paint("Error:"), error);
      }
    }
  }

  if failed {
    return ExitCode::FAILURE;
  }

  let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
  println!("\n{} Finished in {}", Colour::Green.paint("✔"), Colour::White.bold().paint(elapsed));
  ExitCode::SUCCESS
}
