mod diagnostics;

use std::{
  path::{Path, PathBuf},
  process::Stdio,
};

use anyhow::Context;
use tokio::process::Command;
use tracing::{debug, warn};

use ssrpack_common::{BuildConfig, BuildOutput, Metafile};
use ssrpack_error::BuildResult;
use ssrpack_utils::path_ext::PathExt;

use crate::Bundler;

use self::diagnostics::{collect_diagnostics, errors_from_stderr, WARNING_MARKER};

/// Same variable the esbuild npm package honours for a custom binary location.
pub const ESBUILD_BINARY_PATH: &str = "ESBUILD_BINARY_PATH";

#[derive(Debug, Default, Clone)]
pub struct EsbuildOptions {
  pub binary: Option<PathBuf>,
  /// Directory esbuild runs in. Relative entry and output paths are resolved against it.
  pub cwd: Option<PathBuf>,
}

/// Runs the esbuild CLI as a child process.
#[derive(Debug, Clone)]
pub struct EsbuildBundler {
  binary: PathBuf,
  cwd: Option<PathBuf>,
}

impl EsbuildBundler {
  pub fn new(options: EsbuildOptions) -> Self {
    let binary = resolve_binary(options.binary, options.cwd.as_deref());
    Self { binary, cwd: options.cwd }
  }

  pub fn binary(&self) -> &Path {
    &self.binary
  }
}

fn resolve_binary(binary: Option<PathBuf>, cwd: Option<&Path>) -> PathBuf {
  if let Some(binary) = binary {
    return binary;
  }
  if let Some(binary) = std::env::var_os(ESBUILD_BINARY_PATH).filter(|value| !value.is_empty()) {
    return binary.into();
  }

  let executable = if cfg!(windows) { "esbuild.cmd" } else { "esbuild" };
  let local = cwd.unwrap_or_else(|| Path::new("")).join("node_modules").join(".bin").join(executable);
  if local.is_file() {
    return local;
  }
  PathBuf::from("esbuild")
}

pub fn build_args(config: &BuildConfig, metafile: Option<&Path>) -> Vec<String> {
  let mut args = config.entry_points.iter().map(|entry| entry.to_slash_string()).collect::<Vec<_>>();

  if config.bundle {
    args.push("--bundle".to_string());
  }
  args.push(format!("--platform={}", config.platform));
  args.push(format!("--target={}", config.target));
  args.push(format!("--format={}", config.format));
  args.push(format!("--outfile={}", config.outfile.to_slash_string()));
  if config.minify {
    args.push("--minify".to_string());
  }
  if let Some(metafile) = metafile {
    args.push(format!("--metafile={}", metafile.to_slash_string()));
  }
  args.push("--log-level=warning".to_string());
  args
}

impl Bundler for EsbuildBundler {
  async fn build(&self, config: &BuildConfig) -> BuildResult<BuildOutput> {
    let metafile_path = if config.metafile {
      Some(tempfile::Builder::new().prefix("ssrpack-").suffix(".meta.json").tempfile()?.into_temp_path())
    } else {
      None
    };

    let args = build_args(config, metafile_path.as_deref());
    debug!(binary = %self.binary.display(), ?args, "Spawning esbuild");

    let mut command = Command::new(&self.binary);
    command.args(&args).stdin(Stdio::null()).kill_on_drop(true);
    if let Some(cwd) = &self.cwd {
      command.current_dir(cwd);
    }

    let output = command
      .output()
      .await
      .with_context(|| format!("Failed to run esbuild at {}", self.binary.display()))?;

    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    if !output.status.success() {
      return Err(errors_from_stderr(&stderr, output.status));
    }
    for warning in collect_diagnostics(&stderr, WARNING_MARKER) {
      warn!("{warning}");
    }

    let metafile = match metafile_path {
      Some(path) => {
        let json = tokio::fs::read_to_string(&path).await?;
        Some(Metafile::from_json(&json).context("esbuild wrote an unreadable metafile")?)
      }
      None => None,
    };

    Ok(BuildOutput { metafile })
  }
}

#[cfg(test)]
fn config(outfile: PathBuf, metafile: bool) -> BuildConfig {
  BuildConfig {
    entry_points: vec![PathBuf::from("src/pages/Home.jsx")],
    platform: ssrpack_common::Platform::Node,
    target: "node18".to_string(),
    bundle: true,
    minify: false,
    metafile,
    outfile,
    format: ssrpack_common::OutputFormat::Esm,
  }
}

#[test]
fn test_build_args() {
  let args = build_args(&config(PathBuf::from("src/pages/Home.bundle.mjs"), false), None);
  assert_eq!(
    args,
    vec![
      "src/pages/Home.jsx",
      "--bundle",
      "--platform=node",
      "--target=node18",
      "--format=esm",
      "--outfile=src/pages/Home.bundle.mjs",
      "--log-level=warning",
    ]
  );
}

#[test]
fn test_build_args_with_minify_and_metafile() {
  let mut config = config(PathBuf::from("out/Home.bundle.js"), true);
  config.minify = true;
  config.format = ssrpack_common::OutputFormat::Cjs;

  let args = build_args(&config, Some(Path::new("/tmp/meta.json")));
  assert!(args.contains(&"--format=cjs".to_string()));
  assert!(args.contains(&"--minify".to_string()));
  assert!(args.contains(&"--metafile=/tmp/meta.json".to_string()));
}

#[test]
fn test_explicit_binary_wins() {
  let bundler = EsbuildBundler::new(EsbuildOptions {
    binary: Some(PathBuf::from("/opt/esbuild/bin/esbuild")),
    cwd: None,
  });
  assert_eq!(bundler.binary(), Path::new("/opt/esbuild/bin/esbuild"));
}

#[test]
fn test_local_binary_is_found() {
  if std::env::var_os(ESBUILD_BINARY_PATH).is_some() {
    return;
  }
  let dir = tempfile::tempdir().unwrap();
  let bin = dir.path().join("node_modules").join(".bin");
  std::fs::create_dir_all(&bin).unwrap();
  let executable = if cfg!(windows) { "esbuild.cmd" } else { "esbuild" };
  std::fs::write(bin.join(executable), "").unwrap();

  let bundler =
    EsbuildBundler::new(EsbuildOptions { binary: None, cwd: Some(dir.path().to_path_buf()) });
  assert_eq!(bundler.binary(), bin.join(executable));
}

// All scenarios share one test so no other test forks while a script is open for writing.
#[cfg(unix)]
#[tokio::test]
async fn test_builds_with_fake_esbuild() {
  use std::os::unix::fs::PermissionsExt;

  fn write_script(path: &Path, body: &str) {
    std::fs::write(path, format!("#!/bin/sh\n{body}")).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
  }

  let dir = tempfile::tempdir().unwrap();
  let ok_script = dir.path().join("esbuild-ok");
  write_script(
    &ok_script,
    r#"for arg in "$@"; do
  case "$arg" in
    --outfile=*) out="${arg#--outfile=}" ;;
    --metafile=*) meta="${arg#--metafile=}" ;;
  esac
done
echo "export default 1;" > "$out"
if [ -n "$meta" ]; then
  printf '{"inputs":{},"outputs":{"Home.bundle.mjs":{"bytes":18,"inputs":{}}}}' > "$meta"
fi
"#,
  );
  let failing_script = dir.path().join("esbuild-fail");
  write_script(
    &failing_script,
    r#"printf '✘ [ERROR] Could not resolve "./missing"\n\n    src/pages/Home.jsx:1:7:\n\n1 error\n' >&2
exit 1
"#,
  );

  let outfile = dir.path().join("Home.bundle.mjs");
  let bundler =
    EsbuildBundler::new(EsbuildOptions { binary: Some(ok_script), cwd: Some(dir.path().into()) });
  let output = bundler.build(&config(outfile.clone(), true)).await.unwrap();
  assert!(outfile.is_file());
  let metafile = output.metafile.unwrap();
  assert_eq!(metafile.outputs().unwrap()[0].bytes, 18);

  let bundler = EsbuildBundler::new(EsbuildOptions {
    binary: Some(failing_script),
    cwd: Some(dir.path().into()),
  });
  let errors = bundler.build(&config(dir.path().join("x.bundle.mjs"), false)).await.unwrap_err();
  assert_eq!(errors.len(), 1);
  assert!(errors[0].to_string().starts_with("[ERROR] Could not resolve \"./missing\""));

  // A relative entry under a configured cwd: bundle, metafile and returned path agree.
  let project = dir.path().join("project");
  std::fs::create_dir_all(project.join("src").join("pages")).unwrap();
  let evaluator = crate::ModuleEvaluator::new(
    EsbuildBundler::new(EsbuildOptions {
      binary: Some(dir.path().join("esbuild-ok")),
      cwd: Some(project.clone()),
    }),
    ssrpack_fs::OsFileSystem,
    crate::evaluator::test_support::RecordingReporter::default(),
    ssrpack_common::BundlerOptions { cwd: Some(project.clone()), ..Default::default() },
  );
  let request = ssrpack_common::BuildRequest::new("src/pages/Home.jsx", ssrpack_common::OutputFormat::Esm)
    .with_meta_to_file(true);

  let bundle_path = evaluator.evaluate(&request).await.unwrap();
  assert_eq!(bundle_path, project.join("src").join("pages").join("Home.bundle.mjs"));
  assert!(bundle_path.is_file());
  let meta_path = project.join("src").join("pages").join("Home.bundle.meta.json");
  let meta = std::fs::read_to_string(meta_path).unwrap();
  assert!(ssrpack_common::Metafile::from_json(&meta).is_ok());
}
