use std::{
  borrow::Cow,
  path::{Path, PathBuf},
};

use anyhow::anyhow;
use sugar_path::SugarPath;
use tracing::debug;

use ssrpack_common::{BuildConfig, BuildRequest, BundlerOptions, NormalizedBundlerOptions};
use ssrpack_error::BuildResult;
use ssrpack_fs::FileSystem;

use crate::{
  utils::{
    analyze_metafile::analyze_metafile,
    derive_file_names::{derive_file_names, BundleFileNames},
    normalize_options::normalize_options,
  },
  BuildStatus, Bundler, Reporter,
};

/// Bundles server-side entries on demand and tells the caller where each bundle lives.
pub struct ModuleEvaluator<B, F, R> {
  bundler: B,
  fs: F,
  reporter: R,
  options: NormalizedBundlerOptions,
}

impl<B: Bundler, F: FileSystem, R: Reporter> ModuleEvaluator<B, F, R> {
  pub fn new(bundler: B, fs: F, reporter: R, options: BundlerOptions) -> Self {
    Self { bundler, fs, reporter, options: normalize_options(options) }
  }

  pub fn options(&self) -> &NormalizedBundlerOptions {
    &self.options
  }

  pub fn bundler(&self) -> &B {
    &self.bundler
  }

  pub fn fs(&self) -> &F {
    &self.fs
  }

  pub fn reporter(&self) -> &R {
    &self.reporter
  }

  /// Relative entries are taken from `options.cwd` when one is configured, so the outfile, the
  /// metafile and the returned path all share the directory the engine runs in.
  fn resolve_entry<'a>(&self, entry_path: &'a Path) -> Cow<'a, Path> {
    match &self.options.cwd {
      Some(cwd) => Cow::Owned(entry_path.absolutize_with(cwd.as_path())),
      None => Cow::Borrowed(entry_path),
    }
  }

  /// Rebuilds the entry when `request.rebuild_required` is set and returns the bundle path.
  ///
  /// The returned path is `<entry dir>/<entry stem>.bundle.{mjs,js}` whether or not a build ran.
  /// Engine and file system failures are returned as-is and no status line is reported for them.
  #[tracing::instrument(level = "info", skip_all, fields(entry = %request.entry_path.display()))]
  pub async fn evaluate(&self, request: &BuildRequest) -> BuildResult<PathBuf> {
    let entry_path = self.resolve_entry(&request.entry_path);
    let BundleFileNames { bundle, meta } =
      derive_file_names(&entry_path, request.format, request.emit_meta_to_file)?;

    let output_dir = entry_path.parent().unwrap_or_else(|| Path::new(""));
    let bundle_path = output_dir.join(bundle);
    debug!(bundle = %bundle_path.display(), meta = ?meta, "Derived output names");

    if !request.rebuild_required {
      self.reporter.status(BuildStatus::Skipped, &entry_path, &bundle_path);
      return Ok(bundle_path);
    }

    let config = BuildConfig {
      entry_points: vec![entry_path.to_path_buf()],
      platform: self.options.platform,
      target: self.options.target.clone(),
      bundle: true,
      minify: self.options.minify,
      metafile: request.collects_metafile(),
      outfile: bundle_path.clone(),
      format: request.format,
    };
    let output = self.bundler.build(&config).await?;

    if request.collects_metafile() {
      let metafile = output.metafile.ok_or_else(|| {
        anyhow!("The bundler returned no metafile for {}", entry_path.display())
      })?;

      if request.emit_meta_to_console {
        self.reporter.analysis(&analyze_metafile(&metafile)?);
      }

      if let Some(meta) = meta {
        let meta_path = output_dir.join(meta);
        debug!(meta = %meta_path.display(), "Writing metafile");
        self.fs.write(&meta_path, metafile.to_json().as_bytes())?;
      }
    }

    self.reporter.status(BuildStatus::Rebuilt, &entry_path, &bundle_path);
    Ok(bundle_path)
  }
}

#[cfg(test)]
pub(crate) mod test_support {
  use std::{
    path::Path,
    sync::{Arc, Mutex},
  };

  use ssrpack_common::{BuildConfig, BuildOutput, Metafile};
  use ssrpack_error::BuildResult;
  use ssrpack_fs::{FileSystem, MemoryFileSystem};

  use crate::{BuildStatus, Bundler, Reporter};

  /// Records every build and writes a fake bundle into the shared memory file system.
  pub struct MockBundler {
    pub fs: MemoryFileSystem,
    pub calls: Mutex<Vec<BuildConfig>>,
    pub fail_with: Option<String>,
    pub omit_metafile: bool,
  }

  impl MockBundler {
    pub fn new(fs: MemoryFileSystem) -> Self {
      Self { fs, calls: Mutex::default(), fail_with: None, omit_metafile: false }
    }

    pub fn calls(&self) -> Vec<BuildConfig> {
      self.calls.lock().unwrap().clone()
    }
  }

  impl Bundler for MockBundler {
    async fn build(&self, config: &BuildConfig) -> BuildResult<BuildOutput> {
      self.calls.lock().unwrap().push(config.clone());
      if let Some(message) = &self.fail_with {
        return Err(anyhow::anyhow!("{message}").into());
      }

      self.fs.write(&config.outfile, b"export default function Page() {}")?;
      let metafile = (config.metafile && !self.omit_metafile).then(|| {
        Metafile::from(serde_json::json!({
          "inputs": { "src/pages/Home.jsx": { "bytes": 34, "imports": [] } },
          "outputs": {
            (config.outfile.to_string_lossy().into_owned()): {
              "bytes": 34,
              "inputs": { "src/pages/Home.jsx": { "bytesInOutput": 34 } }
            }
          }
        }))
      });
      Ok(BuildOutput { metafile })
    }
  }

  #[derive(Debug, Clone, PartialEq, Eq)]
  pub enum Reported {
    Analysis(String),
    Status(BuildStatus, String, String),
  }

  #[derive(Default, Clone)]
  pub struct RecordingReporter {
    pub events: Arc<Mutex<Vec<Reported>>>,
  }

  impl RecordingReporter {
    pub fn events(&self) -> Vec<Reported> {
      self.events.lock().unwrap().clone()
    }
  }

  impl Reporter for RecordingReporter {
    fn analysis(&self, text: &str) {
      self.events.lock().unwrap().push(Reported::Analysis(text.to_string()));
    }

    fn status(&self, status: BuildStatus, entry: &Path, bundle: &Path) {
      self.events.lock().unwrap().push(Reported::Status(
        status,
        entry.to_string_lossy().into_owned(),
        bundle.to_string_lossy().into_owned(),
      ));
    }
  }
}

#[cfg(test)]
fn evaluator() -> ModuleEvaluator<
  test_support::MockBundler,
  ssrpack_fs::MemoryFileSystem,
  test_support::RecordingReporter,
> {
  let fs = ssrpack_fs::MemoryFileSystem::new();
  ModuleEvaluator::new(
    test_support::MockBundler::new(fs.clone()),
    fs,
    test_support::RecordingReporter::default(),
    BundlerOptions::default(),
  )
}

#[tokio::test]
async fn test_rebuild_esm_entry() {
  use ssrpack_common::{OutputFormat, Platform};
  use test_support::Reported;

  let evaluator = evaluator();
  let request = BuildRequest::new("src/pages/Home.jsx", OutputFormat::Esm);

  let bundle_path = evaluator.evaluate(&request).await.unwrap();
  assert_eq!(bundle_path, Path::new("src/pages").join("Home.bundle.mjs"));

  let calls = evaluator.bundler().calls();
  assert_eq!(
    calls,
    vec![BuildConfig {
      entry_points: vec![PathBuf::from("src/pages/Home.jsx")],
      platform: Platform::Node,
      target: "node18".to_string(),
      bundle: true,
      minify: false,
      metafile: false,
      outfile: bundle_path.clone(),
      format: OutputFormat::Esm,
    }]
  );
  assert!(evaluator.fs().exists(&bundle_path));
  assert_eq!(evaluator.fs().paths(), vec![bundle_path.clone()]);
  assert_eq!(
    evaluator.reporter().events(),
    vec![Reported::Status(
      BuildStatus::Rebuilt,
      "src/pages/Home.jsx".to_string(),
      bundle_path.to_string_lossy().into_owned()
    )]
  );
}

#[tokio::test]
async fn test_skip_build() {
  use ssrpack_common::OutputFormat;
  use test_support::Reported;

  let evaluator = evaluator();
  let request = BuildRequest::new("src/pages/Home.js", OutputFormat::Cjs)
    .with_rebuild_required(false)
    .with_meta_to_console(true)
    .with_meta_to_file(true);

  let bundle_path = evaluator.evaluate(&request).await.unwrap();
  assert_eq!(bundle_path, Path::new("src/pages").join("Home.bundle.js"));
  assert!(evaluator.bundler().calls().is_empty());
  assert_eq!(evaluator.fs().write_count(), 0);
  assert_eq!(
    evaluator.reporter().events(),
    vec![Reported::Status(
      BuildStatus::Skipped,
      "src/pages/Home.js".to_string(),
      bundle_path.to_string_lossy().into_owned()
    )]
  );
}

#[tokio::test]
async fn test_meta_to_file() {
  use ssrpack_common::OutputFormat;

  let evaluator = evaluator();
  let request = BuildRequest::new("a/b/c/widget.jsx", OutputFormat::Cjs).with_meta_to_file(true);

  let bundle_path = evaluator.evaluate(&request).await.unwrap();
  let meta_path = Path::new("a/b/c").join("widget.bundle.meta.json");
  assert_eq!(bundle_path, Path::new("a/b/c").join("widget.bundle.js"));
  assert_eq!(evaluator.fs().paths(), vec![bundle_path, meta_path.clone()]);
  assert!(evaluator.bundler().calls()[0].metafile);

  let json = evaluator.fs().read_to_string(&meta_path).unwrap();
  let value: serde_json::Value = serde_json::from_str(&json).unwrap();
  assert!(value["outputs"].is_object());
  // Only the status line, no analysis.
  assert_eq!(evaluator.reporter().events().len(), 1);
}

#[tokio::test]
async fn test_meta_to_console_only() {
  use ssrpack_common::OutputFormat;
  use test_support::Reported;

  let evaluator = evaluator();
  let request = BuildRequest::new("src/pages/Home.jsx", OutputFormat::Esm).with_meta_to_console(true);

  let bundle_path = evaluator.evaluate(&request).await.unwrap();
  assert!(evaluator.bundler().calls()[0].metafile);
  assert_eq!(evaluator.fs().paths(), vec![bundle_path]);

  let events = evaluator.reporter().events();
  assert_eq!(events.len(), 2);
  let Reported::Analysis(text) = &events[0] else { panic!("expected analysis first: {events:?}") };
  assert!(text.contains("src/pages/Home.jsx"));
  assert!(text.contains("100.0%"));
  assert!(matches!(events[1], Reported::Status(BuildStatus::Rebuilt, ..)));
}

#[tokio::test]
async fn test_bare_file_name() {
  use ssrpack_common::OutputFormat;

  let evaluator = evaluator();
  let request = BuildRequest::new("Home.jsx", OutputFormat::Esm);

  let bundle_path = evaluator.evaluate(&request).await.unwrap();
  assert_eq!(bundle_path, PathBuf::from("Home.bundle.mjs"));
  assert_eq!(evaluator.bundler().calls()[0].outfile, bundle_path);
}

#[tokio::test]
async fn test_bundler_failure_propagates() {
  use ssrpack_common::OutputFormat;

  let fs = ssrpack_fs::MemoryFileSystem::new();
  let mut bundler = test_support::MockBundler::new(fs.clone());
  bundler.fail_with = Some("Could not resolve \"./missing\"".to_string());
  let evaluator =
    ModuleEvaluator::new(bundler, fs, test_support::RecordingReporter::default(), BundlerOptions::default());

  let request = BuildRequest::new("src/pages/Home.jsx", OutputFormat::Esm).with_meta_to_file(true);
  let errors = evaluator.evaluate(&request).await.unwrap_err();
  assert_eq!(errors.len(), 1);
  assert_eq!(errors[0].to_string(), "Could not resolve \"./missing\"");
  assert_eq!(evaluator.fs().write_count(), 0);
  assert!(evaluator.reporter().events().is_empty());
}

#[tokio::test]
async fn test_invalid_entry_fails_fast() {
  use ssrpack_common::OutputFormat;

  let evaluator = evaluator();
  let request = BuildRequest::new("src/pages/Home.tsx", OutputFormat::Esm);

  let errors = evaluator.evaluate(&request).await.unwrap_err();
  assert!(errors[0].to_string().contains("must end in `.js` or `.jsx`"));
  assert!(evaluator.bundler().calls().is_empty());
  assert!(evaluator.reporter().events().is_empty());
}

#[tokio::test]
async fn test_custom_options_reach_the_bundler() {
  use ssrpack_common::{OutputFormat, Platform};

  let fs = ssrpack_fs::MemoryFileSystem::new();
  let evaluator = ModuleEvaluator::new(
    test_support::MockBundler::new(fs.clone()),
    fs,
    test_support::RecordingReporter::default(),
    BundlerOptions {
      platform: Some(Platform::Neutral),
      target: Some("node20".into()),
      minify: Some(true),
      cwd: None,
    },
  );

  assert_eq!(evaluator.options().target, "node20");
  evaluator.evaluate(&BuildRequest::new("src/entry.js", OutputFormat::Cjs)).await.unwrap();
  let config = &evaluator.bundler().calls()[0];
  assert_eq!(config.platform, Platform::Neutral);
  assert_eq!(config.target, "node20");
  assert!(config.minify);
  assert_eq!(config.outfile, Path::new("src").join("entry.bundle.js"));
}

#[tokio::test]
async fn test_missing_metafile_fails_without_writing() {
  use ssrpack_common::OutputFormat;

  let fs = ssrpack_fs::MemoryFileSystem::new();
  let mut bundler = test_support::MockBundler::new(fs.clone());
  bundler.omit_metafile = true;
  let evaluator = ModuleEvaluator::new(
    bundler,
    fs,
    test_support::RecordingReporter::default(),
    BundlerOptions::default(),
  );

  let request = BuildRequest::new("src/pages/Home.jsx", OutputFormat::Esm).with_meta_to_file(true);
  let errors = evaluator.evaluate(&request).await.unwrap_err();
  assert!(errors[0].to_string().contains("returned no metafile"));
  assert!(!evaluator.fs().exists(&Path::new("src/pages").join("Home.bundle.meta.json")));
  assert_eq!(evaluator.fs().paths(), vec![Path::new("src/pages").join("Home.bundle.mjs")]);
  assert!(evaluator.reporter().events().is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn test_cwd_is_the_base_of_every_output() {
  use ssrpack_common::OutputFormat;
  use test_support::Reported;

  let fs = ssrpack_fs::MemoryFileSystem::new();
  let evaluator = ModuleEvaluator::new(
    test_support::MockBundler::new(fs.clone()),
    fs,
    test_support::RecordingReporter::default(),
    BundlerOptions { cwd: Some("/work".into()), ..BundlerOptions::default() },
  );

  let request = BuildRequest::new("src/pages/Home.jsx", OutputFormat::Esm).with_meta_to_file(true);
  let bundle_path = evaluator.evaluate(&request).await.unwrap();

  assert_eq!(bundle_path, PathBuf::from("/work/src/pages/Home.bundle.mjs"));
  let config = &evaluator.bundler().calls()[0];
  assert_eq!(config.entry_points, vec![PathBuf::from("/work/src/pages/Home.jsx")]);
  assert_eq!(config.outfile, bundle_path);
  assert_eq!(
    evaluator.fs().paths(),
    vec![PathBuf::from("/work/src/pages/Home.bundle.meta.json"), bundle_path.clone()]
  );
  assert_eq!(
    evaluator.reporter().events(),
    vec![Reported::Status(
      BuildStatus::Rebuilt,
      "/work/src/pages/Home.jsx".to_string(),
      "/work/src/pages/Home.bundle.mjs".to_string()
    )]
  );
}
