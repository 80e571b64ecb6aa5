use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The engine's build report. The document is owned by the engine and kept verbatim; only the
/// parts needed for the size analysis are ever read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metafile(Value);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetafileOutput {
  pub path: String,
  pub bytes: u64,
  pub inputs: Vec<MetafileOutputInput>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetafileOutputInput {
  pub path: String,
  pub bytes_in_output: u64,
}

#[derive(Deserialize)]
struct OutputsView {
  #[serde(default)]
  outputs: IndexMap<String, OutputView>,
}

#[derive(Deserialize)]
struct OutputView {
  bytes: u64,
  #[serde(default)]
  inputs: IndexMap<String, InputView>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InputView {
  bytes_in_output: u64,
}

impl Metafile {
  pub fn from_json(json: &str) -> anyhow::Result<Self> {
    let value: Value = serde_json::from_str(json)?;
    if !value.is_object() {
      anyhow::bail!("Expected the metafile to be a JSON object");
    }
    Ok(Self(value))
  }

  /// Compact JSON, keys in the order the engine produced them.
  pub fn to_json(&self) -> String {
    self.0.to_string()
  }

  pub fn outputs(&self) -> anyhow::Result<Vec<MetafileOutput>> {
    let view = OutputsView::deserialize(&self.0)?;
    Ok(
      view
        .outputs
        .into_iter()
        .map(|(path, output)| MetafileOutput {
          path,
          bytes: output.bytes,
          inputs: output
            .inputs
            .into_iter()
            .map(|(path, input)| MetafileOutputInput {
              path,
              bytes_in_output: input.bytes_in_output,
            })
            .collect(),
        })
        .collect(),
    )
  }
}

impl From<Value> for Metafile {
  fn from(value: Value) -> Self {
    Self(value)
  }
}

#[test]
fn test_metafile_keeps_document_verbatim() {
  let json = r#"{"inputs":{"src/b.js":{"bytes":3,"imports":[]},"src/a.js":{"bytes":5,"imports":[]}},"outputs":{}}"#;
  let metafile = Metafile::from_json(json).unwrap();
  assert_eq!(metafile.to_json(), json);
}

#[test]
fn test_metafile_outputs_view() {
  let metafile = Metafile::from_json(
    r#"{
      "inputs": {},
      "outputs": {
        "out/Home.bundle.mjs": {
          "bytes": 120,
          "imports": [],
          "exports": ["default"],
          "entryPoint": "src/Home.jsx",
          "inputs": { "src/Home.jsx": { "bytesInOutput": 100 }, "src/util.js": { "bytesInOutput": 20 } }
        }
      }
    }"#,
  )
  .unwrap();

  let outputs = metafile.outputs().unwrap();
  assert_eq!(outputs.len(), 1);
  assert_eq!(outputs[0].path, "out/Home.bundle.mjs");
  assert_eq!(outputs[0].bytes, 120);
  assert_eq!(
    outputs[0].inputs,
    vec![
      MetafileOutputInput { path: "src/Home.jsx".to_string(), bytes_in_output: 100 },
      MetafileOutputInput { path: "src/util.js".to_string(), bytes_in_output: 20 },
    ]
  );
}

#[test]
fn test_metafile_rejects_non_object() {
  assert!(Metafile::from_json("[]").is_err());
  assert!(Metafile::from_json("not json").is_err());
}
