use ssrpack_common::{Metafile, MetafileOutput};
use ssrpack_utils::format_bytes::format_bytes;

struct Row {
  label: String,
  size: String,
  percent: String,
}

/// Human readable size breakdown of every output in `metafile`, largest first.
///
/// ```text
///
///   out/Home.bundle.mjs  2.0kb  100.0%
///    ├ src/Home.jsx      1.5kb   75.0%
///    └ src/util.js        512b   25.0%
/// ```
pub fn analyze_metafile(metafile: &Metafile) -> anyhow::Result<String> {
  let mut outputs = metafile.outputs()?;
  outputs.sort_by(|a, b| b.bytes.cmp(&a.bytes).then_with(|| a.path.cmp(&b.path)));

  let blocks = outputs.into_iter().map(rows_of_output).collect::<Vec<_>>();

  let label_width =
    blocks.iter().flatten().map(|row| row.label.chars().count()).max().unwrap_or_default();
  let size_width = blocks.iter().flatten().map(|row| row.size.len()).max().unwrap_or_default();

  let mut text = String::from("\n");
  for (index, rows) in blocks.iter().enumerate() {
    if index > 0 {
      text.push('\n');
    }
    for row in rows {
      let padding = label_width - row.label.chars().count();
      text.push_str(&format!(
        "{}{:padding$}  {:>size_width$}  {:>6}\n",
        row.label, "", row.size, row.percent
      ));
    }
  }
  Ok(text)
}

fn rows_of_output(mut output: MetafileOutput) -> Vec<Row> {
  output.inputs.sort_by(|a, b| {
    b.bytes_in_output.cmp(&a.bytes_in_output).then_with(|| a.path.cmp(&b.path))
  });

  let mut rows = Vec::with_capacity(output.inputs.len() + 1);
  rows.push(Row {
    label: format!("  {}", output.path),
    size: format_bytes(output.bytes),
    percent: "100.0%".to_string(),
  });

  let last = output.inputs.len().saturating_sub(1);
  for (index, input) in output.inputs.iter().enumerate() {
    let branch = if index == last { '└' } else { '├' };
    rows.push(Row {
      label: format!("   {branch} {}", input.path),
      size: format_bytes(input.bytes_in_output),
      percent: format!("{:.1}%", percentage(input.bytes_in_output, output.bytes)),
    });
  }
  rows
}

#[allow(clippy::cast_precision_loss)]
fn percentage(part: u64, total: u64) -> f64 {
  if total == 0 {
    0.0
  } else {
    part as f64 * 100.0 / total as f64
  }
}

#[test]
fn test_analyze_single_output() {
  let metafile = Metafile::from_json(
    r#"{"inputs":{},"outputs":{"out/Home.bundle.mjs":{"bytes":2048,"inputs":{
      "src/util.js":{"bytesInOutput":512},
      "src/Home.jsx":{"bytesInOutput":1536}
    }}}}"#,
  )
  .unwrap();

  let expected = "\n".to_string()
    + "  out/Home.bundle.mjs  2.0kb  100.0%\n"
    + "   ├ src/Home.jsx      1.5kb   75.0%\n"
    + "   └ src/util.js        512b   25.0%\n";
  assert_eq!(analyze_metafile(&metafile).unwrap(), expected);
}

#[test]
fn test_analyze_orders_outputs_by_size() {
  let metafile = Metafile::from_json(
    r#"{"outputs":{
      "small.js":{"bytes":10,"inputs":{}},
      "big.js":{"bytes":20,"inputs":{"a.js":{"bytesInOutput":20}}}
    }}"#,
  )
  .unwrap();

  let text = analyze_metafile(&metafile).unwrap();
  let expected = "\n".to_string()
    + "  big.js    20b  100.0%\n"
    + "   └ a.js   20b  100.0%\n"
    + "\n"
    + "  small.js  10b  100.0%\n";
  assert_eq!(text, expected);
}

#[test]
fn test_analyze_empty_metafile() {
  let metafile = Metafile::from_json("{}").unwrap();
  assert_eq!(analyze_metafile(&metafile).unwrap(), "\n");
}
