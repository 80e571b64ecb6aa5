const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Renders a byte count the way esbuild's analysis does: `512b`, `1.5kb`, `2.0mb`.
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
  match bytes {
    b if b < KB => format!("{b}b"),
    b if b < MB => format!("{:.1}kb", b as f64 / KB as f64),
    b if b < GB => format!("{:.1}mb", b as f64 / MB as f64),
    b => format!("{:.1}gb", b as f64 / GB as f64),
  }
}

#[test]
fn test_format_bytes() {
  assert_eq!(format_bytes(0), "0b");
  assert_eq!(format_bytes(1023), "1023b");
  assert_eq!(format_bytes(1024), "1.0kb");
  assert_eq!(format_bytes(1536), "1.5kb");
  assert_eq!(format_bytes(3 * MB / 2), "1.5mb");
  assert_eq!(format_bytes(GB), "1.0gb");
}
