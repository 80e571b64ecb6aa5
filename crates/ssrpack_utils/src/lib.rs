pub mod format_bytes;
pub mod path_ext;
