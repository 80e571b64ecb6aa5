pub mod analyze_metafile;
pub mod derive_file_names;
pub mod normalize_options;
