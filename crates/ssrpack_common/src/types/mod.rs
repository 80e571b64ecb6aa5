pub mod build_config;
pub mod build_output;
pub mod build_request;
pub mod metafile;
