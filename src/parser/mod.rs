mod doc_parser;
pub mod text_scan;

pub use doc_parser::{DocParser, classify_and_extract, extract_spec_endpoints, validate_spec};
