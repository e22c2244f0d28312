//! Core classification logic: text extraction and response normalization.

pub mod extractor;
pub mod normalizer;

pub use extractor::{cleanup_details, extract_rule_triggered, truncate_with_ellipsis};
pub use normalizer::{
    normalize, parse_compliance_response, try_parse_compliance_response, Strategy,
};
