//! Input/Output for quantification files and stored objects

mod json;
mod quantification;
mod tsv;

pub use json::{read_json, write_json};
pub use quantification::{read_quantification, QuantificationRecord};
pub use tsv::{write_enhanced_matrix, write_expression_matrix};
