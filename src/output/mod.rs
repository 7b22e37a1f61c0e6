pub mod formatter;

pub use formatter::{
    format_age, format_audit_records, format_json, format_quadrant_grid, format_questions,
    format_score, format_scored_table, format_tsv, format_use_case_detail, should_use_colors,
};
