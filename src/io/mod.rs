//! Input/Output operations

mod report;
mod tsv;

pub use report::{write_group_summary, write_long_table, GroupSummary, LONG_TABLE_HEADER};
pub use tsv::{read_expression_table, read_gene_list, read_lines, read_sample_groups};
