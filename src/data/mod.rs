//! Input data structures: genes of interest, expression values, sample groups

mod expression;
mod gene_list;
mod sample_groups;

pub use expression::ExpressionTable;
pub use gene_list::GeneList;
pub use sample_groups::{SampleGroup, SampleGroups};
