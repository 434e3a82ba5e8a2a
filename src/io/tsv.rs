//! Readers for the tab-delimited input files

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::data::{ExpressionTable, GeneList, SampleGroups};
use crate::error::{ExpError, Result};

/// Read every line of a text file; open and read failures carry the path
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file_access = |source| ExpError::FileAccess {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(file_access)?;
    BufReader::new(file)
        .lines()
        .collect::<std::io::Result<Vec<String>>>()
        .map_err(file_access)
}

/// Read a gene list: one `id` or `id<TAB>label` per line
pub fn read_gene_list<P: AsRef<Path>>(path: P) -> Result<GeneList> {
    GeneList::from_lines(read_lines(path)?)
}

/// Read an expression matrix: header of sample IDs, then `gene<TAB>values...`
pub fn read_expression_table<P: AsRef<Path>>(path: P) -> Result<ExpressionTable> {
    ExpressionTable::from_lines(read_lines(path)?)
}

/// Read sample groups: `name<TAB>sample[,sample...]` per line
pub fn read_sample_groups<P: AsRef<Path>>(path: P) -> Result<SampleGroups> {
    SampleGroups::from_lines(read_lines(path)?)
}
