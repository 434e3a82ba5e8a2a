//! Optional per-group report files: long-format table and JSON summary

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::filter::{AggregateParams, GeneSummary, GroupAggregate, LongRow};

/// Column names of the long-format table
pub const LONG_TABLE_HEADER: [&str; 3] = ["gene", "sample", "gene expression"];

/// Per-group statistics as written to JSON
#[derive(Debug, Serialize)]
pub struct GroupSummary<'a> {
    pub group: &'a str,
    pub params: &'a AggregateParams,
    pub genes: &'a [GeneSummary],
}

impl<'a> GroupSummary<'a> {
    pub fn new(aggregate: &'a GroupAggregate, params: &'a AggregateParams) -> Self {
        Self {
            group: &aggregate.group,
            params,
            genes: &aggregate.genes,
        }
    }
}

/// Write long-format rows as a tab-separated table with a header line
pub fn write_long_table<P: AsRef<Path>>(path: P, rows: &[LongRow]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(LONG_TABLE_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the per-gene statistics of one group as pretty-printed JSON
pub fn write_group_summary<P: AsRef<Path>>(path: P, summary: &GroupSummary) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
