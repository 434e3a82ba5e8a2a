//! Expression matrix with name-based lookup

use std::collections::HashMap;

use ndarray::Array2;

use crate::error::{ExpError, Result};

const CONTEXT: &str = "expression matrix";

/// Header tokens naming the gene column rather than a sample
const GENE_COLUMN_HEADERS: [&str; 2] = ["gene", "genes"];

/// Expression values (genes x samples)
///
/// Rows and columns are addressed by name through explicit index maps, so
/// a lookup never depends on the position of a token in the input.
#[derive(Debug, Clone)]
pub struct ExpressionTable {
    values: Array2<f64>,
    gene_ids: Vec<String>,
    sample_ids: Vec<String>,
    gene_index: HashMap<String, usize>,
    sample_index: HashMap<String, usize>,
}

/// Map names to positions; a repeated name points at its last position
fn index_names(names: &[String], kind: &str) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(names.len());
    for (i, name) in names.iter().enumerate() {
        if index.insert(name.clone(), i).is_some() {
            log::warn!("Duplicate {} '{}' in expression matrix; the last one is used", kind, name);
        }
    }
    index
}

impl ExpressionTable {
    /// Create a table from a genes x samples matrix
    pub fn new(values: Array2<f64>, gene_ids: Vec<String>, sample_ids: Vec<String>) -> Result<Self> {
        let (n_genes, n_samples) = values.dim();
        if gene_ids.len() != n_genes || sample_ids.len() != n_samples {
            return Err(ExpError::InvalidInput {
                reason: format!(
                    "{}x{} matrix with {} gene IDs and {} sample IDs",
                    n_genes,
                    n_samples,
                    gene_ids.len(),
                    sample_ids.len()
                ),
            });
        }
        let gene_index = index_names(&gene_ids, "gene");
        let sample_index = index_names(&sample_ids, "sample");
        Ok(Self {
            values,
            gene_ids,
            sample_ids,
            gene_index,
            sample_index,
        })
    }

    /// Parse a tab-delimited matrix: a header of sample IDs (optionally led by
    /// `gene`/`genes`), then one row per gene with its values.
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lines = lines
            .into_iter()
            .enumerate()
            .map(|(i, l)| (i + 1, l))
            .filter(|(_, l)| !l.as_ref().trim().is_empty());

        let (_, header_line) = lines
            .next()
            .ok_or_else(|| ExpError::parse(CONTEXT, 1, "missing header line"))?;
        let mut header: Vec<&str> = header_line.as_ref().trim().split('\t').collect();
        if GENE_COLUMN_HEADERS.contains(&header[0]) {
            header.remove(0);
        }
        let sample_ids: Vec<String> = header.iter().map(|s| s.trim().to_string()).collect();
        let n_samples = sample_ids.len();

        let mut gene_ids: Vec<String> = Vec::new();
        let mut data: Vec<f64> = Vec::new();

        for (line_no, line) in lines {
            let fields: Vec<&str> = line.as_ref().trim().split('\t').collect();
            let n_values = fields.len() - 1;
            if n_values != n_samples {
                return Err(ExpError::parse(
                    CONTEXT,
                    line_no,
                    format!("row has {} values, header names {} samples", n_values, n_samples),
                ));
            }
            for field in &fields[1..] {
                let field = field.trim();
                let value: f64 = field.parse().map_err(|_| {
                    ExpError::parse(CONTEXT, line_no, format!("invalid expression value '{}'", field))
                })?;
                if !value.is_finite() {
                    return Err(ExpError::parse(
                        CONTEXT,
                        line_no,
                        format!("non-finite expression value '{}'", field),
                    ));
                }
                data.push(value);
            }
            gene_ids.push(fields[0].trim().to_string());
        }

        let values = Array2::from_shape_vec((gene_ids.len(), n_samples), data).map_err(|e| {
            ExpError::InvalidInput {
                reason: format!("cannot shape expression matrix: {}", e),
            }
        })?;
        Self::new(values, gene_ids, sample_ids)
    }

    /// Value for a sample and gene, `None` when either is absent
    pub fn value(&self, sample_id: &str, gene_id: &str) -> Option<f64> {
        let row = *self.gene_index.get(gene_id)?;
        let col = *self.sample_index.get(sample_id)?;
        Some(self.values[[row, col]])
    }

    pub fn has_gene(&self, gene_id: &str) -> bool {
        self.gene_index.contains_key(gene_id)
    }

    pub fn has_sample(&self, sample_id: &str) -> bool {
        self.sample_index.contains_key(sample_id)
    }

    pub fn gene_ids(&self) -> &[String] {
        &self.gene_ids
    }

    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    pub fn n_genes(&self) -> usize {
        self.gene_ids.len()
    }

    pub fn n_samples(&self) -> usize {
        self.sample_ids.len()
    }
}
