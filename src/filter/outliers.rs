//! Median/IQR outlier filtering and long-format reshaping
//!
//! For every gene of interest the values of one sample group are pooled,
//! values far from the median (in units of the interquartile range) are
//! dropped, and the survivors become `(label, tag, value)` rows for plotting.

use serde::Serialize;

use crate::data::{ExpressionTable, GeneList, SampleGroup};
use crate::error::{ExpError, Result};
use crate::stats::{interquartile_range, median, QuantileMethod};
use crate::transform::ValueScale;

/// Default number of IQRs a value may deviate from the median
pub const DEFAULT_CUTOFF_FACTOR: f64 = 3.0;

/// Under lower quartiles a gene with fewer collected values is never filtered:
/// with two values the quartiles coincide and both points would be dropped.
pub const MIN_VALUES_FOR_FILTER: usize = 3;

/// Parameters for [`aggregate_group`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateParams {
    /// Values with |x - median| >= cutoff_factor * IQR are outliers
    pub cutoff_factor: f64,
    /// When false every collected value is kept
    pub filter_outliers: bool,
    pub scale: ValueScale,
    pub quantile_method: QuantileMethod,
}

impl Default for AggregateParams {
    fn default() -> Self {
        Self {
            cutoff_factor: DEFAULT_CUTOFF_FACTOR,
            filter_outliers: true,
            scale: ValueScale::Linear,
            quantile_method: QuantileMethod::Lower,
        }
    }
}

/// One observation in the tidy table handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongRow {
    #[serde(rename = "gene")]
    pub label: String,
    /// `x<k>`, k = position in the gene's collected values before filtering
    #[serde(rename = "sample")]
    pub tag: String,
    #[serde(rename = "gene expression")]
    pub value: f64,
}

/// Per-gene statistics for one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneSummary {
    pub gene_id: String,
    pub label: String,
    /// Values found for the group's samples
    pub n_collected: usize,
    /// Values that survived the filter
    pub n_retained: usize,
    /// Largest retained value on the output scale, 0 when nothing was retained
    pub max_value: f64,
    pub median: Option<f64>,
    pub iqr: Option<f64>,
}

/// Long-format rows and per-gene statistics for one sample group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupAggregate {
    pub group: String,
    pub rows: Vec<LongRow>,
    pub genes: Vec<GeneSummary>,
}

impl GroupAggregate {
    /// True when no gene had any value for this group
    pub fn has_no_data(&self) -> bool {
        self.genes.iter().all(|g| g.n_collected == 0)
    }

    pub fn gene(&self, gene_id: &str) -> Option<&GeneSummary> {
        self.genes.iter().find(|g| g.gene_id == gene_id)
    }
}

/// Whether `value` is kept: its deviation from the median must be strictly
/// below `cutoff_factor * iqr`. A value equal to the median is never an outlier.
pub fn is_retained(value: f64, median: f64, iqr: f64, cutoff_factor: f64) -> bool {
    let deviation = (value - median).abs();
    deviation < cutoff_factor * iqr || deviation == 0.0
}

/// Collect, filter and reshape the values of every gene for one group
pub fn aggregate_group(
    group: &SampleGroup,
    genes: &GeneList,
    table: &ExpressionTable,
    params: &AggregateParams,
) -> Result<GroupAggregate> {
    let mut rows = Vec::new();
    let mut summaries = Vec::with_capacity(genes.len());

    for gene_id in genes.ids() {
        let label = genes.display_label(gene_id);
        let collected: Vec<f64> = group
            .samples()
            .iter()
            .filter_map(|sample| table.value(sample, gene_id))
            .collect();

        if collected.is_empty() {
            log::debug!("{}: no values for gene {}", group.name(), gene_id);
            summaries.push(GeneSummary {
                gene_id: gene_id.clone(),
                label,
                n_collected: 0,
                n_retained: 0,
                max_value: 0.0,
                median: None,
                iqr: None,
            });
            continue;
        }

        let center = median(&collected);
        let spread = interquartile_range(&collected, params.quantile_method);

        let filtering = params.filter_outliers
            && (params.quantile_method != QuantileMethod::Lower
                || collected.len() >= MIN_VALUES_FOR_FILTER);

        let mut n_retained = 0;
        let mut max_value: Option<f64> = None;
        for (k, &raw) in collected.iter().enumerate() {
            if filtering && !is_retained(raw, center, spread, params.cutoff_factor) {
                log::debug!(
                    "{}: {} value {} dropped (median {}, IQR {})",
                    group.name(),
                    gene_id,
                    raw,
                    center,
                    spread
                );
                continue;
            }
            let value = params.scale.apply(raw).ok_or_else(|| ExpError::LogDomain {
                gene_id: gene_id.clone(),
                value: raw,
            })?;
            rows.push(LongRow {
                label: label.clone(),
                tag: format!("x{}", k),
                value,
            });
            n_retained += 1;
            max_value = Some(max_value.map_or(value, |m| m.max(value)));
        }

        summaries.push(GeneSummary {
            gene_id: gene_id.clone(),
            label,
            n_collected: collected.len(),
            n_retained,
            max_value: max_value.unwrap_or(0.0),
            median: Some(center),
            iqr: Some(spread),
        });
    }

    Ok(GroupAggregate {
        group: group.name().to_string(),
        rows,
        genes: summaries,
    })
}
