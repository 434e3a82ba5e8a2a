//! exp_violin: gene expression violin plots per sample group
//!
//! Loads a list of genes of interest, an expression matrix (samples x genes)
//! and named sample groups, drops outliers per gene and group with a
//! median/IQR rule, and draws one violin plot per group.
//!
//! # Example
//!
//! ```ignore
//! use exp_violin::prelude::*;
//!
//! let genes = read_gene_list("genes.txt")?;
//! let table = read_expression_table("tpm.tsv")?;
//! let groups = read_sample_groups("groups.txt")?;
//!
//! let params = AggregateParams::default();
//! for group in groups.iter() {
//!     let aggregate = aggregate_group(group, &genes, &table, &params)?;
//!     render_violin_plot(format!("{}.png", group.name()), &aggregate, params.scale, &PlotOptions::default())?;
//! }
//! ```

pub mod cli;
pub mod data;
pub mod error;
pub mod filter;
pub mod io;
pub mod plot;
pub mod stats;
pub mod transform;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::data::{ExpressionTable, GeneList, SampleGroup, SampleGroups};
    pub use crate::error::{ExpError, Result};
    pub use crate::filter::{aggregate_group, AggregateParams, GeneSummary, GroupAggregate, LongRow};
    pub use crate::io::{
        read_expression_table, read_gene_list, read_sample_groups, write_group_summary, write_long_table,
        GroupSummary,
    };
    pub use crate::plot::{render_violin_plot, PlotOptions};
    pub use crate::stats::QuantileMethod;
    pub use crate::transform::ValueScale;
    pub use crate::{run_report, GroupOutput, ReportConfig};
}

use std::path::{Path, PathBuf};

use log::{info, warn};

use prelude::*;

/// Everything needed for one reporting run
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub genes_path: PathBuf,
    pub expression_path: PathBuf,
    pub samples_path: PathBuf,
    pub output_dir: PathBuf,
    pub params: AggregateParams,
    pub plot: PlotOptions,
    /// Write `<group>.tsv` next to each figure
    pub write_table: bool,
    /// Write `<group>.json` next to each figure
    pub write_summary: bool,
}

/// Files written for one sample group
#[derive(Debug, Clone)]
pub struct GroupOutput {
    pub group: String,
    pub figure: PathBuf,
    pub table: Option<PathBuf>,
    pub summary: Option<PathBuf>,
    pub genes: Vec<GeneSummary>,
}

/// File name stem for a group; path separators would escape the output directory
fn file_stem(group: &str) -> String {
    group.replace(['/', '\\'], "_")
}

fn output_path(dir: &Path, group: &str, extension: &str) -> PathBuf {
    dir.join(format!("{}.{}", file_stem(group), extension))
}

/// Load all inputs, then aggregate and draw every sample group
pub fn run_report(config: &ReportConfig) -> Result<Vec<GroupOutput>> {
    info!("Loading genes of interest from: {}", config.genes_path.display());
    let genes = read_gene_list(&config.genes_path)?;
    info!("  {} genes", genes.len());

    info!("Loading expression values from: {}", config.expression_path.display());
    let table = read_expression_table(&config.expression_path)?;
    info!("  {} genes, {} samples", table.n_genes(), table.n_samples());

    info!("Loading sample groups from: {}", config.samples_path.display());
    let groups = read_sample_groups(&config.samples_path)?;
    info!("  {} groups", groups.len());

    let missing: Vec<&str> = genes
        .ids()
        .iter()
        .filter(|id| !table.has_gene(id))
        .map(|id| id.as_str())
        .collect();
    if !missing.is_empty() {
        warn!("{} genes are not in the expression matrix: {}", missing.len(), missing.join(", "));
    }

    std::fs::create_dir_all(&config.output_dir)?;

    let params = &config.params;
    info!(
        "Outlier filter: {} (cutoff {} x IQR, {:?} quartiles), scale: {:?}",
        if params.filter_outliers { "on" } else { "off" },
        params.cutoff_factor,
        params.quantile_method,
        params.scale
    );

    let mut outputs = Vec::with_capacity(groups.len());
    for group in groups.iter() {
        let aggregate = aggregate_group(group, &genes, &table, params)?;
        if aggregate.has_no_data() {
            warn!(
                "Group '{}' has no values for any gene (samples: {})",
                group.name(),
                group.samples().join(", ")
            );
        }
        let sizes: Vec<String> = aggregate
            .genes
            .iter()
            .map(|g| format!("{}={}", g.gene_id, g.n_retained))
            .collect();
        info!("{}: retained values per gene: {}", group.name(), sizes.join(", "));

        let figure = output_path(&config.output_dir, group.name(), "png");
        render_violin_plot(&figure, &aggregate, params.scale, &config.plot)?;
        info!("Wrote {}", figure.display());

        let table_path = if config.write_table {
            let path = output_path(&config.output_dir, group.name(), "tsv");
            write_long_table(&path, &aggregate.rows)?;
            info!("Wrote {}", path.display());
            Some(path)
        } else {
            None
        };

        let summary_path = if config.write_summary {
            let path = output_path(&config.output_dir, group.name(), "json");
            write_group_summary(&path, &GroupSummary::new(&aggregate, params))?;
            info!("Wrote {}", path.display());
            Some(path)
        } else {
            None
        };

        outputs.push(GroupOutput {
            group: aggregate.group,
            figure,
            table: table_path,
            summary: summary_path,
            genes: aggregate.genes,
        });
    }

    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn write_inputs(genes: &str, expression: &str, samples: &str) -> (TempDir, ReportConfig) {
        let dir = tempdir().unwrap();
        let genes_path = dir.path().join("genes.txt");
        let expression_path = dir.path().join("exp.tsv");
        let samples_path = dir.path().join("samples.txt");
        fs::write(&genes_path, genes).unwrap();
        fs::write(&expression_path, expression).unwrap();
        fs::write(&samples_path, samples).unwrap();

        let config = ReportConfig {
            genes_path,
            expression_path,
            samples_path,
            output_dir: dir.path().join("figures"),
            params: AggregateParams::default(),
            plot: PlotOptions {
                width: 480,
                height: 360,
            },
            write_table: false,
            write_summary: false,
        };
        (dir, config)
    }

    #[test]
    fn test_full_report() {
        let (_dir, mut config) = write_inputs(
            "GENE1\nGENE2\tMyLabel\n",
            "gene\tS1\tS2\tS3\nGENE1\t10\t12\t11\nGENE2\t5\t999\t6\n",
            "grp\tS1,S2,S3\n",
        );
        config.write_table = true;
        config.write_summary = true;

        let outputs = run_report(&config).unwrap();
        assert_eq!(outputs.len(), 1);
        let out = &outputs[0];
        assert_eq!(out.figure, config.output_dir.join("grp.png"));
        assert!(out.figure.exists());

        let gene1 = &out.genes[0];
        assert_eq!(gene1.n_retained, 3);
        assert_eq!(gene1.max_value, 12.0);

        let gene2 = &out.genes[1];
        assert_eq!(gene2.label, "MyLabel");
        assert_eq!(gene2.n_retained, 2);
        assert_eq!(gene2.max_value, 6.0);

        let table = fs::read_to_string(out.table.as_ref().unwrap()).unwrap();
        assert!(table.contains("MyLabel\tx2\t6.0"));
        assert!(!table.contains("999"));
        assert!(out.summary.as_ref().unwrap().exists());
    }

    #[test]
    fn test_group_without_data_still_draws() {
        let (_dir, config) = write_inputs(
            "GENE1\n",
            "gene\tS1\nGENE1\t4\n",
            "present\tS1\nabsent\tT1,T2\n",
        );
        let outputs = run_report(&config).unwrap();
        assert_eq!(outputs.len(), 2);
        assert!(outputs[1].figure.exists());
        assert_eq!(outputs[1].genes[0].n_retained, 0);
        assert_eq!(outputs[1].genes[0].max_value, 0.0);
    }

    #[test]
    fn test_existing_output_dir_and_sanitised_names() {
        let (_dir, config) = write_inputs("G\n", "gene\tA\nG\t1\n", "a/b\tA\n");
        fs::create_dir_all(&config.output_dir).unwrap();
        let outputs = run_report(&config).unwrap();
        assert_eq!(outputs[0].figure, config.output_dir.join("a_b.png"));
        assert!(outputs[0].figure.exists());
    }

    #[test]
    fn test_parse_error_aborts() {
        let (_dir, config) = write_inputs("G\n", "gene\tA\tB\nG\t1\n", "g\tA\n");
        let err = run_report(&config).unwrap_err();
        assert!(matches!(err, ExpError::Parse { line: 2, .. }));
        assert!(!config.output_dir.exists());
    }

    #[test]
    fn test_log_scale_report() {
        let (_dir, mut config) = write_inputs("G\n", "gene\tA\tB\tC\nG\t3\t3\t7\n", "g\tA,B,C\n");
        config.params.scale = ValueScale::Log2;
        config.params.filter_outliers = false;
        let outputs = run_report(&config).unwrap();
        assert_eq!(outputs[0].genes[0].max_value, 3.0);
        assert_eq!(outputs[0].genes[0].n_retained, 3);
    }
}
