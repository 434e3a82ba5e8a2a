//! Command-line interface for exp_violin

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::filter::{AggregateParams, DEFAULT_CUTOFF_FACTOR};
use crate::plot::PlotOptions;
use crate::stats::QuantileMethod;
use crate::transform::ValueScale;
use crate::ReportConfig;

/// CLI-friendly quartile method
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliQuantileMethod {
    /// Order statistic at floor(p * (n - 1))
    Lower,
    /// Linear interpolation (NumPy/SciPy default)
    Linear,
}

impl From<CliQuantileMethod> for QuantileMethod {
    fn from(method: CliQuantileMethod) -> Self {
        match method {
            CliQuantileMethod::Lower => QuantileMethod::Lower,
            CliQuantileMethod::Linear => QuantileMethod::Linear,
        }
    }
}

/// Largest accepted figure side in pixels
pub const MAX_FIGURE_SIDE: i64 = 10_000;

#[derive(Parser, Debug)]
#[command(name = "exp_violin")]
#[command(version)]
#[command(about = "Violin plots of gene expression per sample group with IQR outlier filtering")]
#[command(after_help = "\
Examples:
  exp_violin --genes genes.txt --exp tpm.tsv --samples groups.txt --out figures/
  exp_violin --genes genes.txt --exp tpm.tsv --samples groups.txt --out figures/ \\
    --cutfac 2 --logscale --table --summary")]
pub struct Cli {
    /// Gene list: one ID, or ID<TAB>label, per line
    #[arg(long, value_name = "FILE")]
    pub genes: PathBuf,

    /// Expression matrix: header of sample IDs, then gene<TAB>values
    #[arg(long, value_name = "FILE")]
    pub exp: PathBuf,

    /// Sample groups: name<TAB>sample[,sample...] per line
    #[arg(long, value_name = "FILE")]
    pub samples: PathBuf,

    /// Output directory (created if missing)
    #[arg(long, value_name = "DIR")]
    pub out: PathBuf,

    /// Number of IQRs from the median beyond which values are outliers [default: 3]
    #[arg(long, value_name = "FLOAT", num_args = 0..=1, allow_negative_numbers = true)]
    pub cutfac: Option<Option<String>>,

    /// Plot log2(x+1) transformed values
    #[arg(long)]
    pub logscale: bool,

    /// Keep outliers
    #[arg(long)]
    pub filteroff: bool,

    /// How quartiles are computed for the IQR
    #[arg(long, value_enum, default_value_t = CliQuantileMethod::Lower)]
    pub quantiles: CliQuantileMethod,

    /// Also write <group>.tsv with the plotted long-format rows
    #[arg(long)]
    pub table: bool,

    /// Also write <group>.json with per-gene statistics
    #[arg(long)]
    pub summary: bool,

    /// Figure width in pixels
    #[arg(
        long,
        default_value_t = PlotOptions::default().width,
        value_parser = clap::value_parser!(u32).range(1..=MAX_FIGURE_SIDE)
    )]
    pub width: u32,

    /// Figure height in pixels
    #[arg(
        long,
        default_value_t = PlotOptions::default().height,
        value_parser = clap::value_parser!(u32).range(1..=MAX_FIGURE_SIDE)
    )]
    pub height: u32,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parse an IQR multiplier; anything unusable falls back to the default
pub fn parse_cutoff_factor(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return DEFAULT_CUTOFF_FACTOR;
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            log::warn!(
                "Invalid --cutfac value '{}'; using default {}",
                raw,
                DEFAULT_CUTOFF_FACTOR
            );
            DEFAULT_CUTOFF_FACTOR
        }
    }
}

impl Cli {
    /// `--cutfac` given without a value falls back like any other unusable value
    pub fn cutoff_factor(&self) -> f64 {
        parse_cutoff_factor(self.cutfac.as_ref().map(|v| v.as_deref().unwrap_or("")))
    }

    pub fn aggregate_params(&self) -> AggregateParams {
        AggregateParams {
            cutoff_factor: self.cutoff_factor(),
            filter_outliers: !self.filteroff,
            scale: ValueScale::from_flag(self.logscale),
            quantile_method: self.quantiles.into(),
        }
    }

    pub fn into_config(self) -> ReportConfig {
        let params = self.aggregate_params();
        ReportConfig {
            genes_path: self.genes,
            expression_path: self.exp,
            samples_path: self.samples,
            output_dir: self.out,
            params,
            plot: PlotOptions {
                width: self.width,
                height: self.height,
            },
            write_table: self.table,
            write_summary: self.summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 9] = [
        "exp_violin",
        "--genes",
        "g.txt",
        "--exp",
        "e.tsv",
        "--samples",
        "s.txt",
        "--out",
        "out",
    ];

    #[test]
    fn test_required_flags() {
        let cli = Cli::try_parse_from(REQUIRED).unwrap();
        let config = cli.into_config();
        assert_eq!(config.genes_path, PathBuf::from("g.txt"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.params, AggregateParams::default());
        assert_eq!(config.plot, PlotOptions::default());
        assert!(!config.write_table && !config.write_summary);

        for skip in [1, 3, 5, 7] {
            let args: Vec<&str> = REQUIRED
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip && *i != skip + 1)
                .map(|(_, a)| *a)
                .collect();
            let err = Cli::try_parse_from(args).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        }
    }

    #[test]
    fn test_optional_flags() {
        let mut args = REQUIRED.to_vec();
        args.extend(["--cutfac", "1.5", "--logscale", "--filteroff", "--quantiles", "linear", "--table"]);
        let params = Cli::try_parse_from(args).unwrap().aggregate_params();
        assert_eq!(params.cutoff_factor, 1.5);
        assert_eq!(params.scale, ValueScale::Log2);
        assert!(!params.filter_outliers);
        assert_eq!(params.quantile_method, QuantileMethod::Linear);
    }

    #[test]
    fn test_cutoff_fallback() {
        assert_eq!(parse_cutoff_factor(None), 3.0);
        assert_eq!(parse_cutoff_factor(Some("2.5")), 2.5);
        assert_eq!(parse_cutoff_factor(Some("abc")), 3.0);
        assert_eq!(parse_cutoff_factor(Some("inf")), 3.0);

        let mut args = REQUIRED.to_vec();
        args.extend(["--cutfac", "three"]);
        assert_eq!(Cli::try_parse_from(args).unwrap().cutoff_factor(), 3.0);
    }

    #[test]
    fn test_cutoff_without_value() {
        let mut args = REQUIRED.to_vec();
        args.extend(["--cutfac", "--logscale"]);
        let params = Cli::try_parse_from(args).unwrap().aggregate_params();
        assert_eq!(params.cutoff_factor, 3.0);
        assert_eq!(params.scale, ValueScale::Log2);

        let mut args = REQUIRED.to_vec();
        args.push("--cutfac");
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.cutfac, Some(None));
        assert_eq!(cli.cutoff_factor(), 3.0);
    }

    #[test]
    fn test_negative_cutoff_is_a_value() {
        let mut args = REQUIRED.to_vec();
        args.extend(["--cutfac", "-1.5", "--filteroff"]);
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.cutoff_factor(), -1.5);
        assert!(cli.filteroff);
    }

    #[test]
    fn test_figure_size_bounds() {
        for (flag, value) in [("--width", "0"), ("--height", "2000000000"), ("--width", "10001")] {
            let mut args = REQUIRED.to_vec();
            args.extend([flag, value]);
            let err = Cli::try_parse_from(args).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        }

        let mut args = REQUIRED.to_vec();
        args.extend(["--width", "10000", "--height", "1"]);
        let config = Cli::try_parse_from(args).unwrap().into_config();
        assert_eq!(config.plot, PlotOptions { width: 10_000, height: 1 });
    }
}
