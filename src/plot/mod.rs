//! Figure rendering

mod violin;

pub use violin::{render_violin_plot, PlotOptions};
