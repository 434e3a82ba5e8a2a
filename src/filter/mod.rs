//! Outlier filtering of pooled group values

mod outliers;

pub use outliers::{
    aggregate_group, is_retained, AggregateParams, GeneSummary, GroupAggregate, LongRow,
    DEFAULT_CUTOFF_FACTOR, MIN_VALUES_FOR_FILTER,
};
