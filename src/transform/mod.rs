//! Value scales applied to retained expression values

use serde::Serialize;

/// Scale on which retained values are reported and plotted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueScale {
    /// Raw values (TPM)
    #[default]
    Linear,
    /// log2(x + 1)
    Log2,
}

impl ValueScale {
    pub fn from_flag(logscale: bool) -> Self {
        if logscale {
            ValueScale::Log2
        } else {
            ValueScale::Linear
        }
    }

    /// Transform a raw value; `None` when the value is outside the scale's domain
    pub fn apply(self, value: f64) -> Option<f64> {
        match self {
            ValueScale::Linear => Some(value),
            ValueScale::Log2 => log2_plus_one(value),
        }
    }

    /// Y-axis caption for figures drawn on this scale
    pub fn axis_label(self) -> &'static str {
        match self {
            ValueScale::Linear => "gene expression [TPM]",
            ValueScale::Log2 => "gene expression [log(TPM)]",
        }
    }
}

/// log2(x + 1), defined for x > -1
pub fn log2_plus_one(value: f64) -> Option<f64> {
    if value > -1.0 {
        Some((value + 1.0).log2())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_log2_plus_one() {
        assert_abs_diff_eq!(log2_plus_one(3.0).unwrap(), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(log2_plus_one(0.0).unwrap(), 0.0, epsilon = 1e-12);
        assert!(log2_plus_one(-1.0).is_none());
        assert!(log2_plus_one(-5.0).is_none());
    }

    #[test]
    fn test_scale_labels() {
        assert_eq!(ValueScale::from_flag(false), ValueScale::Linear);
        assert_eq!(ValueScale::from_flag(true).axis_label(), "gene expression [log(TPM)]");
        assert_eq!(ValueScale::Linear.apply(-4.0), Some(-4.0));
    }
}
