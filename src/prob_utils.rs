/// Convert a Phred-scaled quality score to the corresponding error probability
///
/// This is the p-value used for all significance filtering: `10^(-quality/10)`
///
pub fn phred_to_error_prob(quality: f64) -> f64 {
    10f64.powf(-quality / 10f64)
}

/// Convert an optional quality score to a p-value
///
/// Absent and NaN quality values are treated as unknown, and return None instead of being passed
/// through the Phred conversion.
///
pub fn quality_to_p_value(quality: Option<f64>) -> Option<f64> {
    match quality {
        Some(q) if !q.is_nan() => Some(phred_to_error_prob(q)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phred_to_error_prob() {
        approx::assert_ulps_eq!(phred_to_error_prob(20.0), 0.01, max_ulps = 4);
        approx::assert_ulps_eq!(phred_to_error_prob(30.0), 0.001, max_ulps = 4);
        approx::assert_ulps_eq!(phred_to_error_prob(0.0), 1.0, max_ulps = 4);
        approx::assert_abs_diff_eq!(phred_to_error_prob(15.0), 0.0316227766, epsilon = 1e-9);
    }

    #[test]
    fn test_quality_to_p_value() {
        assert_eq!(quality_to_p_value(None), None);
        assert_eq!(quality_to_p_value(Some(f64::NAN)), None);
        approx::assert_ulps_eq!(quality_to_p_value(Some(20.0)).unwrap(), 0.01, max_ulps = 4);
    }
}
