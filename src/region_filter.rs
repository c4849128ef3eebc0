use crate::scored_region::Scored;

/// Return true if the record's p-value is known and below `max_p_value`
///
/// Records with unknown quality are never significant.
///
pub fn is_significant<T: Scored>(record: &T, max_p_value: f64) -> bool {
    record.p_value().is_some_and(|p| p < max_p_value)
}

/// Filter records down to those with a p-value below `max_p_value`
///
/// Input order is preserved in the output.
///
pub fn filter_significant<T: Scored + Clone>(records: &[T], max_p_value: f64) -> Vec<T> {
    records
        .iter()
        .filter(|x| is_significant(*x, max_p_value))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome_region::GenomicRegion;
    use crate::scored_region::test_utils::*;
    use crate::scored_region::{CnSegment, ScoredRegion};

    const MAX_P: f64 = 0.05;

    #[test]
    fn test_filter_significant() {
        let cn = vec![
            get_test_cn("chr1", 0, 100, 2, 20.0),
            get_test_cn("chr1", 100, 200, 1, 10.0),
            get_test_cn("chr1", 200, 300, 3, 13.0),
            get_test_cn("chr1", 300, 400, 2, 30.0),
        ];

        // q=10 -> p=0.1, q=13 -> p~=0.0501
        let filtered = filter_significant(&cn, MAX_P);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].scored.region.start(), 0);
        assert_eq!(filtered[1].scored.region.start(), 300);
    }

    #[test]
    fn test_filter_unknown_quality() {
        let unknown = CnSegment {
            scored: ScoredRegion::new(GenomicRegion::new("chr1", 0, 100).unwrap(), None),
            copy_number: 2,
            n_sites: 1,
            n_hets: 0,
        };
        let nan = CnSegment {
            scored: ScoredRegion::new(GenomicRegion::new("chr1", 0, 100).unwrap(), Some(f64::NAN)),
            ..unknown.clone()
        };
        assert!(filter_significant(&[unknown, nan], MAX_P).is_empty());
    }

    #[test]
    fn test_filter_idempotent() {
        let roh = vec![
            get_test_roh("chr1", 0, 100, 5.0),
            get_test_roh("chr1", 50, 150, 25.0),
            get_test_roh("chr2", 0, 100, 40.0),
        ];
        let once = filter_significant(&roh, MAX_P);
        let twice = filter_significant(&once, MAX_P);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_filter_empty() {
        let empty: Vec<CnSegment> = Vec::new();
        assert!(filter_significant(&empty, MAX_P).is_empty());
    }
}
