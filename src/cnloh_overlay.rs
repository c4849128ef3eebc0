//! Copy-loss and cnLoH candidate region sets for visualization tracks
//!
//! These sets use exact copy number matches, and are reported separately from the overlap
//! statistics.
//!

use crate::genome_region::GenomicRegion;
use crate::log_utils::debug_msg;
use crate::overlap::{get_chrom_order, overlap_candidates};
use crate::scored_region::{CnSegment, Scored};

#[derive(Default)]
pub struct CnlohOverlay {
    /// CN segments at exactly the copy-loss copy number, unmodified
    pub copy_loss: Vec<GenomicRegion>,

    /// Intersections of CN segments at exactly the normal copy number with ROH regions
    pub cnloh_candidates: Vec<GenomicRegion>,
}

/// Build the copy-loss and cnLoH candidate region sets
///
/// # Arguments
///
/// * `roh` - ROH regions homozygous in the sample described by `cn`
/// * `cn` - CN segments for one sample
/// * `copy_loss_copy_number` - Copy number selected for the copy-loss set
/// * `normal_copy_number` - Copy number of CN segments intersected with ROH for the candidate set
/// * `debug` - Print per-chromosome details directly to stderr
///
/// Copy-loss segments are reported in input order. Candidate overlaps are computed per chromosome on
/// the current rayon thread pool.
///
pub fn get_cnloh_overlay<R: Scored + Sync>(
    roh: &[R],
    cn: &[CnSegment],
    copy_loss_copy_number: i32,
    normal_copy_number: i32,
    debug: bool,
) -> CnlohOverlay {
    let copy_loss = cn
        .iter()
        .filter(|x| x.copy_number == copy_loss_copy_number)
        .map(|x| x.region().clone())
        .collect::<Vec<_>>();

    let normal = cn
        .iter()
        .filter(|x| x.copy_number == normal_copy_number)
        .cloned()
        .collect::<Vec<_>>();
    let cnloh_candidates = overlap_candidates(&normal, roh);

    for chrom in get_chrom_order(cn, roh) {
        let count = |regions: &[GenomicRegion]| regions.iter().filter(|x| x.chrom == chrom).count();
        debug_msg!(
            debug,
            "cnLoH overlay chromosome {}: {} copy-loss segments, {} cnLoH candidate regions",
            chrom,
            count(&copy_loss),
            count(&cnloh_candidates)
        );
    }

    CnlohOverlay {
        copy_loss,
        cnloh_candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scored_region::test_utils::*;

    #[test]
    fn test_cnloh_candidate() {
        let roh = vec![get_test_roh("chr1", 1000, 5000, 20.0)];
        let cn = vec![get_test_cn("chr1", 2000, 3000, 2, 20.0)];

        let overlay = get_cnloh_overlay(&roh, &cn, 1, 2, false);
        assert!(overlay.copy_loss.is_empty());
        assert_eq!(overlay.cnloh_candidates.len(), 1);
        assert_eq!(overlay.cnloh_candidates[0].start(), 2000);
        assert_eq!(overlay.cnloh_candidates[0].end(), 3000);
    }

    #[test]
    fn test_exact_copy_number_sets() {
        let roh = vec![
            get_test_roh("chr1", 0, 10_000, 20.0),
            get_test_roh("chr3", 0, 10_000, 20.0),
        ];
        let cn = vec![
            get_test_cn("chr1", 0, 1000, 0, 20.0),
            get_test_cn("chr1", 1000, 2000, 1, 20.0),
            get_test_cn("chr1", 9000, 12_000, 2, 20.0),
            get_test_cn("chr1", 12_000, 13_000, 3, 20.0),
            get_test_cn("chr2", 0, 1000, 1, 20.0),
            get_test_cn("chr2", 1000, 2000, 2, 20.0),
        ];

        let overlay = get_cnloh_overlay(&roh, &cn, 1, 2, false);

        // Copy-loss segments are reported whether or not they overlap ROH
        let copy_loss = overlay
            .copy_loss
            .iter()
            .map(|x| (x.chrom.as_str(), x.start(), x.end()))
            .collect::<Vec<_>>();
        assert_eq!(copy_loss, vec![("chr1", 1000, 2000), ("chr2", 0, 1000)]);

        // Only the ROH-covered part of normal segments is a candidate
        assert_eq!(overlay.cnloh_candidates.len(), 1);
        assert_eq!(overlay.cnloh_candidates[0].chrom, "chr1");
        assert_eq!(overlay.cnloh_candidates[0].start(), 9000);
        assert_eq!(overlay.cnloh_candidates[0].end(), 10_000);
    }

    #[test]
    fn test_empty_roh() {
        let roh = Vec::<crate::scored_region::RohRegion>::new();
        let cn = vec![get_test_cn("chr1", 0, 1000, 2, 20.0)];
        let overlay = get_cnloh_overlay(&roh, &cn, 1, 2, false);
        assert!(overlay.cnloh_candidates.is_empty());
    }
}
