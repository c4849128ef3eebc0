//! Scored region types for ROH and copy number input
//!

use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::genome_region::GenomicRegion;
use crate::prob_utils::quality_to_p_value;

/// A genomic region with a Phred-scaled quality score
///
/// The p-value is always derived from quality on request and never stored.
///
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredRegion {
    pub region: GenomicRegion,

    /// None if the source record had no usable quality value
    pub quality: Option<f64>,
}

impl ScoredRegion {
    pub fn new(region: GenomicRegion, quality: Option<f64>) -> Self {
        Self { region, quality }
    }

    pub fn p_value(&self) -> Option<f64> {
        quality_to_p_value(self.quality)
    }
}

/// Shared access to the scored region in each record type, so that filtering, stratification and
/// overlap can be written once for all of them
///
pub trait Scored {
    fn scored(&self) -> &ScoredRegion;

    fn region(&self) -> &GenomicRegion {
        &self.scored().region
    }

    fn chrom(&self) -> &str {
        &self.scored().region.chrom
    }

    fn p_value(&self) -> Option<f64> {
        self.scored().p_value()
    }
}

impl Scored for ScoredRegion {
    fn scored(&self) -> &ScoredRegion {
        self
    }
}

/// Change in ROH state between the pre and post samples of a pair
///
#[derive(
    AsRefStr, Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, Ord, PartialEq, PartialOrd,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RohStatus {
    /// ROH present in the post sample only
    NewInPost,
    /// ROH present in the pre sample only
    LostInPost,
    Unchanged,
}

impl RohStatus {
    /// Label used in filenames, such as 'new-in-post'
    pub fn file_label(&self) -> String {
        self.as_ref().to_lowercase().replace('_', "-")
    }

    /// True if the ROH is present in the post sample
    pub fn in_post(&self) -> bool {
        matches!(self, RohStatus::NewInPost | RohStatus::Unchanged)
    }

    /// True if the ROH is present in the pre sample
    pub fn in_pre(&self) -> bool {
        matches!(self, RohStatus::LostInPost | RohStatus::Unchanged)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RohRegion {
    pub scored: ScoredRegion,

    /// Only defined for differential ROH input from a sample pair
    pub status: Option<RohStatus>,
}

impl Scored for RohRegion {
    fn scored(&self) -> &ScoredRegion {
        &self.scored
    }
}

/// A copy number segment from a single sample
#[derive(Clone, Debug, PartialEq)]
pub struct CnSegment {
    pub scored: ScoredRegion,
    pub copy_number: i32,
    pub n_sites: u32,
    pub n_hets: u32,
}

impl Scored for CnSegment {
    fn scored(&self) -> &ScoredRegion {
        &self.scored
    }
}

/// A copy number segment jointly called over a pre/post sample pair
#[derive(Clone, Debug, PartialEq)]
pub struct CnSegmentPaired {
    pub scored: ScoredRegion,
    pub copy_number_pre: i32,
    pub copy_number_post: i32,
    pub n_sites_pre: u32,
    pub n_hets_pre: u32,
    pub n_sites_post: u32,
    pub n_hets_post: u32,
}

impl CnSegmentPaired {
    /// Single-sample view of the pre side of this segment
    pub fn to_pre_segment(&self) -> CnSegment {
        CnSegment {
            scored: self.scored.clone(),
            copy_number: self.copy_number_pre,
            n_sites: self.n_sites_pre,
            n_hets: self.n_hets_pre,
        }
    }

    /// Single-sample view of the post side of this segment
    pub fn to_post_segment(&self) -> CnSegment {
        CnSegment {
            scored: self.scored.clone(),
            copy_number: self.copy_number_post,
            n_sites: self.n_sites_post,
            n_hets: self.n_hets_post,
        }
    }
}

impl Scored for CnSegmentPaired {
    fn scored(&self) -> &ScoredRegion {
        &self.scored
    }
}

#[cfg(test)]
pub mod test_utils {
    use super::*;

    pub fn get_test_roh(chrom: &str, start: i64, end: i64, quality: f64) -> RohRegion {
        RohRegion {
            scored: ScoredRegion::new(
                GenomicRegion::new(chrom, start, end).unwrap(),
                Some(quality),
            ),
            status: None,
        }
    }

    pub fn get_test_paired_roh(
        chrom: &str,
        start: i64,
        end: i64,
        quality: f64,
        status: RohStatus,
    ) -> RohRegion {
        RohRegion {
            status: Some(status),
            ..get_test_roh(chrom, start, end, quality)
        }
    }

    pub fn get_test_cn(
        chrom: &str,
        start: i64,
        end: i64,
        copy_number: i32,
        quality: f64,
    ) -> CnSegment {
        CnSegment {
            scored: ScoredRegion::new(
                GenomicRegion::new(chrom, start, end).unwrap(),
                Some(quality),
            ),
            copy_number,
            n_sites: 10,
            n_hets: 0,
        }
    }

    pub fn get_test_paired_cn(
        chrom: &str,
        start: i64,
        end: i64,
        copy_number_pre: i32,
        copy_number_post: i32,
        quality: f64,
    ) -> CnSegmentPaired {
        CnSegmentPaired {
            scored: ScoredRegion::new(
                GenomicRegion::new(chrom, start, end).unwrap(),
                Some(quality),
            ),
            copy_number_pre,
            copy_number_post,
            n_sites_pre: 10,
            n_hets_pre: 0,
            n_sites_post: 10,
            n_hets_post: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_roh_status_strings() {
        assert_eq!(
            RohStatus::from_str("NEW_IN_POST").unwrap(),
            RohStatus::NewInPost
        );
        assert_eq!(
            RohStatus::from_str("LOST_IN_POST").unwrap(),
            RohStatus::LostInPost
        );
        assert!(RohStatus::from_str("GAINED").is_err());
        assert_eq!(RohStatus::Unchanged.to_string(), "UNCHANGED");
        assert_eq!(RohStatus::NewInPost.file_label(), "new-in-post");
    }

    #[test]
    fn test_p_value_from_quality() {
        let region = GenomicRegion::new("chr1", 1000, 5000).unwrap();
        let s = ScoredRegion::new(region.clone(), Some(20.0));
        approx::assert_ulps_eq!(s.p_value().unwrap(), 0.01, max_ulps = 4);

        let s = ScoredRegion::new(region, None);
        assert_eq!(s.p_value(), None);
    }
}
